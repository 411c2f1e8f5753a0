use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use giftwell_core::claim as claim_engine;
use giftwell_core::identity::IdentityProvider;
use giftwell_core::store::Claim;
use giftwell_core::{CoreError, CoreResult, gate};
use giftwell_db::models::GiftRow;
use giftwell_types::api::{Ack, ClaimPayload, ClaimView, GiftPayload, GiftView};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

/// A claim as shown to clients: the raw state plus the holder's name and
/// photo when the directory still knows them.
pub(crate) fn claim_view(identity: &dyn IdentityProvider, claim: &Claim) -> CoreResult<ClaimView> {
    if claim.is_unclaimed() {
        return Ok(ClaimView::default());
    }

    let (name, photo) = match identity.profile_by_uid(&claim.claimant) {
        Ok(profile) => (profile.display_name, profile.photo_url),
        Err(CoreError::NotFound) => (String::new(), String::new()),
        Err(e) => return Err(e),
    };

    Ok(ClaimView {
        state: claim.state,
        user: claim.claimant.clone(),
        name,
        photo,
    })
}

pub(crate) fn gift_view(identity: &dyn IdentityProvider, row: GiftRow) -> CoreResult<GiftView> {
    let claim = Claim {
        state: row.claim_status,
        claimant: row.claimed_by,
    };
    Ok(GiftView {
        id: row.id,
        name: row.name,
        description: row.description,
        url: row.url,
        image_url: row.image_url,
        claim: claim_view(identity, &claim)?,
    })
}

/// Resolve the owning list of a gift row and gate on ownership.
fn require_gift_owner(state: &AppState, row: &GiftRow, uid: &str) -> ApiResult<()> {
    let owner = state
        .db
        .list_owner(row.list_id)?
        .ok_or(CoreError::NotFound)?;
    gate::require_owner(uid, &owner)?;
    Ok(())
}

pub async fn create_gift(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
    Json(body): Json<GiftPayload>,
) -> ApiResult<Json<GiftView>> {
    let owner = state.db.list_owner(list_id)?.ok_or(CoreError::NotFound)?;
    gate::require_owner(&uid, &owner)?;

    let row = state.db.create_gift(
        list_id,
        &body.name,
        &body.description,
        &body.url,
        &body.image_url,
    )?;

    Ok(Json(gift_view(&state.identity, row)?))
}

pub async fn edit_gift(
    State(state): State<AppState>,
    Path((_list_id, gift_id)): Path<(i64, i64)>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
    Json(body): Json<GiftPayload>,
) -> ApiResult<Json<GiftView>> {
    let mut row = state.db.gift_by_id(gift_id)?.ok_or(CoreError::NotFound)?;
    require_gift_owner(&state, &row, &uid)?;

    // Partial edit: empty fields keep the stored value.
    if !body.name.is_empty() {
        row.name = body.name;
    }
    if !body.description.is_empty() {
        row.description = body.description;
    }
    if !body.url.is_empty() {
        row.url = body.url;
    }
    if !body.image_url.is_empty() {
        row.image_url = body.image_url;
    }

    state
        .db
        .update_gift(row.id, &row.name, &row.description, &row.url, &row.image_url)?;

    Ok(Json(gift_view(&state.identity, row)?))
}

pub async fn remove_gift(
    State(state): State<AppState>,
    Path((_list_id, gift_id)): Path<(i64, i64)>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let row = state.db.gift_by_id(gift_id)?.ok_or(CoreError::NotFound)?;
    require_gift_owner(&state, &row, &uid)?;

    if state.db.delete_gift(gift_id)? {
        Ok((StatusCode::OK, Json(Ack::ok())))
    } else {
        Ok((StatusCode::NOT_FOUND, Json(Ack::failed("gift not found"))))
    }
}

pub async fn claim_gift(
    State(state): State<AppState>,
    Path((_list_id, gift_id)): Path<(i64, i64)>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
    Json(body): Json<ClaimPayload>,
) -> ApiResult<Json<ClaimView>> {
    let row = state.db.gift_by_id(gift_id)?.ok_or(CoreError::NotFound)?;
    let owner = state
        .db
        .list_owner(row.list_id)?
        .ok_or(CoreError::NotFound)?;

    gate::require_claimant(state.db.as_ref(), &uid, &owner)?;

    let claim = claim_engine::set_claim(state.db.as_ref(), gift_id, &uid, body.state)?;

    Ok(Json(claim_view(&state.identity, &claim)?))
}
