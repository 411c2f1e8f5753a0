use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use giftwell_core::{CoreError, gate};
use giftwell_db::models::ListRow;
use giftwell_types::api::{Ack, ListPayload, ListView};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::gifts::gift_view;
use crate::middleware::AuthUser;

fn list_view(state: &AppState, row: ListRow) -> ApiResult<ListView> {
    let gifts = state
        .db
        .gifts_for_list(row.id)?
        .into_iter()
        .map(|gift| gift_view(&state.identity, gift))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListView {
        id: row.id,
        name: row.name,
        owner: row.owner,
        description: row.description,
        gifts,
    })
}

/// All of a user's lists, gifts embedded. Visible to the owner and to the
/// owner's friends only.
pub async fn get_lists(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<Json<Vec<ListView>>> {
    gate::require_viewer(state.db.as_ref(), &uid, &user_id)?;

    let lists = state
        .db
        .lists_for_owner(&user_id)?
        .into_iter()
        .map(|row| list_view(&state, row))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(lists))
}

pub async fn create_list(
    State(state): State<AppState>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
    Json(body): Json<ListPayload>,
) -> ApiResult<Json<ListView>> {
    let row = state.db.create_list(&body.name, &uid, &body.description)?;
    Ok(Json(ListView {
        id: row.id,
        name: row.name,
        owner: row.owner,
        description: row.description,
        gifts: vec![],
    }))
}

pub async fn edit_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
    Json(body): Json<ListPayload>,
) -> ApiResult<Json<ListView>> {
    let mut row = state.db.list_by_id(list_id)?.ok_or(CoreError::NotFound)?;
    gate::require_owner(&uid, &row.owner)?;

    // Partial edit: empty fields keep the stored value.
    if !body.name.is_empty() {
        row.name = body.name;
    }
    if !body.description.is_empty() {
        row.description = body.description;
    }

    state.db.update_list(row.id, &row.name, &row.description)?;

    list_view(&state, row).map(Json)
}

pub async fn remove_list(
    State(state): State<AppState>,
    Path(list_id): Path<i64>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let owner = state.db.list_owner(list_id)?.ok_or(CoreError::NotFound)?;
    gate::require_owner(&uid, &owner)?;

    if state.db.delete_list(list_id)? {
        Ok((StatusCode::OK, Json(Ack::ok())))
    } else {
        Ok((StatusCode::NOT_FOUND, Json(Ack::failed("list not found"))))
    }
}
