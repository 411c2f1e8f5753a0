use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use giftwell_core::friends as engine;
use giftwell_core::friends::FriendLink;
use giftwell_core::store::{Edge, EdgeState};
use giftwell_types::api::{Ack, FriendRequestBody, FriendView, FriendsResponse, ProfileView};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;

fn edge_view(edge: Edge) -> FriendView {
    FriendView {
        id: edge.id,
        owner: edge.owner,
        friend: edge.peer,
        state: edge.state == EdgeState::Accepted,
        profile: None,
    }
}

fn link_view(link: FriendLink) -> FriendView {
    let mut view = edge_view(link.edge);
    view.profile = Some(ProfileView {
        id: link.profile.id,
        email: link.profile.email,
        name: link.profile.display_name,
        photo: link.profile.photo_url,
    });
    view
}

pub async fn get_friends(
    State(state): State<AppState>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<Json<FriendsResponse>> {
    let friends = engine::list_friends(state.db.as_ref(), &state.identity, &uid)?;

    Ok(Json(FriendsResponse {
        current: friends.current.into_iter().map(link_view).collect(),
        requests: friends.requests.into_iter().map(link_view).collect(),
    }))
}

pub async fn request_friend(
    State(state): State<AppState>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
    Json(body): Json<FriendRequestBody>,
) -> ApiResult<Json<FriendView>> {
    let edge = engine::request_friend(state.db.as_ref(), &state.identity, &uid, &body.email)?;
    Ok(Json(edge_view(edge)))
}

pub async fn accept_friend(
    State(state): State<AppState>,
    Path(friend_id): Path<i64>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<Json<FriendView>> {
    let edge = engine::accept_friend(state.db.as_ref(), friend_id, &uid)?;
    Ok(Json(edge_view(edge)))
}

pub async fn reject_friend(
    State(state): State<AppState>,
    Path(friend_id): Path<i64>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<Json<Ack>> {
    engine::reject_friend(state.db.as_ref(), friend_id, &uid)?;
    Ok(Json(Ack::ok()))
}

pub async fn remove_friend(
    State(state): State<AppState>,
    Path(friend_id): Path<i64>,
    Extension(AuthUser(uid)): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let removed = engine::remove_friend(state.db.as_ref(), friend_id, &uid)?;

    if removed {
        Ok((StatusCode::OK, Json(Ack::ok())))
    } else {
        Ok((StatusCode::NOT_FOUND, Json(Ack::failed("friend not found"))))
    }
}
