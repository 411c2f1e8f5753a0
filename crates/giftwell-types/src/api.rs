use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- JWT Claims --

/// JWT claims carried by every bearer token. Canonical definition lives here
/// so the REST middleware and the token issuer agree on the shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub photo_url: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub display_name: String,
    pub token: String,
}

// -- Acknowledgement envelope --

#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: Some(message.into()) }
    }
}

// -- Friends --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FriendRequestBody {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub photo: String,
}

/// One relationship row as it goes over the wire. `state` stays a boolean
/// (false = pending, true = accepted) for compatibility with existing
/// clients; `profile` is the other party, resolved through the identity
/// directory.
#[derive(Debug, Serialize)]
pub struct FriendView {
    pub id: i64,
    pub owner: String,
    pub friend: String,
    pub state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileView>,
}

#[derive(Debug, Serialize)]
pub struct FriendsResponse {
    pub current: Vec<FriendView>,
    pub requests: Vec<FriendView>,
}

// -- Lists --

/// Create/edit body. Edits are partial: empty fields keep the stored value.
#[derive(Debug, Deserialize)]
pub struct ListPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ListView {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub gifts: Vec<GiftView>,
}

// -- Gifts --

#[derive(Debug, Deserialize)]
pub struct GiftPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct GiftView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub claim: ClaimView,
}

// -- Claims --

#[derive(Debug, Deserialize)]
pub struct ClaimPayload {
    pub state: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct ClaimView {
    pub state: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub photo: String,
}
