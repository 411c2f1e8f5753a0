use crate::error::CoreResult;

/// A user as the identity side knows them. The core never creates or
/// deletes users; it only reads profiles keyed by opaque ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub photo_url: String,
}

impl Profile {
    /// Stand-in for a user id the directory can no longer resolve.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            email: String::new(),
            display_name: String::new(),
            photo_url: String::new(),
        }
    }
}

/// Contract with whatever authenticates tokens and resolves profiles.
/// A failed `verify_token` is an authentication error, never an
/// authorization one.
pub trait IdentityProvider: Send + Sync {
    fn verify_token(&self, bearer: &str) -> CoreResult<String>;
    fn profile_by_uid(&self, uid: &str) -> CoreResult<Profile>;
    fn profile_by_email(&self, email: &str) -> CoreResult<Profile>;
}
