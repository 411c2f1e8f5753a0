//! The identity provider backing the service: HS256 bearer tokens over the
//! local users directory. Handed to the core as a trait object so tests can
//! swap in doubles.

use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use giftwell_core::identity::{IdentityProvider, Profile};
use giftwell_core::{CoreError, CoreResult};
use giftwell_db::Database;
use giftwell_db::models::UserRow;
use giftwell_types::api::Claims;

#[derive(Clone)]
pub struct JwtIdentity {
    db: Arc<Database>,
    secret: String,
}

impl JwtIdentity {
    pub fn new(db: Arc<Database>, secret: String) -> Self {
        Self { db, secret }
    }

    pub fn issue_token(&self, uid: &str, email: &str) -> anyhow::Result<String> {
        let claims = Claims {
            sub: uid.to_string(),
            email: email.to_string(),
            exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }
}

fn profile_from_row(row: UserRow) -> Profile {
    Profile {
        id: row.id,
        email: row.email,
        display_name: row.display_name,
        photo_url: row.photo_url,
    }
}

impl IdentityProvider for JwtIdentity {
    fn verify_token(&self, bearer: &str) -> CoreResult<String> {
        let token = bearer.strip_prefix("Bearer ").unwrap_or(bearer);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| CoreError::Unauthenticated)?;

        Ok(data.claims.sub)
    }

    fn profile_by_uid(&self, uid: &str) -> CoreResult<Profile> {
        self.db
            .user_by_id(uid)?
            .map(profile_from_row)
            .ok_or(CoreError::NotFound)
    }

    fn profile_by_email(&self, email: &str) -> CoreResult<Profile> {
        self.db
            .user_by_email(email)?
            .map(profile_from_row)
            .ok_or(CoreError::NotFound)
    }
}
