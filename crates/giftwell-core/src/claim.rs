//! Claim engine: the exclusivity rules for a gift's reservation.
//!
//! Two state classes: Unclaimed (state 0, no claimant) and Claimed-by-X
//! (state != 0, claimant = X). X moves freely among nonzero states and
//! releases by setting 0; anyone else is rejected until then. The gate's
//! friend/not-owner precondition is the caller's job.

use crate::error::{CoreError, CoreResult};
use crate::store::{Claim, ClaimOutcome, ClaimStore};

pub fn set_claim(
    store: &dyn ClaimStore,
    gift_id: i64,
    user: &str,
    desired: i64,
) -> CoreResult<Claim> {
    let next = Claim::resolve(user, desired);
    match store.update_claim_if_held_by(gift_id, user, &next)? {
        ClaimOutcome::Updated(claim) => Ok(claim),
        ClaimOutcome::HeldByOther => Err(CoreError::Unauthorized),
        ClaimOutcome::NotFound => Err(CoreError::NotFound),
    }
}
