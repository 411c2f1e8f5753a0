use crate::error::CoreResult;

/// A friendship is two directed rows; `Pending` rows exist in one direction
/// only, acceptance makes the pair symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    Pending,
    Accepted,
}

/// One directed relationship row: "owner sent/has a relationship toward
/// peer". Never stored with `owner == peer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: i64,
    pub owner: String,
    pub peer: String,
    pub state: EdgeState,
}

/// A gift's reservation sub-state. Invariant: `claimant` is non-empty
/// exactly when `state != 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub state: i64,
    pub claimant: String,
}

impl Claim {
    pub fn unclaimed() -> Self {
        Self { state: 0, claimant: String::new() }
    }

    /// The claim value a user's transition to `desired` should produce.
    /// State 0 always clears the claimant.
    pub fn resolve(user: &str, desired: i64) -> Self {
        if desired == 0 {
            Self::unclaimed()
        } else {
            Self { state: desired, claimant: user.to_string() }
        }
    }

    pub fn is_unclaimed(&self) -> bool {
        self.claimant.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
    Updated(Claim),
    HeldByOther,
    NotFound,
}

/// Durable relationship rows. Multi-row operations are atomic: a caller
/// observes either none or all of their writes.
pub trait RelationshipStore: Send + Sync {
    fn edge(&self, id: i64) -> CoreResult<Option<Edge>>;

    fn edge_between(&self, owner: &str, peer: &str, state: EdgeState) -> CoreResult<Option<Edge>>;

    /// Accepted rows owned by `owner` (this user's friends).
    fn accepted_from(&self, owner: &str) -> CoreResult<Vec<Edge>>;

    /// Pending rows pointing at `peer` (requests awaiting their decision).
    fn pending_toward(&self, peer: &str) -> CoreResult<Vec<Edge>>;

    /// Insert a Pending row owner→peer unless a row in that direction
    /// already exists in any state; `None` reports the duplicate. The check
    /// and the insert are one unit, so two identical racing requests cannot
    /// both land.
    fn insert_pending(&self, owner: &str, peer: &str) -> CoreResult<Option<Edge>>;

    /// Flip edge `id` to Accepted and ensure the reciprocal Accepted row
    /// exists, as one unit. A pre-existing reverse row is upgraded in place
    /// rather than duplicated. Returns `None` if the edge is gone or no
    /// longer pending.
    fn accept_with_reciprocal(&self, id: i64) -> CoreResult<Option<Edge>>;

    fn delete_edge(&self, id: i64) -> CoreResult<bool>;

    /// Delete both directions between `a` and `b` as one unit; returns the
    /// number of rows removed.
    fn delete_pair(&self, a: &str, b: &str) -> CoreResult<usize>;
}

/// Durable claim sub-state of gifts.
pub trait ClaimStore: Send + Sync {
    fn claim(&self, gift_id: i64) -> CoreResult<Option<Claim>>;

    /// Write `new` iff the gift's current claimant is empty or equals
    /// `user` — a single conditional update, so two racing claimants can
    /// never both win.
    fn update_claim_if_held_by(
        &self,
        gift_id: i64,
        user: &str,
        new: &Claim,
    ) -> CoreResult<ClaimOutcome>;
}
