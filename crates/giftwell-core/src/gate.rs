//! Ownership gate: the predicates every list/gift operation consults
//! before touching anything.

use crate::error::{CoreError, CoreResult};
use crate::store::{EdgeState, RelationshipStore};

/// One-directional friendship check. A user is always trivially friends
/// with themself; nothing reflexive is ever stored. Acceptance keeps both
/// directions in sync, so a single-direction lookup is sufficient.
pub fn are_friends(store: &dyn RelationshipStore, a: &str, b: &str) -> CoreResult<bool> {
    if a == b {
        return Ok(true);
    }
    Ok(store.edge_between(a, b, EdgeState::Accepted)?.is_some())
}

/// Edit/delete on lists and all gift mutations: owner only.
pub fn require_owner(user: &str, owner: &str) -> CoreResult<()> {
    if user == owner {
        Ok(())
    } else {
        Err(CoreError::Unauthorized)
    }
}

/// Viewing a list: the owner, or any friend of the owner.
pub fn require_viewer(store: &dyn RelationshipStore, user: &str, owner: &str) -> CoreResult<()> {
    if user == owner || are_friends(store, owner, user)? {
        Ok(())
    } else {
        Err(CoreError::Unauthorized)
    }
}

/// Claiming a gift: a friend of the owner who is not the owner. Owners
/// never see their own gifts' claims move.
pub fn require_claimant(store: &dyn RelationshipStore, user: &str, owner: &str) -> CoreResult<()> {
    if user != owner && are_friends(store, owner, user)? {
        Ok(())
    } else {
        Err(CoreError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemoryStore;

    #[test]
    fn reflexive_without_rows() {
        let store = MemoryStore::new();
        assert!(are_friends(&store, "alice", "alice").unwrap());
    }

    #[test]
    fn pending_is_not_friendship() {
        let store = MemoryStore::new();
        store.insert_pending("alice", "bob").unwrap();
        assert!(!are_friends(&store, "alice", "bob").unwrap());
        assert!(!are_friends(&store, "bob", "alice").unwrap());
    }

    #[test]
    fn accepted_edge_grants_view() {
        let store = MemoryStore::with_friends("alice", "bob");
        assert!(require_viewer(&store, "bob", "alice").is_ok());
        assert!(require_viewer(&store, "alice", "alice").is_ok());
        assert!(matches!(
            require_viewer(&store, "carol", "alice"),
            Err(CoreError::Unauthorized)
        ));
    }

    #[test]
    fn owner_check_ignores_friendship() {
        assert!(require_owner("alice", "alice").is_ok());
        // Friendship grants viewing, never mutation.
        assert!(matches!(require_owner("bob", "alice"), Err(CoreError::Unauthorized)));
    }

    #[test]
    fn claimant_must_be_friend_and_not_owner() {
        let store = MemoryStore::with_friends("alice", "bob");
        assert!(require_claimant(&store, "bob", "alice").is_ok());
        assert!(matches!(
            require_claimant(&store, "alice", "alice"),
            Err(CoreError::Unauthorized)
        ));
        assert!(matches!(
            require_claimant(&store, "carol", "alice"),
            Err(CoreError::Unauthorized)
        ));
    }
}
