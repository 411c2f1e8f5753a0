//! Relationship engine: request / accept / reject / remove / list over the
//! dual-row friendship model.
//!
//! A friendship is two directed rows. A request creates one Pending row;
//! acceptance flips it and writes the reciprocal Accepted row in the same
//! store transaction, so the pair is never observable half-built. Removal
//! deletes both directions together.

use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::identity::{IdentityProvider, Profile};
use crate::store::{Edge, EdgeState, RelationshipStore};

/// An edge paired with the other party's profile for display.
#[derive(Debug, Clone)]
pub struct FriendLink {
    pub edge: Edge,
    pub profile: Profile,
}

#[derive(Debug, Clone)]
pub struct FriendList {
    /// Accepted rows owned by the user: their friends.
    pub current: Vec<FriendLink>,
    /// Pending rows pointing at the user: requests awaiting their decision.
    pub requests: Vec<FriendLink>,
}

/// Start (or complete) a friendship from `requester` toward the user behind
/// `target_email`.
///
/// If the target already asked first, the two requests merge: the existing
/// reverse Pending row is accepted on the requester's behalf instead of a
/// duplicate being inserted. Crossing requests therefore collapse to a
/// single accepted pair.
pub fn request_friend(
    store: &dyn RelationshipStore,
    identity: &dyn IdentityProvider,
    requester: &str,
    target_email: &str,
) -> CoreResult<Edge> {
    let target = identity.profile_by_email(target_email)?;

    if requester == target.id {
        return Err(CoreError::Unauthorized);
    }

    if store
        .edge_between(requester, &target.id, EdgeState::Accepted)?
        .is_some()
    {
        return Err(CoreError::Conflict("already friends".into()));
    }

    if store
        .edge_between(requester, &target.id, EdgeState::Pending)?
        .is_some()
    {
        return Err(CoreError::Conflict("request already pending".into()));
    }

    if let Some(reverse) = store.edge_between(&target.id, requester, EdgeState::Pending)? {
        return accept_friend(store, reverse.id, requester);
    }

    // The insert re-checks for an existing row in the same direction, so a
    // request racing an identical one resolves to a single Pending row.
    store
        .insert_pending(requester, &target.id)?
        .ok_or_else(|| CoreError::Conflict("request already pending".into()))
}

/// Accept a pending request. Only the peer of the edge may accept, and only
/// while it is still Pending; the edge flip and the reciprocal row are one
/// atomic store operation.
pub fn accept_friend(
    store: &dyn RelationshipStore,
    edge_id: i64,
    acceptor: &str,
) -> CoreResult<Edge> {
    let edge = store.edge(edge_id)?.ok_or(CoreError::NotFound)?;

    if edge.peer != acceptor || edge.state != EdgeState::Pending {
        return Err(CoreError::Unauthorized);
    }

    store
        .accept_with_reciprocal(edge_id)?
        .ok_or(CoreError::Unauthorized)
}

/// Decline a pending request: same authorization as accept, but the edge is
/// deleted and no reciprocal row appears.
pub fn reject_friend(
    store: &dyn RelationshipStore,
    edge_id: i64,
    acceptor: &str,
) -> CoreResult<()> {
    let edge = store.edge(edge_id)?.ok_or(CoreError::NotFound)?;

    if edge.peer != acceptor || edge.state != EdgeState::Pending {
        return Err(CoreError::Unauthorized);
    }

    store.delete_edge(edge_id)?;
    Ok(())
}

/// Sever a friendship from either side. Deletes both directions; returns
/// whether any row was actually removed (false is reported as a not-found
/// acknowledgement, not a hard failure).
pub fn remove_friend(
    store: &dyn RelationshipStore,
    edge_id: i64,
    requester: &str,
) -> CoreResult<bool> {
    let edge = store.edge(edge_id)?.ok_or(CoreError::NotFound)?;

    if requester != edge.owner && requester != edge.peer {
        return Err(CoreError::Unauthorized);
    }

    Ok(store.delete_pair(&edge.owner, &edge.peer)? > 0)
}

/// The user's friends and their incoming requests, each enriched with the
/// other party's profile. An id the directory no longer resolves degrades
/// to a placeholder instead of failing the whole listing.
pub fn list_friends(
    store: &dyn RelationshipStore,
    identity: &dyn IdentityProvider,
    user: &str,
) -> CoreResult<FriendList> {
    let current = store
        .accepted_from(user)?
        .into_iter()
        .map(|edge| {
            let profile = resolve_profile(identity, &edge.peer)?;
            Ok(FriendLink { edge, profile })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let requests = store
        .pending_toward(user)?
        .into_iter()
        .map(|edge| {
            let profile = resolve_profile(identity, &edge.owner)?;
            Ok(FriendLink { edge, profile })
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(FriendList { current, requests })
}

fn resolve_profile(identity: &dyn IdentityProvider, uid: &str) -> CoreResult<Profile> {
    match identity.profile_by_uid(uid) {
        Ok(profile) => Ok(profile),
        Err(CoreError::NotFound) => {
            warn!(uid, "friend profile no longer resolvable");
            Ok(Profile::placeholder(uid))
        }
        Err(e) => Err(e),
    }
}
