//! In-memory doubles for the store and identity contracts.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::{CoreError, CoreResult};
use crate::identity::{IdentityProvider, Profile};
use crate::store::{
    Claim, ClaimOutcome, ClaimStore, Edge, EdgeState, RelationshipStore,
};

pub struct MemoryStore {
    edges: Mutex<Vec<Edge>>,
    claims: Mutex<HashMap<i64, Claim>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            edges: Mutex::new(Vec::new()),
            claims: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// A store where `a` and `b` are already mutual friends.
    pub fn with_friends(a: &str, b: &str) -> Self {
        let store = Self::new();
        {
            let mut edges = store.edges.lock().unwrap();
            edges.push(Edge {
                id: store.next_id.fetch_add(1, Ordering::SeqCst),
                owner: a.to_string(),
                peer: b.to_string(),
                state: EdgeState::Accepted,
            });
            edges.push(Edge {
                id: store.next_id.fetch_add(1, Ordering::SeqCst),
                owner: b.to_string(),
                peer: a.to_string(),
                state: EdgeState::Accepted,
            });
        }
        store
    }

    /// Register an unclaimed gift so claim updates have a row to hit.
    pub fn add_gift(&self, gift_id: i64) {
        self.claims.lock().unwrap().insert(gift_id, Claim::unclaimed());
    }
}

impl RelationshipStore for MemoryStore {
    fn edge(&self, id: i64) -> CoreResult<Option<Edge>> {
        Ok(self.edges.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    fn edge_between(&self, owner: &str, peer: &str, state: EdgeState) -> CoreResult<Option<Edge>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.owner == owner && e.peer == peer && e.state == state)
            .cloned())
    }

    fn accepted_from(&self, owner: &str) -> CoreResult<Vec<Edge>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner == owner && e.state == EdgeState::Accepted)
            .cloned()
            .collect())
    }

    fn pending_toward(&self, peer: &str) -> CoreResult<Vec<Edge>> {
        Ok(self
            .edges
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.peer == peer && e.state == EdgeState::Pending)
            .cloned()
            .collect())
    }

    fn insert_pending(&self, owner: &str, peer: &str) -> CoreResult<Option<Edge>> {
        let mut edges = self.edges.lock().unwrap();
        if edges.iter().any(|e| e.owner == owner && e.peer == peer) {
            return Ok(None);
        }
        let edge = Edge {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            owner: owner.to_string(),
            peer: peer.to_string(),
            state: EdgeState::Pending,
        };
        edges.push(edge.clone());
        Ok(Some(edge))
    }

    fn accept_with_reciprocal(&self, id: i64) -> CoreResult<Option<Edge>> {
        let mut edges = self.edges.lock().unwrap();

        let Some(pos) = edges
            .iter()
            .position(|e| e.id == id && e.state == EdgeState::Pending)
        else {
            return Ok(None);
        };

        edges[pos].state = EdgeState::Accepted;
        let accepted = edges[pos].clone();

        if let Some(reverse) = edges
            .iter_mut()
            .find(|e| e.owner == accepted.peer && e.peer == accepted.owner)
        {
            reverse.state = EdgeState::Accepted;
        } else {
            let reciprocal = Edge {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                owner: accepted.peer.clone(),
                peer: accepted.owner.clone(),
                state: EdgeState::Accepted,
            };
            edges.push(reciprocal);
        }

        Ok(Some(accepted))
    }

    fn delete_edge(&self, id: i64) -> CoreResult<bool> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|e| e.id != id);
        Ok(edges.len() < before)
    }

    fn delete_pair(&self, a: &str, b: &str) -> CoreResult<usize> {
        let mut edges = self.edges.lock().unwrap();
        let before = edges.len();
        edges.retain(|e| {
            !((e.owner == a && e.peer == b) || (e.owner == b && e.peer == a))
        });
        Ok(before - edges.len())
    }
}

impl ClaimStore for MemoryStore {
    fn claim(&self, gift_id: i64) -> CoreResult<Option<Claim>> {
        Ok(self.claims.lock().unwrap().get(&gift_id).cloned())
    }

    fn update_claim_if_held_by(
        &self,
        gift_id: i64,
        user: &str,
        new: &Claim,
    ) -> CoreResult<ClaimOutcome> {
        let mut claims = self.claims.lock().unwrap();
        let Some(current) = claims.get_mut(&gift_id) else {
            return Ok(ClaimOutcome::NotFound);
        };
        if !current.is_unclaimed() && current.claimant != user {
            return Ok(ClaimOutcome::HeldByOther);
        }
        *current = new.clone();
        Ok(ClaimOutcome::Updated(new.clone()))
    }
}

pub struct MemoryIdentity {
    profiles: Vec<Profile>,
}

impl MemoryIdentity {
    pub fn with_users(users: &[(&str, &str)]) -> Self {
        Self {
            profiles: users
                .iter()
                .map(|(id, email)| Profile {
                    id: id.to_string(),
                    email: email.to_string(),
                    display_name: id.to_string(),
                    photo_url: String::new(),
                })
                .collect(),
        }
    }
}

impl IdentityProvider for MemoryIdentity {
    fn verify_token(&self, bearer: &str) -> CoreResult<String> {
        self.profiles
            .iter()
            .find(|p| p.id == bearer)
            .map(|p| p.id.clone())
            .ok_or(CoreError::Unauthenticated)
    }

    fn profile_by_uid(&self, uid: &str) -> CoreResult<Profile> {
        self.profiles
            .iter()
            .find(|p| p.id == uid)
            .cloned()
            .ok_or(CoreError::NotFound)
    }

    fn profile_by_email(&self, email: &str) -> CoreResult<Profile> {
        self.profiles
            .iter()
            .find(|p| p.email == email)
            .cloned()
            .ok_or(CoreError::NotFound)
    }
}
