//! Implementations of the core data-access contracts over SQLite.
//!
//! Multi-row operations (accepting a request, severing a pair) run inside a
//! transaction; the claim write is a single guarded UPDATE. The stored
//! `state` column is 0 = pending, 1 = accepted.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

use giftwell_core::CoreResult;
use giftwell_core::store::{
    Claim, ClaimOutcome, ClaimStore, Edge, EdgeState, RelationshipStore,
};

use crate::Database;

fn state_code(state: EdgeState) -> i64 {
    match state {
        EdgeState::Pending => 0,
        EdgeState::Accepted => 1,
    }
}

fn edge_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Edge> {
    let code: i64 = row.get(3)?;
    Ok(Edge {
        id: row.get(0)?,
        owner: row.get(1)?,
        peer: row.get(2)?,
        state: if code == 0 {
            EdgeState::Pending
        } else {
            EdgeState::Accepted
        },
    })
}

fn query_edge(conn: &Connection, id: i64) -> Result<Option<Edge>> {
    let row = conn
        .query_row(
            "SELECT id, owner, friend, state FROM friends WHERE id = ?1",
            [id],
            edge_from_row,
        )
        .optional()?;
    Ok(row)
}

impl RelationshipStore for Database {
    fn edge(&self, id: i64) -> CoreResult<Option<Edge>> {
        self.with_conn(|conn| query_edge(conn, id)).map_err(Into::into)
    }

    fn edge_between(&self, owner: &str, peer: &str, state: EdgeState) -> CoreResult<Option<Edge>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, owner, friend, state FROM friends
                     WHERE owner = ?1 AND friend = ?2 AND state = ?3",
                    (owner, peer, state_code(state)),
                    edge_from_row,
                )
                .optional()?;
            Ok(row)
        })
        .map_err(Into::into)
    }

    fn accepted_from(&self, owner: &str) -> CoreResult<Vec<Edge>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner, friend, state FROM friends
                 WHERE owner = ?1 AND state = 1",
            )?;
            let rows = stmt
                .query_map([owner], edge_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .map_err(Into::into)
    }

    fn pending_toward(&self, peer: &str) -> CoreResult<Vec<Edge>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner, friend, state FROM friends
                 WHERE friend = ?1 AND state = 0",
            )?;
            let rows = stmt
                .query_map([peer], edge_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
        .map_err(Into::into)
    }

    fn insert_pending(&self, owner: &str, peer: &str) -> CoreResult<Option<Edge>> {
        self.with_conn(|conn| {
            // Guarded insert: the duplicate check and the write are one
            // statement, so identical racing requests cannot both land.
            let inserted = conn.execute(
                "INSERT INTO friends (owner, friend, state)
                 SELECT ?1, ?2, 0
                 WHERE NOT EXISTS (
                     SELECT 1 FROM friends WHERE owner = ?1 AND friend = ?2
                 )",
                (owner, peer),
            )?;
            if inserted == 0 {
                return Ok(None);
            }
            Ok(Some(Edge {
                id: conn.last_insert_rowid(),
                owner: owner.to_string(),
                peer: peer.to_string(),
                state: EdgeState::Pending,
            }))
        })
        .map_err(Into::into)
    }

    fn accept_with_reciprocal(&self, id: i64) -> CoreResult<Option<Edge>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let Some(edge) = query_edge(&tx, id)? else {
                return Ok(None);
            };
            if edge.state != EdgeState::Pending {
                return Ok(None);
            }

            tx.execute("UPDATE friends SET state = 1 WHERE id = ?1", [id])?;

            // Upgrade a pre-existing reverse row (crossed requests) instead
            // of inserting a duplicate.
            let upgraded = tx.execute(
                "UPDATE friends SET state = 1 WHERE owner = ?1 AND friend = ?2",
                (&edge.peer, &edge.owner),
            )?;
            if upgraded == 0 {
                tx.execute(
                    "INSERT INTO friends (owner, friend, state) VALUES (?1, ?2, 1)",
                    (&edge.peer, &edge.owner),
                )?;
            }

            tx.commit()?;

            Ok(Some(Edge {
                state: EdgeState::Accepted,
                ..edge
            }))
        })
        .map_err(Into::into)
    }

    fn delete_edge(&self, id: i64) -> CoreResult<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM friends WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
        .map_err(Into::into)
    }

    fn delete_pair(&self, a: &str, b: &str) -> CoreResult<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM friends
                 WHERE (owner = ?1 AND friend = ?2) OR (owner = ?2 AND friend = ?1)",
                (a, b),
            )?;
            Ok(affected)
        })
        .map_err(Into::into)
    }
}

impl ClaimStore for Database {
    fn claim(&self, gift_id: i64) -> CoreResult<Option<Claim>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT claim_status, claimed_by FROM gifts WHERE id = ?1",
                    [gift_id],
                    |row| {
                        Ok(Claim {
                            state: row.get(0)?,
                            claimant: row.get(1)?,
                        })
                    },
                )
                .optional()?;
            Ok(row)
        })
        .map_err(Into::into)
    }

    fn update_claim_if_held_by(
        &self,
        gift_id: i64,
        user: &str,
        new: &Claim,
    ) -> CoreResult<ClaimOutcome> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE gifts SET claim_status = ?1, claimed_by = ?2
                 WHERE id = ?3 AND (claimed_by = '' OR claimed_by = ?4)",
                (new.state, &new.claimant, gift_id, user),
            )?;
            if changed > 0 {
                return Ok(ClaimOutcome::Updated(new.clone()));
            }

            let exists: Option<i64> = conn
                .query_row("SELECT id FROM gifts WHERE id = ?1", [gift_id], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(if exists.is_some() {
                ClaimOutcome::HeldByOther
            } else {
                ClaimOutcome::NotFound
            })
        })
        .map_err(Into::into)
    }
}
