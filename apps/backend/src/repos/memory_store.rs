//! Process-local `GameStore`.
//!
//! The mutex is held for the body of a single method only, so each call is
//! as atomic as one SQL statement and no more. No method awaits, so a task
//! never yields inside or between calls on its own; concurrent callers only
//! interleave where the runtime preempts them at their own await points.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::choice::Choice;
use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::session::{MoveRecord, SessionRecord};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::GameStore;

#[derive(Debug)]
struct StoredSession {
    id: String,
    player_count: u32,
    /// Monotonic creation order; stands in for `created_at`.
    seq: u64,
}

#[derive(Debug)]
struct StoredMove {
    session_id: String,
    player_id: String,
    choice: String,
}

#[derive(Debug, Default)]
struct Tables {
    sessions: Vec<StoredSession>,
    moves: Vec<StoredMove>,
    next_seq: u64,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions ever created.
    pub fn session_count(&self) -> usize {
        self.tables.lock().sessions.len()
    }
}

fn record(session: &StoredSession) -> SessionRecord {
    SessionRecord {
        id: SessionId::from_stored(session.id.clone()),
        occupancy: session.player_count,
    }
}

#[async_trait]
impl GameStore for InMemoryStore {
    async fn find_open_session(
        &self,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let tables = self.tables.lock();
        let best = tables
            .sessions
            .iter()
            .filter(|s| s.player_count < capacity)
            .max_by(|a, b| {
                a.player_count
                    .cmp(&b.player_count)
                    .then_with(|| b.seq.cmp(&a.seq))
            });
        Ok(best.map(record))
    }

    async fn try_claim_slot(
        &self,
        session_id: &SessionId,
        observed: u32,
        capacity: u32,
    ) -> Result<bool, DomainError> {
        let mut tables = self.tables.lock();
        let Some(session) = tables
            .sessions
            .iter_mut()
            .find(|s| s.id == session_id.as_str())
        else {
            return Ok(false);
        };

        if session.player_count == observed && session.player_count < capacity {
            session.player_count += 1;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn create_session_if_none_open(
        &self,
        session_id: &SessionId,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let mut tables = self.tables.lock();
        if tables.sessions.iter().any(|s| s.player_count < capacity) {
            return Ok(None);
        }
        if tables.sessions.iter().any(|s| s.id == session_id.as_str()) {
            return Err(DomainError::conflict(
                ConflictKind::SessionIdCollision,
                "Session id already exists",
            ));
        }

        let seq = tables.next_seq;
        tables.next_seq += 1;
        tables.sessions.push(StoredSession {
            id: session_id.as_str().to_owned(),
            player_count: 1,
            seq,
        });
        Ok(Some(SessionRecord {
            id: session_id.clone(),
            occupancy: 1,
        }))
    }

    async fn find_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let tables = self.tables.lock();
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.id == session_id.as_str())
            .map(record))
    }

    async fn count_moves(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        let tables = self.tables.lock();
        let count = tables
            .moves
            .iter()
            .filter(|m| m.session_id == session_id.as_str())
            .count();
        crate::repos::stored_count(count as u64, "move count")
    }

    async fn insert_move(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        choice: &Choice,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.lock();

        if !tables.sessions.iter().any(|s| s.id == session_id.as_str()) {
            return Err(DomainError::validation_other(
                "Foreign key constraint violation",
            ));
        }
        if tables
            .moves
            .iter()
            .any(|m| m.session_id == session_id.as_str() && m.player_id == participant_id.as_str())
        {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateMove,
                "A move has already been recorded for this player",
            ));
        }

        tables.moves.push(StoredMove {
            session_id: session_id.as_str().to_owned(),
            player_id: participant_id.as_str().to_owned(),
            choice: choice.as_str().to_owned(),
        });
        Ok(())
    }

    async fn list_moves(&self, session_id: &SessionId) -> Result<Vec<MoveRecord>, DomainError> {
        let tables = self.tables.lock();
        Ok(tables
            .moves
            .iter()
            .filter(|m| m.session_id == session_id.as_str())
            .map(|m| MoveRecord {
                participant_id: ParticipantId::from_stored(m.player_id.clone()),
                choice: Choice::from_stored(m.choice.clone()),
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
