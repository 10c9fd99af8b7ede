//! Store seam for the coordination core.
//!
//! Services talk to an `Arc<dyn GameStore>`; each method is one atomic
//! primitive against the durable store and never holds a lock across calls.

use async_trait::async_trait;

use crate::domain::choice::Choice;
use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::session::{MoveRecord, SessionRecord};
use crate::errors::domain::{DomainError, InfraErrorKind};

pub mod memory_store;
pub mod sea_store;

pub use memory_store::InMemoryStore;
pub use sea_store::SeaStore;

#[async_trait]
pub trait GameStore: Send + Sync + std::fmt::Debug {
    /// Session with spare capacity, highest occupancy first, oldest on ties.
    async fn find_open_session(&self, capacity: u32)
        -> Result<Option<SessionRecord>, DomainError>;

    /// Compare-and-set: take one slot only if occupancy still equals
    /// `observed` and is below `capacity`. `Ok(false)` means the race was lost.
    async fn try_claim_slot(
        &self,
        session_id: &SessionId,
        observed: u32,
        capacity: u32,
    ) -> Result<bool, DomainError>;

    /// Insert a new session whose creator holds the first slot, only if no
    /// session below `capacity` exists. The check and the insert are atomic;
    /// `Ok(None)` means an open session appeared and the caller should search
    /// again. An existing id fails with `Conflict(SessionIdCollision)`.
    async fn create_session_if_none_open(
        &self,
        session_id: &SessionId,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError>;

    async fn find_session(&self, session_id: &SessionId)
        -> Result<Option<SessionRecord>, DomainError>;

    async fn count_moves(&self, session_id: &SessionId) -> Result<u32, DomainError>;

    /// Record a move. A second move for the same participant fails with
    /// `Conflict(DuplicateMove)`.
    async fn insert_move(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        choice: &Choice,
    ) -> Result<(), DomainError>;

    /// Moves for a session in insertion order.
    async fn list_moves(&self, session_id: &SessionId) -> Result<Vec<MoveRecord>, DomainError>;

    /// Liveness check for the health endpoint.
    async fn ping(&self) -> Result<(), DomainError>;
}

/// Narrow a stored counter, treating anything out of range as corruption.
pub(crate) fn stored_count<T>(value: T, what: &str) -> Result<u32, DomainError>
where
    T: TryInto<u32> + Copy + std::fmt::Display,
{
    value.try_into().map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{what} out of range: {value}"),
        )
    })
}

/// Widen a capacity for the SQL layer.
pub(crate) fn sql_count(value: u32, what: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::validation_other(format!("{what} too large: {value}"))
    })
}
