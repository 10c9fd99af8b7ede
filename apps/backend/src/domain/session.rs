//! Read models for sessions and recorded moves.

use crate::domain::choice::Choice;
use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::phase::Phase;

/// A session row as the store sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: SessionId,
    pub occupancy: u32,
}

/// Snapshot of a session's counts and derived phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub occupancy: u32,
    pub moves_recorded: u32,
    pub phase: Phase,
}

impl SessionState {
    pub fn from_counts(occupancy: u32, moves_recorded: u32, capacity: u32) -> Self {
        Self {
            occupancy,
            moves_recorded,
            phase: Phase::resolve(occupancy, moves_recorded, capacity),
        }
    }
}

/// One recorded move, as returned by the result projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub participant_id: ParticipantId,
    pub choice: Choice,
}

/// Outcome of a join: where the caller landed and who they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    /// Occupancy right after this caller's slot was taken.
    pub occupancy: u32,
}
