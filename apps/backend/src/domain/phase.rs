//! Session phase derivation.
//!
//! The phase is never stored; it is recomputed from the durable counts on
//! every read and before every move decision.

use std::fmt;

/// Derived synchronization state of a session.
///
/// Ordered: a session only ever moves forward through these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Fewer than `capacity` participants have joined.
    WaitingForOpponent,
    /// Full, and at least one participant has not moved.
    WaitingForMoves,
    /// Full, and every participant has moved.
    Finished,
}

impl Phase {
    /// Map observed counts to a phase.
    ///
    /// Counts beyond their bounds (which the store never produces) saturate
    /// towards the later phase.
    pub const fn resolve(occupancy: u32, moves_recorded: u32, capacity: u32) -> Phase {
        if occupancy < capacity {
            Phase::WaitingForOpponent
        } else if moves_recorded < occupancy {
            Phase::WaitingForMoves
        } else {
            Phase::Finished
        }
    }

    /// Wire label, e.g. `waiting_for_moves`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::WaitingForOpponent => "waiting_for_opponent",
            Phase::WaitingForMoves => "waiting_for_moves",
            Phase::Finished => "finished",
        }
    }

    /// Whether a move may be recorded in this phase.
    pub const fn accepts_moves(self) -> bool {
        matches!(self, Phase::WaitingForMoves)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
