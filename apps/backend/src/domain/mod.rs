//! Domain layer: pure session types and phase logic.

pub mod choice;
pub mod ids;
pub mod phase;
pub mod session;

pub use choice::{Choice, ChoiceSet};
pub use ids::{ParticipantId, SessionId};
pub use phase::Phase;
pub use session::{JoinOutcome, MoveRecord, SessionRecord, SessionState};
