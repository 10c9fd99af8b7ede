//! Coordination services over an injected [`GameStore`](crate::repos::GameStore).

pub mod matchmaking;
pub mod move_gate;
pub mod sessions;
