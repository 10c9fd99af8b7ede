//! DTOs for moves_sea adapter.

/// DTO for recording one participant's move.
#[derive(Debug, Clone)]
pub struct MoveCreate {
    pub session_id: String,
    pub player_id: String,
    pub choice: String,
}

impl MoveCreate {
    pub fn new(
        session_id: impl Into<String>,
        player_id: impl Into<String>,
        choice: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            player_id: player_id.into(),
            choice: choice.into(),
        }
    }
}
