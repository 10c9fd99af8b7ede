//! Phase-gated move submission.

use tracing::{info, warn};

use crate::config::game::GameConfig;
use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::phase::Phase;
use crate::domain::session::SessionState;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::GameStore;

/// Accept or reject one participant's choice.
///
/// The label is checked before any store access. The phase is recomputed
/// from fresh counts; only `waiting_for_moves` admits a write. The unique
/// (session, player) index is the final word on duplicates, so two racing
/// submissions from one participant still record exactly one move.
pub async fn submit_move(
    store: &dyn GameStore,
    config: &GameConfig,
    session_id: &SessionId,
    participant_id: &ParticipantId,
    raw_choice: &str,
) -> Result<SessionState, DomainError> {
    let choice = config.choices.validate(raw_choice)?;

    let session = store
        .find_session(session_id)
        .await?
        .ok_or_else(|| DomainError::session_not_found(session_id))?;

    let moves_recorded = store.count_moves(session_id).await?;
    let before = SessionState::from_counts(session.occupancy, moves_recorded, config.capacity);

    if !before.phase.accepts_moves() {
        let detail = match before.phase {
            Phase::WaitingForOpponent => format!(
                "Session is still waiting for players ({}/{})",
                session.occupancy, config.capacity
            ),
            _ => "Session is already finished".to_string(),
        };
        return Err(DomainError::conflict(ConflictKind::PhaseMismatch, detail));
    }

    if let Err(e) = store.insert_move(session_id, participant_id, &choice).await {
        if matches!(e, DomainError::Conflict(ConflictKind::DuplicateMove, _)) {
            warn!(
                session_id = %session_id,
                player_id = %participant_id,
                "duplicate move rejected"
            );
        }
        return Err(e);
    }

    let moves_recorded = store.count_moves(session_id).await?;
    let after = SessionState::from_counts(session.occupancy, moves_recorded, config.capacity);

    info!(
        session_id = %session_id,
        player_id = %participant_id,
        choice = %choice,
        moves = after.moves_recorded,
        phase = %after.phase,
        "move recorded"
    );

    Ok(after)
}
