//! Read-only projections: state query and results.

use crate::domain::ids::SessionId;
use crate::domain::session::{MoveRecord, SessionState};
use crate::errors::domain::DomainError;
use crate::repos::GameStore;

/// Current counts and derived phase.
///
/// Two independent reads. Moves only exist once the session is full and
/// occupancy never changes after that, so the pair is always consistent.
pub async fn get_state(
    store: &dyn GameStore,
    capacity: u32,
    session_id: &SessionId,
) -> Result<SessionState, DomainError> {
    let session = store
        .find_session(session_id)
        .await?
        .ok_or_else(|| DomainError::session_not_found(session_id))?;
    let moves_recorded = store.count_moves(session_id).await?;

    Ok(SessionState::from_counts(
        session.occupancy,
        moves_recorded,
        capacity,
    ))
}

/// All recorded moves in insertion order. Unfinished sessions return what
/// has been recorded so far.
pub async fn get_results(
    store: &dyn GameStore,
    session_id: &SessionId,
) -> Result<Vec<MoveRecord>, DomainError> {
    if store.find_session(session_id).await?.is_none() {
        return Err(DomainError::session_not_found(session_id));
    }
    store.list_moves(session_id).await
}
