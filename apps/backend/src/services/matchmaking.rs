//! Join-or-create: race-free assignment of participants to sessions.

use tracing::{debug, info};

use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::session::JoinOutcome;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::GameStore;

/// Place a fresh participant into a session with spare capacity, or open a
/// new one.
///
/// Both writes are conditional: [`GameStore::try_claim_slot`] increments
/// only the occupancy it observed, and
/// [`GameStore::create_session_if_none_open`] opens a session only while none
/// has a free slot. At most one session is open at a time, so sessions fill
/// in order. A lost race discards the observation and searches again; there
/// is no backoff and no bound on attempts. Store failures are returned as-is
/// and never retried here.
pub async fn join(store: &dyn GameStore, capacity: u32) -> Result<JoinOutcome, DomainError> {
    if capacity == 0 {
        return Err(DomainError::validation_other("capacity must be at least 1"));
    }

    let participant_id = ParticipantId::new();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;

        if let Some(candidate) = store.find_open_session(capacity).await? {
            if store
                .try_claim_slot(&candidate.id, candidate.occupancy, capacity)
                .await?
            {
                let occupancy = candidate.occupancy + 1;
                info!(
                    session_id = %candidate.id,
                    player_id = %participant_id,
                    occupancy,
                    capacity,
                    attempts,
                    "joined existing session"
                );
                return Ok(JoinOutcome {
                    session_id: candidate.id,
                    participant_id,
                    occupancy,
                });
            }

            debug!(
                session_id = %candidate.id,
                observed = candidate.occupancy,
                attempt = attempts,
                "slot claim lost a race, retrying"
            );
            continue;
        }

        let session_id = SessionId::new();
        match store.create_session_if_none_open(&session_id, capacity).await {
            Ok(Some(created)) => {
                info!(
                    session_id = %created.id,
                    player_id = %participant_id,
                    occupancy = created.occupancy,
                    capacity,
                    attempts,
                    "opened new session"
                );
                return Ok(JoinOutcome {
                    session_id: created.id,
                    participant_id,
                    occupancy: created.occupancy,
                });
            }
            Ok(None) => {
                debug!(
                    attempt = attempts,
                    "another join opened a session first, retrying"
                );
            }
            Err(DomainError::Conflict(ConflictKind::SessionIdCollision, _)) => {
                debug!(
                    session_id = %session_id,
                    attempt = attempts,
                    "session id collided on create, retrying"
                );
            }
            Err(e) => return Err(e),
        }
    }
}
