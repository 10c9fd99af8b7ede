use parley_backend::domain::ids::SessionId;
use parley_backend::domain::phase::Phase;
use parley_backend::errors::domain::{DomainError, NotFoundKind};
use parley_backend::repos::GameStore;
use parley_backend::services::{matchmaking, sessions};

use crate::support::stores::{choice, memory_store};

#[tokio::test]
async fn unknown_session_is_not_found_for_state_and_results() {
    let store = memory_store();
    let missing = SessionId::new();

    let err = sessions::get_state(store.as_ref(), 2, &missing)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));

    let err = sessions::get_results(store.as_ref(), &missing)
        .await
        .unwrap_err();
    match err {
        DomainError::NotFound(NotFoundKind::Session, detail) => {
            assert!(detail.contains(missing.as_str()));
        }
        other => panic!("expected session not found, got {other:?}"),
    }
}

#[tokio::test]
async fn results_of_unfinished_session_are_partial() {
    let store = memory_store();
    let a = matchmaking::join(store.as_ref(), 2).await.unwrap();
    let b = matchmaking::join(store.as_ref(), 2).await.unwrap();

    assert!(sessions::get_results(store.as_ref(), &a.session_id)
        .await
        .unwrap()
        .is_empty());

    store
        .insert_move(&a.session_id, &b.participant_id, &choice("Defect"))
        .await
        .unwrap();

    let results = sessions::get_results(store.as_ref(), &a.session_id)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].participant_id, b.participant_id);

    let state = sessions::get_state(store.as_ref(), 2, &a.session_id)
        .await
        .unwrap();
    assert_eq!(state.phase, Phase::WaitingForMoves);
}

#[tokio::test]
async fn state_of_single_seat_session_is_immediately_full() {
    let store = memory_store();
    let solo = matchmaking::join(store.as_ref(), 1).await.unwrap();
    let state = sessions::get_state(store.as_ref(), 1, &solo.session_id)
        .await
        .unwrap();
    assert_eq!(state.occupancy, 1);
    assert_eq!(state.phase, Phase::WaitingForMoves);
}
