use parley_backend::config::game::GameConfig;
use parley_backend::domain::choice::ChoiceSet;
use parley_backend::domain::ids::{ParticipantId, SessionId};
use parley_backend::domain::phase::Phase;
use parley_backend::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use parley_backend::repos::GameStore;
use parley_backend::services::{matchmaking, move_gate};

use crate::support::stores::{memory_store, sqlite_memory_store};

/// Join `capacity` participants into one session.
async fn full_session(
    store: &dyn GameStore,
    capacity: u32,
) -> (SessionId, Vec<ParticipantId>) {
    let mut players = Vec::new();
    let mut session = None;
    for _ in 0..capacity {
        let outcome = matchmaking::join(store, capacity).await.unwrap();
        session.get_or_insert(outcome.session_id.clone());
        players.push(outcome.participant_id);
    }
    (session.unwrap(), players)
}

#[tokio::test]
async fn too_early_is_phase_mismatch() {
    let store = memory_store();
    let config = GameConfig::default();
    let outcome = matchmaking::join(store.as_ref(), config.capacity).await.unwrap();

    let err = move_gate::submit_move(
        store.as_ref(),
        &config,
        &outcome.session_id,
        &outcome.participant_id,
        "Cooperate",
    )
    .await
    .unwrap_err();

    match err {
        DomainError::Conflict(ConflictKind::PhaseMismatch, detail) => {
            assert!(detail.contains("waiting for players"));
        }
        other => panic!("expected PhaseMismatch, got {other:?}"),
    }
    assert_eq!(store.count_moves(&outcome.session_id).await.unwrap(), 0);
}

#[tokio::test]
async fn after_finished_is_phase_mismatch() {
    let store = memory_store();
    let config = GameConfig::default();
    let (session, players) = full_session(store.as_ref(), 2).await;

    for p in &players {
        move_gate::submit_move(store.as_ref(), &config, &session, p, "Defect")
            .await
            .unwrap();
    }

    let err = move_gate::submit_move(
        store.as_ref(),
        &config,
        &session,
        &ParticipantId::new(),
        "Defect",
    )
    .await
    .unwrap_err();
    match err {
        DomainError::Conflict(ConflictKind::PhaseMismatch, detail) => {
            assert!(detail.contains("finished"));
        }
        other => panic!("expected PhaseMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn same_participant_twice_is_duplicate() {
    let store = sqlite_memory_store().await;
    let config = GameConfig::default().with_capacity(3);
    let (session, players) = full_session(store.as_ref(), 3).await;

    move_gate::submit_move(store.as_ref(), &config, &session, &players[0], "Cooperate")
        .await
        .unwrap();
    let err = move_gate::submit_move(store.as_ref(), &config, &session, &players[0], "Defect")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateMove, _)
    ));
    assert_eq!(store.count_moves(&session).await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_choice_is_rejected_before_any_store_access() {
    let store = memory_store();
    let config = GameConfig::default();

    // Unknown session too: validation wins, so the store was never asked.
    let err = move_gate::submit_move(
        store.as_ref(),
        &config,
        &SessionId::new(),
        &ParticipantId::new(),
        "Betray",
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidChoice, _)
    ));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let store = memory_store();
    let err = move_gate::submit_move(
        store.as_ref(),
        &GameConfig::default(),
        &SessionId::new(),
        &ParticipantId::new(),
        "Cooperate",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Session, _)));
}

#[tokio::test]
async fn custom_choice_sets_are_enforced() {
    let store = memory_store();
    let config = GameConfig::default()
        .with_choices(ChoiceSet::parse_list("Rock,Paper,Scissors").unwrap());
    let (session, players) = full_session(store.as_ref(), 2).await;

    assert!(
        move_gate::submit_move(store.as_ref(), &config, &session, &players[0], "Cooperate")
            .await
            .is_err()
    );
    let state = move_gate::submit_move(store.as_ref(), &config, &session, &players[0], "Rock")
        .await
        .unwrap();
    assert_eq!(state.phase, Phase::WaitingForMoves);
}

#[tokio::test]
async fn racing_duplicate_submissions_record_one_move() {
    let store = sqlite_memory_store().await;
    let config = GameConfig::default();
    let (session, players) = full_session(store.as_ref(), 2).await;

    let (a, b) = tokio::join!(
        move_gate::submit_move(store.as_ref(), &config, &session, &players[0], "Cooperate"),
        move_gate::submit_move(store.as_ref(), &config, &session, &players[0], "Defect"),
    );

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    assert_eq!(store.count_moves(&session).await.unwrap(), 1);
}
