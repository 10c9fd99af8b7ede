//! Many clients joining at once, with no coordination but the store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parley_backend::config::game::GameConfig;
use parley_backend::domain::ids::SessionId;
use parley_backend::domain::phase::Phase;
use parley_backend::domain::session::JoinOutcome;
use parley_backend::repos::GameStore;
use parley_backend::services::{matchmaking, move_gate, sessions};

use crate::support::stores::sqlite_file_store;
use crate::support::yielding_store::YieldingStore;

async fn join_concurrently(store: Arc<dyn GameStore>, n: usize, capacity: u32) -> Vec<JoinOutcome> {
    let handles: Vec<_> = (0..n)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { matchmaking::join(store.as_ref(), capacity).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(n);
    for handle in handles {
        outcomes.push(handle.await.expect("join task panicked").expect("join failed"));
    }
    outcomes
}

/// ceil(n / capacity) sessions; all full except at most one leftover.
async fn assert_packed(store: &dyn GameStore, outcomes: &[JoinOutcome], capacity: u32) {
    let participants: HashSet<_> = outcomes.iter().map(|o| o.participant_id.clone()).collect();
    assert_eq!(participants.len(), outcomes.len(), "participant ids must be unique");

    let mut per_session: HashMap<SessionId, u32> = HashMap::new();
    for o in outcomes {
        *per_session.entry(o.session_id.clone()).or_default() += 1;
    }

    let n = outcomes.len() as u32;
    let expected_sessions = n.div_ceil(capacity) as usize;
    assert_eq!(per_session.len(), expected_sessions);

    let mut partial = 0;
    for (session_id, joined) in &per_session {
        let stored = store.find_session(session_id).await.unwrap().unwrap();
        assert_eq!(stored.occupancy, *joined, "stored occupancy matches joins");
        assert!(stored.occupancy <= capacity);
        if stored.occupancy < capacity {
            partial += 1;
            assert_eq!(stored.occupancy, n % capacity);
        }
    }
    assert!(partial <= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_pair_exactly_in_memory() {
    let store: Arc<dyn GameStore> = Arc::new(YieldingStore::new());
    let outcomes = join_concurrently(store.clone(), 41, 2).await;
    assert_packed(store.as_ref(), &outcomes, 2).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_fill_larger_sessions_in_memory() {
    let store: Arc<dyn GameStore> = Arc::new(YieldingStore::new());
    let outcomes = join_concurrently(store.clone(), 50, 4).await;
    assert_packed(store.as_ref(), &outcomes, 4).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_pair_exactly_over_many_rounds() {
    for _ in 0..50 {
        let yielding = Arc::new(YieldingStore::new());
        let store: Arc<dyn GameStore> = yielding.clone();
        let outcomes = join_concurrently(store.clone(), 40, 2).await;
        assert_packed(store.as_ref(), &outcomes, 2).await;
        assert_eq!(yielding.session_count(), 20, "no session left behind empty");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_pair_exactly_on_sqlite_file() {
    let file = sqlite_file_store().await;
    let outcomes = join_concurrently(file.store.clone(), 40, 2).await;
    assert_packed(file.store.as_ref(), &outcomes, 2).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_joins_fill_larger_sessions_on_sqlite_file() {
    let file = sqlite_file_store().await;
    let outcomes = join_concurrently(file.store.clone(), 31, 3).await;
    assert_packed(file.store.as_ref(), &outcomes, 3).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_rounds_all_finish() {
    let store: Arc<dyn GameStore> = Arc::new(YieldingStore::new());
    let config = Arc::new(GameConfig::default());
    let outcomes = join_concurrently(store.clone(), 20, 2).await;

    let handles: Vec<_> = outcomes
        .iter()
        .cloned()
        .map(|o| {
            let store = store.clone();
            let config = config.clone();
            tokio::spawn(async move {
                move_gate::submit_move(
                    store.as_ref(),
                    &config,
                    &o.session_id,
                    &o.participant_id,
                    "Cooperate",
                )
                .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let session_ids: HashSet<_> = outcomes.iter().map(|o| o.session_id.clone()).collect();
    for id in session_ids {
        let state = sessions::get_state(store.as_ref(), 2, &id).await.unwrap();
        assert_eq!(state.phase, Phase::Finished);
        assert_eq!(state.moves_recorded, 2);
    }
}
