//! Stores that misbehave on purpose.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::OnceLock;

use async_trait::async_trait;
use parley_backend::domain::choice::Choice;
use parley_backend::domain::ids::{ParticipantId, SessionId};
use parley_backend::domain::session::{MoveRecord, SessionRecord};
use parley_backend::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use parley_backend::repos::{GameStore, InMemoryStore};

/// Rejects the first `collisions` session inserts as id collisions, then
/// behaves like the in-memory store.
#[derive(Debug)]
pub struct CollidingStore {
    inner: InMemoryStore,
    collisions_left: AtomicU32,
    pub create_calls: AtomicU32,
}

impl CollidingStore {
    pub fn new(collisions: u32) -> Self {
        Self {
            inner: InMemoryStore::new(),
            collisions_left: AtomicU32::new(collisions),
            create_calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl GameStore for CollidingStore {
    async fn find_open_session(
        &self,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        self.inner.find_open_session(capacity).await
    }

    async fn try_claim_slot(
        &self,
        session_id: &SessionId,
        observed: u32,
        capacity: u32,
    ) -> Result<bool, DomainError> {
        self.inner.try_claim_slot(session_id, observed, capacity).await
    }

    async fn create_session_if_none_open(
        &self,
        session_id: &SessionId,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let collide = self
            .collisions_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if collide {
            return Err(DomainError::conflict(
                ConflictKind::SessionIdCollision,
                "Session id already exists",
            ));
        }
        self.inner
            .create_session_if_none_open(session_id, capacity)
            .await
    }

    async fn find_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionRecord>, DomainError> {
        self.inner.find_session(session_id).await
    }

    async fn count_moves(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        self.inner.count_moves(session_id).await
    }

    async fn insert_move(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        choice: &Choice,
    ) -> Result<(), DomainError> {
        self.inner.insert_move(session_id, participant_id, choice).await
    }

    async fn list_moves(&self, session_id: &SessionId) -> Result<Vec<MoveRecord>, DomainError> {
        self.inner.list_moves(session_id).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.inner.ping().await
    }
}

/// Every call fails as if the database were down. Counts calls so tests
/// can check nothing was retried.
#[derive(Debug, Default)]
pub struct UnavailableStore {
    pub calls: AtomicU32,
}

impl UnavailableStore {
    fn fail<T>(&self) -> Result<T, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "Database unavailable",
        ))
    }
}

#[async_trait]
impl GameStore for UnavailableStore {
    async fn find_open_session(&self, _: u32) -> Result<Option<SessionRecord>, DomainError> {
        self.fail()
    }

    async fn try_claim_slot(&self, _: &SessionId, _: u32, _: u32) -> Result<bool, DomainError> {
        self.fail()
    }

    async fn create_session_if_none_open(
        &self,
        _: &SessionId,
        _: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        self.fail()
    }

    async fn find_session(&self, _: &SessionId) -> Result<Option<SessionRecord>, DomainError> {
        self.fail()
    }

    async fn count_moves(&self, _: &SessionId) -> Result<u32, DomainError> {
        self.fail()
    }

    async fn insert_move(
        &self,
        _: &SessionId,
        _: &ParticipantId,
        _: &Choice,
    ) -> Result<(), DomainError> {
        self.fail()
    }

    async fn list_moves(&self, _: &SessionId) -> Result<Vec<MoveRecord>, DomainError> {
        self.fail()
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.fail()
    }
}

/// Opens a rival session just before the first create, as if another
/// joiner slipped in between this join's search and its write.
#[derive(Debug, Default)]
pub struct PreemptedStore {
    inner: InMemoryStore,
    preempted: AtomicBool,
    pub rival: OnceLock<SessionId>,
}

impl PreemptedStore {
    pub fn session_count(&self) -> usize {
        self.inner.session_count()
    }
}

#[async_trait]
impl GameStore for PreemptedStore {
    async fn find_open_session(
        &self,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        self.inner.find_open_session(capacity).await
    }

    async fn try_claim_slot(
        &self,
        session_id: &SessionId,
        observed: u32,
        capacity: u32,
    ) -> Result<bool, DomainError> {
        self.inner.try_claim_slot(session_id, observed, capacity).await
    }

    async fn create_session_if_none_open(
        &self,
        session_id: &SessionId,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        if !self.preempted.swap(true, Ordering::SeqCst) {
            let rival = SessionId::new();
            self.inner
                .create_session_if_none_open(&rival, capacity)
                .await?;
            let _ = self.rival.set(rival);
        }
        self.inner
            .create_session_if_none_open(session_id, capacity)
            .await
    }

    async fn find_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionRecord>, DomainError> {
        self.inner.find_session(session_id).await
    }

    async fn count_moves(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        self.inner.count_moves(session_id).await
    }

    async fn insert_move(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        choice: &Choice,
    ) -> Result<(), DomainError> {
        self.inner.insert_move(session_id, participant_id, choice).await
    }

    async fn list_moves(&self, session_id: &SessionId) -> Result<Vec<MoveRecord>, DomainError> {
        self.inner.list_moves(session_id).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.inner.ping().await
    }
}
