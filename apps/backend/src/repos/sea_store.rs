//! `GameStore` over SeaORM. Every method is one autocommit statement.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::adapters::moves_sea::{self as moves_adapter, MoveCreate};
use crate::adapters::sessions_sea::{self as sessions_adapter, SessionCreate, SlotClaim};
use crate::domain::choice::Choice;
use crate::domain::ids::{ParticipantId, SessionId};
use crate::domain::session::{MoveRecord, SessionRecord};
use crate::entities::{moves, sessions};
use crate::errors::domain::DomainError;
use crate::repos::{sql_count, stored_count, GameStore};

#[derive(Debug, Clone)]
pub struct SeaStore {
    conn: DatabaseConnection,
}

impl SeaStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

impl TryFrom<sessions::Model> for SessionRecord {
    type Error = DomainError;

    fn try_from(model: sessions::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            occupancy: stored_count(model.player_count, "player_count")?,
            id: SessionId::from_stored(model.id),
        })
    }
}

impl From<moves::Model> for MoveRecord {
    fn from(model: moves::Model) -> Self {
        Self {
            participant_id: ParticipantId::from_stored(model.player_id),
            choice: Choice::from_stored(model.choice),
        }
    }
}

#[async_trait]
impl GameStore for SeaStore {
    async fn find_open_session(
        &self,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let capacity = sql_count(capacity, "capacity")?;
        sessions_adapter::find_open(&self.conn, capacity)
            .await?
            .map(SessionRecord::try_from)
            .transpose()
    }

    async fn try_claim_slot(
        &self,
        session_id: &SessionId,
        observed: u32,
        capacity: u32,
    ) -> Result<bool, DomainError> {
        let claim = SlotClaim {
            id: session_id.as_str().to_owned(),
            observed_count: sql_count(observed, "observed occupancy")?,
            capacity: sql_count(capacity, "capacity")?,
        };
        Ok(sessions_adapter::claim_slot(&self.conn, claim).await?)
    }

    async fn create_session_if_none_open(
        &self,
        session_id: &SessionId,
        capacity: u32,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let dto = SessionCreate::opened_by_creator(
            session_id.as_str(),
            sql_count(capacity, "capacity")?,
        );
        let occupancy = stored_count(dto.player_count, "player_count")?;
        if !sessions_adapter::create_if_none_open(&self.conn, dto).await? {
            return Ok(None);
        }
        Ok(Some(SessionRecord {
            id: session_id.clone(),
            occupancy,
        }))
    }

    async fn find_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<SessionRecord>, DomainError> {
        sessions_adapter::find_by_id(&self.conn, session_id.as_str())
            .await?
            .map(SessionRecord::try_from)
            .transpose()
    }

    async fn count_moves(&self, session_id: &SessionId) -> Result<u32, DomainError> {
        let count = moves_adapter::count_by_session(&self.conn, session_id.as_str()).await?;
        stored_count(count, "move count")
    }

    async fn insert_move(
        &self,
        session_id: &SessionId,
        participant_id: &ParticipantId,
        choice: &Choice,
    ) -> Result<(), DomainError> {
        let dto = MoveCreate::new(
            session_id.as_str(),
            participant_id.as_str(),
            choice.as_str(),
        );
        moves_adapter::create_move(&self.conn, dto).await?;
        Ok(())
    }

    async fn list_moves(&self, session_id: &SessionId) -> Result<Vec<MoveRecord>, DomainError> {
        let rows = moves_adapter::find_all_by_session(&self.conn, session_id.as_str()).await?;
        Ok(rows.into_iter().map(MoveRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(self.conn.ping().await?)
    }
}
