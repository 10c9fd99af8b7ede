//! SeaORM adapter for the sessions table - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, EntityTrait, QueryFilter, QueryOrder, Statement,
    Value,
};

use crate::entities::sessions;

pub mod dto;

pub use dto::{SessionCreate, SlotClaim};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: &str,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find_by_id(session_id.to_owned())
        .one(conn)
        .await
}

/// Best candidate with a free slot: fullest first, then oldest.
pub async fn find_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    capacity: i32,
) -> Result<Option<sessions::Model>, sea_orm::DbErr> {
    sessions::Entity::find()
        .filter(sessions::Column::PlayerCount.lt(capacity))
        .order_by_desc(sessions::Column::PlayerCount)
        .order_by_asc(sessions::Column::CreatedAt)
        .one(conn)
        .await
}

/// Conditional increment of `player_count`.
///
/// Returns `true` when exactly one row was updated. `false` means another
/// writer moved the counter (or the row is full) since it was observed.
pub async fn claim_slot<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    claim: SlotClaim,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = sessions::Entity::update_many()
        .col_expr(
            sessions::Column::PlayerCount,
            Expr::col(sessions::Column::PlayerCount).add(1),
        )
        .col_expr(sessions::Column::UpdatedAt, Expr::val(now).into())
        .filter(sessions::Column::Id.eq(claim.id))
        .filter(sessions::Column::PlayerCount.eq(claim.observed_count))
        .filter(sessions::Column::PlayerCount.lt(claim.capacity))
        .exec(conn)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Insert a session row, but only while no session below `capacity` exists.
///
/// The existence check and the insert are one statement, so two callers that
/// both saw no open session cannot both open one. Returns `false` when an
/// open session appeared first; the caller should search again.
pub async fn create_if_none_open<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SessionCreate,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let values: [Value; 5] = [
        dto.id.into(),
        dto.player_count.into(),
        now.into(),
        now.into(),
        dto.capacity.into(),
    ];
    let stmt = Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sessions (id, player_count, created_at, updated_at) \
         SELECT ?, ?, ?, ? \
         WHERE NOT EXISTS (SELECT 1 FROM sessions WHERE player_count < ?)",
        values,
    );

    let result = conn.execute(stmt).await?;
    Ok(result.rows_affected() == 1)
}
