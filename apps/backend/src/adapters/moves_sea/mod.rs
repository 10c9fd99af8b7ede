//! SeaORM adapter for the moves table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::moves;

pub mod dto;

pub use dto::MoveCreate;

/// Insert a move. A second move for the same (session, player) fails on
/// `ux_moves_session_player`.
pub async fn create_move<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MoveCreate,
) -> Result<moves::Model, sea_orm::DbErr> {
    let move_active = moves::ActiveModel {
        id: NotSet,
        session_id: Set(dto.session_id),
        player_id: Set(dto.player_id),
        choice: Set(dto.choice),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    move_active.insert(conn).await
}

pub async fn count_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    moves::Entity::find()
        .filter(moves::Column::SessionId.eq(session_id))
        .count(conn)
        .await
}

/// All moves for a session in insertion order.
pub async fn find_all_by_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: &str,
) -> Result<Vec<moves::Model>, sea_orm::DbErr> {
    moves::Entity::find()
        .filter(moves::Column::SessionId.eq(session_id))
        .order_by_asc(moves::Column::Id)
        .all(conn)
        .await
}
