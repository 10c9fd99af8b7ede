use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Sessions {
    Table,
    Id,
    PlayerCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Moves {
    Table,
    Id,
    SessionId,
    PlayerId,
    Choice,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // sessions - one row per fixed-capacity group
        manager
            .create_table(
                Table::create()
                    .table(Sessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Sessions::PlayerCount)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(Sessions::PlayerCount).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Sessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Sessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Candidate search filters and orders on player_count
        manager
            .create_index(
                Index::create()
                    .name("ix_sessions_player_count")
                    .table(Sessions::Table)
                    .col(Sessions::PlayerCount)
                    .to_owned(),
            )
            .await?;

        // moves - one row per accepted submission; id gives insertion order
        manager
            .create_table(
                Table::create()
                    .table(Moves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moves::Id)
                            .integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Moves::SessionId).string().not_null())
                    .col(ColumnDef::new(Moves::PlayerId).string().not_null())
                    .col(ColumnDef::new(Moves::Choice).string().not_null())
                    .col(
                        ColumnDef::new(Moves::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_session_id")
                            .from(Moves::Table, Moves::SessionId)
                            .to(Sessions::Table, Sessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_moves_session_id")
                    .table(Moves::Table)
                    .col(Moves::SessionId)
                    .to_owned(),
            )
            .await?;

        // The authoritative duplicate-move guard
        manager
            .create_index(
                Index::create()
                    .name("ux_moves_session_player")
                    .table(Moves::Table)
                    .col(Moves::SessionId)
                    .col(Moves::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ux_moves_session_player")
                    .table(Moves::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_moves_session_id")
                    .table(Moves::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Moves::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_sessions_player_count")
                    .table(Sessions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Sessions::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
