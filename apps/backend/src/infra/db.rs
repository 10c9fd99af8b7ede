//! SQLite connection bootstrap: pool, per-connection pragmas, migrations.

use std::time::Duration;

use migration::migrate_up;
use sea_orm::{DatabaseConnection, SqlxSqliteConnector};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::info;

use crate::config::db::{DbSettings, StoreKind};
use crate::error::AppError;

fn connect_options(settings: &DbSettings) -> Result<SqliteConnectOptions, AppError> {
    let busy_timeout = Duration::from_millis(settings.busy_timeout_ms);

    match settings.kind {
        StoreKind::SqliteFile => {
            if let Some(parent) = settings.sqlite_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::config(format!(
                            "cannot create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
            Ok(SqliteConnectOptions::new()
                .filename(&settings.sqlite_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .foreign_keys(true)
                .busy_timeout(busy_timeout))
        }
        StoreKind::SqliteMemory => Ok(SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true)
            .busy_timeout(busy_timeout)),
        StoreKind::Memory => Err(AppError::config(
            "the memory store does not use a database connection",
        )),
    }
}

/// Build the SQLite pool and hand it to SeaORM. Does NOT run migrations.
pub async fn connect_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let connect_opts = connect_options(settings)?;

    // A private in-memory database lives and dies with its connection, so the
    // pool is pinned to exactly one that never expires.
    let mut pool_opts = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_millis(settings.acquire_timeout_ms));
    pool_opts = match settings.kind {
        StoreKind::SqliteMemory => pool_opts
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None),
        _ => pool_opts.min_connections(1).max_connections(settings.pool_max),
    };

    let pool: SqlitePool = pool_opts
        .connect_with(connect_opts)
        .await
        .map_err(|e| AppError::config(format!("failed to create SQLite connection pool: {e}")))?;

    info!(
        kind = ?settings.kind,
        path = %settings.sqlite_path.display(),
        max = settings.pool_max,
        busy_timeout_ms = settings.busy_timeout_ms,
        "pool=create engine=sqlite"
    );

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Single entrypoint used by startup and tests: connect, then migrate up.
pub async fn bootstrap_db(settings: &DbSettings) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(settings).await?;
    migrate_up(&conn)
        .await
        .map_err(|e| AppError::config(format!("migration failed: {e}")))?;
    Ok(conn)
}
