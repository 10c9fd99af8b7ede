//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; this is the one place that turns those
//! into `DomainError`. Higher layers map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::trace_ctx;

const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// Extract the column list from SQLite "UNIQUE constraint failed: t.a, t.b".
fn extract_sqlite_unique_columns(error_msg: &str) -> Option<&str> {
    let start = error_msg.find(SQLITE_UNIQUE_PREFIX)? + SQLITE_UNIQUE_PREFIX.len();
    let rest = &error_msg[start..];
    let end = rest.find(['\n', '"', ')']).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Map the violated unique key to a domain conflict.
fn map_unique_columns_to_conflict(columns: &str) -> Option<(ConflictKind, &'static str)> {
    match columns {
        "moves.session_id, moves.player_id" => Some((
            ConflictKind::DuplicateMove,
            "A move has already been recorded for this player",
        )),
        "sessions.id" => Some((
            ConflictKind::SessionIdCollision,
            "Session id already exists",
        )),
        _ => None,
    }
}

/// Index names show up instead of columns on some drivers.
fn map_index_name_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_moves_session_player") {
        return Some((
            ConflictKind::DuplicateMove,
            "A move has already been recorded for this player",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), msg.clone());
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if error_msg.contains("UNIQUE constraint failed")
        || error_msg.contains("duplicate key value violates unique constraint")
    {
        if let Some(columns) = extract_sqlite_unique_columns(&error_msg) {
            if let Some((kind, detail)) = map_unique_columns_to_conflict(columns) {
                return DomainError::conflict(kind, detail);
            }
        }
        if let Some((kind, detail)) = map_index_name_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        warn!(trace_id = %trace_id, raw_error = %error_msg, "Unmapped unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Check constraint violation");
        return DomainError::validation_other("Check constraint violation");
    }

    if error_msg.contains("database is locked") || error_msg.contains("database is busy") {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database busy");
        return DomainError::infra(InfraErrorKind::Timeout, "Database busy, retry later");
    }

    if error_msg.contains("timed out") || error_msg.contains("timeout") || error_msg.contains("pool")
    {
        warn!(trace_id = %trace_id, raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    if let sea_orm::DbErr::Type(_) | sea_orm::DbErr::Json(_) = &e {
        error!(trace_id = %trace_id, raw_error = %error_msg, "Stored data could not be decoded");
        return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is corrupt");
    }

    error!(trace_id = %trace_id, raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
