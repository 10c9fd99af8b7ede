//! Store selection and SQLite connection settings, read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

pub const DEFAULT_DB_FILE: &str = "/data/game.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_POOL_MAX: u32 = 8;
const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 5_000;

/// Which backing store the process runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// SQLite database file (WAL journal)
    SqliteFile,
    /// Private in-memory SQLite database, lost on exit
    SqliteMemory,
    /// Process-local store without SQL
    Memory,
}

impl StoreKind {
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("PARLEY_STORE") {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(Self::SqliteFile),
        }
    }

    pub fn is_sql(self) -> bool {
        !matches!(self, Self::Memory)
    }
}

impl FromStr for StoreKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite-file" => Ok(Self::SqliteFile),
            "sqlite-memory" => Ok(Self::SqliteMemory),
            "memory" => Ok(Self::Memory),
            other => Err(AppError::config(format!(
                "PARLEY_STORE must be one of sqlite, sqlite-memory, memory; got '{other}'"
            ))),
        }
    }
}

/// Connection settings for the SQL-backed stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub kind: StoreKind,
    pub sqlite_path: PathBuf,
    pub busy_timeout_ms: u64,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
}

impl DbSettings {
    pub fn new(kind: StoreKind) -> Self {
        Self {
            kind,
            sqlite_path: PathBuf::from(DEFAULT_DB_FILE),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            pool_max: DEFAULT_POOL_MAX,
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }

    pub fn sqlite_file(path: impl Into<PathBuf>) -> Self {
        Self {
            sqlite_path: path.into(),
            ..Self::new(StoreKind::SqliteFile)
        }
    }

    pub fn sqlite_memory() -> Self {
        Self::new(StoreKind::SqliteMemory)
    }

    pub fn from_env() -> Result<Self, AppError> {
        let kind = StoreKind::from_env()?;
        let mut settings = Self::new(kind);

        if let Ok(path) = env::var("GAME_DB_FILE") {
            if path.trim().is_empty() {
                return Err(AppError::config("GAME_DB_FILE must not be empty"));
            }
            settings.sqlite_path = PathBuf::from(path);
        }
        if let Some(v) = parse_var::<u64>("GAME_DB_BUSY_TIMEOUT_MS")? {
            settings.busy_timeout_ms = v;
        }
        if let Some(v) = parse_var::<u32>("GAME_DB_POOL_MAX")? {
            if v == 0 {
                return Err(AppError::config("GAME_DB_POOL_MAX must be at least 1"));
            }
            settings.pool_max = v;
        }
        if let Some(v) = parse_var::<u64>("GAME_DB_ACQUIRE_TIMEOUT_MS")? {
            settings.acquire_timeout_ms = v;
        }

        Ok(settings)
    }
}

/// Parse an optional numeric variable; present but unparsable is an error.
pub(crate) fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has an invalid value: '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}
