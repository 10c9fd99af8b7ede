//! Game rules read once at startup.

use std::env;

use crate::config::db::parse_var;
use crate::domain::choice::ChoiceSet;
use crate::error::AppError;

pub const DEFAULT_CAPACITY: u32 = 2;
pub const DEFAULT_APP_TITLE: &str = "Two-Player Game API";

/// Immutable game settings shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Participants per session (`MAX_PLAYERS`).
    pub capacity: u32,
    /// Valid move labels (`CHOICES`).
    pub choices: ChoiceSet,
    /// Reported by the health endpoint (`APP_TITLE`).
    pub app_title: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            choices: ChoiceSet::default(),
            app_title: DEFAULT_APP_TITLE.to_string(),
        }
    }
}

impl GameConfig {
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_choices(mut self, choices: ChoiceSet) -> Self {
        self.choices = choices;
        self
    }

    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(capacity) = parse_var::<u32>("MAX_PLAYERS")? {
            if capacity == 0 {
                return Err(AppError::config("MAX_PLAYERS must be at least 1"));
            }
            config.capacity = capacity;
        }

        if let Ok(raw) = env::var("CHOICES") {
            config.choices = ChoiceSet::parse_list(&raw)
                .map_err(|e| AppError::config(format!("CHOICES is invalid: {e}")))?;
        }

        if let Ok(title) = env::var("APP_TITLE") {
            if !title.trim().is_empty() {
                config.app_title = title;
            }
        }

        Ok(config)
    }
}
