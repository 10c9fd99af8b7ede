//! Enumerated move labels.

use std::fmt;

use crate::errors::domain::{DomainError, ValidationKind};

/// A move label accepted by the configured [`ChoiceSet`].
///
/// Labels are opaque: no ordering or comparison beyond equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Choice(String);

impl Choice {
    /// Wrap a label read back from the store (already validated on insert).
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of valid labels for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    labels: Vec<String>,
}

impl ChoiceSet {
    /// Build a set from labels. Labels are trimmed and blanks dropped;
    /// an empty result or a duplicate label is rejected.
    pub fn new<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if out.iter().any(|l| l == label) {
                return Err(DomainError::validation_other(format!(
                    "duplicate choice label '{label}'"
                )));
            }
            out.push(label.to_string());
        }

        if out.is_empty() {
            return Err(DomainError::validation_other(
                "at least one choice label is required",
            ));
        }

        Ok(Self { labels: out })
    }

    /// Parse a comma separated list, e.g. `Cooperate,Defect`.
    pub fn parse_list(raw: &str) -> Result<Self, DomainError> {
        Self::new(raw.split(','))
    }

    /// Exact, case-sensitive match against the configured labels.
    pub fn validate(&self, raw: &str) -> Result<Choice, DomainError> {
        if self.labels.iter().any(|l| l == raw) {
            Ok(Choice(raw.to_string()))
        } else {
            Err(DomainError::validation(
                ValidationKind::InvalidChoice,
                format!(
                    "'{raw}' is not a valid choice; expected one of: {}",
                    self.labels.join(", ")
                ),
            ))
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for ChoiceSet {
    fn default() -> Self {
        Self {
            labels: vec!["Cooperate".to_string(), "Defect".to_string()],
        }
    }
}
