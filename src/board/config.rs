//! Configuration for the board store and its replication worker.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Store configuration.
///
/// # Examples
///
/// ```
/// use kanban_store::board::config::BoardConfig;
///
/// let config = BoardConfig::default();
/// assert_eq!(config.default_columns, ["To Do", "In Progress", "Done"]);
/// assert_eq!(config.column_target_prefix, "column-");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Names of the columns every new project starts with, left to right.
    pub default_columns: Vec<String>,
    /// Prefix marking a drag target identity as a column.
    pub column_target_prefix: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_columns: vec!["To Do".to_owned(), "In Progress".to_owned(), "Done".to_owned()],
            column_target_prefix: "column-".to_owned(),
        }
    }
}

impl BoardConfig {
    /// Replaces the default column names.
    #[must_use]
    pub fn with_default_columns(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.default_columns = names.into_iter().collect();
        self
    }

    /// Replaces the column drag target prefix.
    #[must_use]
    pub fn with_column_target_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_target_prefix = prefix.into();
        self
    }
}

/// Retry policy for replicating snapshots to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicationConfig {
    /// Total save attempts per snapshot, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled after every failed retry.
    pub initial_backoff: Duration,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

impl ReplicationConfig {
    /// Creates a policy that retries immediately.
    ///
    /// Useful for tests.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
        }
    }

    /// Returns the delay to wait after the given failed attempt (1-based).
    #[must_use]
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(2_u32.saturating_pow(exponent))
    }
}
