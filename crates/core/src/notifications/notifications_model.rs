//! User-visible notification models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How prominent a notification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    /// Whether the display layer should pop the notification up immediately.
    pub display: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Creates an error notification that is displayed immediately.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Error,
            display: true,
            created_at: Utc::now(),
        }
    }
}
