//! Task template record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One recurring household task template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskTemplate {
    pub slug: String,
    /// Title shown on the tasks page.
    pub title: String,
    #[serde(default)]
    pub notes: String,
    /// Human-readable cadence, e.g. `weekly` or `first-of-month`.
    pub cadence: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl TaskTemplate {
    /// Columns the task templates table filters across.
    pub const FILTER_KEYS: &'static [&'static str] = &["slug", "title", "cadence"];
}

impl listing::Row for TaskTemplate {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "slug" => Some(self.slug.clone()),
            "title" => Some(self.title.clone()),
            "notes" => Some(self.notes.clone()),
            "cadence" => Some(self.cadence.clone()),
            "enabled" => Some(self.enabled.to_string()),
            _ => None,
        }
    }
}
