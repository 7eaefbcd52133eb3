//! Scope record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One authorization scope known to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub slug: String,
    /// Scope name, e.g. `albums:read` or `albums:*`.
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Scope {
    /// Columns the scopes table filters across.
    pub const FILTER_KEYS: &'static [&'static str] = &["slug", "name", "description"];
}

impl listing::Row for Scope {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "slug" => Some(self.slug.clone()),
            "name" => Some(self.name.clone()),
            "description" => Some(self.description.clone()),
            "createdAt" => Some(self.created_at.to_rfc3339()),
            _ => None,
        }
    }
}
