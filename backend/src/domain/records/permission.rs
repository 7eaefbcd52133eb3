//! Permission record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One scope grant: a scope name held by a user or service client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub slug: String,
    /// Scope name granted, e.g. `albums:read`.
    pub scope: String,
    /// Slug of the user or service client holding the grant.
    pub subject: String,
    /// Whether the grant is currently active.
    pub enabled: bool,
    pub granted_at: DateTime<Utc>,
}

impl Permission {
    /// Columns the permissions table filters across.
    pub const FILTER_KEYS: &'static [&'static str] = &["slug", "scope", "subject"];
}

impl listing::Row for Permission {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "slug" => Some(self.slug.clone()),
            "scope" => Some(self.scope.clone()),
            "subject" => Some(self.subject.clone()),
            "enabled" => Some(self.enabled.to_string()),
            "grantedAt" => Some(self.granted_at.to_rfc3339()),
            _ => None,
        }
    }
}
