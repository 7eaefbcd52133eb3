//! User record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One family member account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub slug: String,
    /// Name shown across the site.
    pub display_name: String,
    pub email: String,
    /// Whether the account can sign in.
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Columns the users table filters across.
    pub const FILTER_KEYS: &'static [&'static str] = &["slug", "displayName", "email"];
}

impl listing::Row for User {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "slug" => Some(self.slug.clone()),
            "displayName" => Some(self.display_name.clone()),
            "email" => Some(self.email.clone()),
            "enabled" => Some(self.enabled.to_string()),
            "createdAt" => Some(self.created_at.to_rfc3339()),
            _ => None,
        }
    }
}
