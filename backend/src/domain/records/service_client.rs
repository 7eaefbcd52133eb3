//! Service client record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One registered OAuth service client (photo frames, kiosks, bots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceClient {
    pub slug: String,
    /// Name shown on the service clients page.
    pub display_name: String,
    /// OAuth client identifier issued by the gateway.
    pub client_id: Uuid,
    /// Allowed OAuth redirect URIs.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl ServiceClient {
    /// Columns the service clients table filters across.
    pub const FILTER_KEYS: &'static [&'static str] = &["slug", "displayName"];
}

impl listing::Row for ServiceClient {
    fn field(&self, column: &str) -> Option<String> {
        match column {
            "slug" => Some(self.slug.clone()),
            "displayName" => Some(self.display_name.clone()),
            "clientId" => Some(self.client_id.to_string()),
            "enabled" => Some(self.enabled.to_string()),
            _ => None,
        }
    }
}
