//! Album record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One gallery album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// Stable identifier used in the album URL.
    pub slug: String,
    /// Title shown on the gallery page.
    pub title: String,
    /// Blurb under the title.
    #[serde(default)]
    pub description: String,
    /// File name of the cover image, when one is chosen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
}
