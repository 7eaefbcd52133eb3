//! Image record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One image inside an album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub slug: String,
    /// Title shown under the image.
    pub title: String,
    /// Original upload file name.
    pub file_name: String,
    #[serde(default)]
    pub caption: String,
    /// Slug of the album the image belongs to.
    pub album_slug: String,
    pub uploaded_at: DateTime<Utc>,
}
