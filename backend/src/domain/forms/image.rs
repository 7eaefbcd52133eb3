//! Image form validation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validation, chars_at_most};
use crate::domain::slug::is_valid_slug;

/// Maximum allowed length for an image title.
pub const IMAGE_TITLE_MAX: usize = 96;
/// Maximum allowed length for an image caption.
pub const IMAGE_CAPTION_MAX: usize = 512;

static FILE_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn file_name_regex() -> &'static Regex {
    FILE_NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._-]+\.(?i:jpg|jpeg|png|gif|webp)$")
            .expect("file name pattern is valid")
    })
}

/// Image upload form as submitted by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ImageForm {
    /// Title shown under the image.
    pub title: String,
    /// Original file name; must carry a recognised extension.
    pub file_name: String,
    /// Optional caption.
    #[serde(default)]
    pub caption: String,
    /// Album the image belongs to.
    pub album_slug: String,
}

impl ImageForm {
    pub fn validate(&self) -> Validation {
        let mut validation = Validation::new();
        validation.check(
            "title",
            chars_at_most(&self.title, IMAGE_TITLE_MAX),
            &format!("title must be at most {IMAGE_TITLE_MAX} characters"),
        );
        validation.check(
            "fileName",
            file_name_regex().is_match(&self.file_name),
            "file name must end in .jpg, .jpeg, .png, .gif, or .webp",
        );
        validation.check(
            "caption",
            chars_at_most(&self.caption, IMAGE_CAPTION_MAX),
            &format!("caption must be at most {IMAGE_CAPTION_MAX} characters"),
        );
        validation.check(
            "albumSlug",
            is_valid_slug(&self.album_slug),
            "album slug may only contain lowercase letters, digits, and hyphens",
        );
        validation
    }
}
