//! Album form validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validation, chars_at_most, chars_within};
use crate::domain::slug::is_valid_slug;

/// Maximum allowed length for an album title.
pub const ALBUM_TITLE_MAX: usize = 96;
/// Maximum allowed length for an album description.
pub const ALBUM_DESCRIPTION_MAX: usize = 512;

/// Album admin form as submitted by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct AlbumForm {
    /// Title shown on the gallery page.
    pub title: String,
    /// Slug used in the album URL.
    pub slug: String,
    /// Optional blurb under the title.
    #[serde(default)]
    pub description: String,
}

impl AlbumForm {
    pub fn validate(&self) -> Validation {
        let mut validation = Validation::new();
        validation.check(
            "title",
            chars_within(&self.title, 1, ALBUM_TITLE_MAX),
            &format!("title must be between 1 and {ALBUM_TITLE_MAX} characters"),
        );
        validation.check(
            "slug",
            is_valid_slug(&self.slug),
            "slug may only contain lowercase letters, digits, and hyphens",
        );
        validation.check(
            "description",
            chars_at_most(&self.description, ALBUM_DESCRIPTION_MAX),
            &format!("description must be at most {ALBUM_DESCRIPTION_MAX} characters"),
        );
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_a_complete_album() {
        let form = AlbumForm {
            title: "Summer fete 2024".to_owned(),
            slug: "summer-fete-2024".to_owned(),
            description: "Games on the lawn.".to_owned(),
        };
        assert!(form.validate().is_valid());
    }

    #[rstest]
    #[case("", "summer", 1)]
    #[case("Summer", "Summer Fete", 1)]
    #[case("", "", 2)]
    fn rejects_bad_fields(#[case] title: &str, #[case] slug: &str, #[case] failures: usize) {
        let form = AlbumForm {
            title: title.to_owned(),
            slug: slug.to_owned(),
            description: String::new(),
        };
        assert_eq!(form.validate().messages().len(), failures);
    }
}
