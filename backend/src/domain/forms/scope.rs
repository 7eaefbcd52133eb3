//! Scope form validation.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validation, chars_at_most, chars_within};

/// Minimum allowed length for a scope name.
pub const SCOPE_NAME_MIN: usize = 3;
/// Maximum allowed length for a scope name.
pub const SCOPE_NAME_MAX: usize = 64;
/// Maximum allowed length for a scope description.
pub const SCOPE_DESCRIPTION_MAX: usize = 160;

static SCOPE_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn scope_name_regex() -> &'static Regex {
    SCOPE_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this constrains the character set.
        Regex::new(r"^[a-z:*]+$").expect("scope name pattern is valid")
    })
}

/// Scope admin form as submitted by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ScopeForm {
    /// Scope name, e.g. `albums:read` or `albums:*`.
    pub name: String,
    /// Short human description shown in the admin table.
    #[serde(default)]
    pub description: String,
}

impl ScopeForm {
    /// Check every field, collecting one message per failed predicate.
    pub fn validate(&self) -> Validation {
        let mut validation = Validation::new();
        validation.check(
            "name",
            chars_within(&self.name, SCOPE_NAME_MIN, SCOPE_NAME_MAX),
            &format!(
                "scope name must be between {SCOPE_NAME_MIN} and {SCOPE_NAME_MAX} characters"
            ),
        );
        validation.check(
            "name",
            scope_name_regex().is_match(&self.name),
            "scope name may only contain lowercase letters, ':', and '*'",
        );
        validation.check(
            "description",
            chars_at_most(&self.description, SCOPE_DESCRIPTION_MAX),
            &format!("description must be at most {SCOPE_DESCRIPTION_MAX} characters"),
        );
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn form(name: &str) -> ScopeForm {
        ScopeForm {
            name: name.to_owned(),
            description: "read access to albums".to_owned(),
        }
    }

    #[rstest]
    #[case("albums:read")]
    #[case("albums:*")]
    #[case("***")]
    #[case("tasks:assign:self")]
    fn accepts_scope_names_in_charset_and_bounds(#[case] name: &str) {
        assert!(form(name).validate().is_valid());
    }

    #[rstest]
    #[case("ab")]
    #[case("Albums:read")]
    #[case("albums read")]
    #[case("albums-read")]
    #[case("")]
    fn rejects_names_outside_charset_or_bounds(#[case] name: &str) {
        let validation = form(name).validate();
        assert!(!validation.is_valid());
        assert!(!validation.messages().is_empty());
    }

    #[test]
    fn rejects_over_long_names_with_a_descriptive_message() {
        let validation = form(&"a".repeat(SCOPE_NAME_MAX + 1)).validate();
        let fields = validation.into_field_errors();
        assert!(fields.for_field("name")[0].contains("between 3 and 64"));
    }

    #[test]
    fn rejects_over_long_description() {
        let scope = ScopeForm {
            name: "albums:read".to_owned(),
            description: "d".repeat(SCOPE_DESCRIPTION_MAX + 1),
        };
        assert!(!scope.validate().is_valid());
    }
}
