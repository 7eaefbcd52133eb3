//! Permission form validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::scope::ScopeForm;
use super::Validation;
use crate::domain::slug::is_valid_slug;

/// Permission grant form: a scope string granted to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct PermissionForm {
    /// Scope name being granted, e.g. `albums:read`.
    pub scope: String,
    /// Slug of the user or service client receiving the grant.
    pub subject: String,
}

impl PermissionForm {
    pub fn validate(&self) -> Validation {
        // Reuse the scope name rules; a grant's scope field follows them.
        let scope_check = ScopeForm {
            name: self.scope.clone(),
            description: String::new(),
        }
        .validate();

        let mut validation = Validation::new();
        validation.check(
            "scope",
            scope_check.is_valid(),
            "scope must be a valid scope name",
        );
        validation.check(
            "subject",
            is_valid_slug(&self.subject),
            "subject must be a user or service client slug",
        );
        validation
    }
}
