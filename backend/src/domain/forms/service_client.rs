//! Service client form validation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Validation, chars_within, check_uuid};

/// Minimum allowed length for a service client display name.
pub const CLIENT_NAME_MIN: usize = 3;
/// Maximum allowed length for a service client display name.
pub const CLIENT_NAME_MAX: usize = 64;

/// Service client registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ServiceClientForm {
    /// Name shown on the service clients page.
    pub display_name: String,
    /// OAuth client identifier issued by the gateway.
    pub client_id: String,
    /// Allowed OAuth redirect URIs.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl ServiceClientForm {
    pub fn validate(&self) -> Validation {
        let mut validation = Validation::new();
        validation.check(
            "displayName",
            chars_within(&self.display_name, CLIENT_NAME_MIN, CLIENT_NAME_MAX),
            &format!(
                "display name must be between {CLIENT_NAME_MIN} and {CLIENT_NAME_MAX} characters"
            ),
        );
        validation.check(
            "clientId",
            check_uuid(&self.client_id),
            "client id must be a valid UUID",
        );
        for (index, uri) in self.redirect_uris.iter().enumerate() {
            validation.check(
                &format!("redirectUris[{index}]"),
                is_http_url(uri),
                "redirect uri must be an absolute http(s) URL",
            );
        }
        validation
    }
}

fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|parsed| parsed.scheme() == "http" || parsed.scheme() == "https")
        .unwrap_or(false)
}
