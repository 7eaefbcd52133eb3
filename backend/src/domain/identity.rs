//! Session and identity values carried by the three site cookies.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors for session and identity values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// Session id was missing or blank once trimmed.
    EmptySessionId,
    /// Session id was not a UUID.
    InvalidSessionId,
    /// CSRF token was blank.
    EmptyCsrfToken,
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySessionId => write!(f, "session id must not be empty"),
            Self::InvalidSessionId => write!(f, "session id must be a valid UUID"),
            Self::EmptyCsrfToken => write!(f, "csrf token must not be empty"),
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Gateway-issued session correlation token, stored in the `session_id`
/// cookie. Always a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(Uuid, String);

impl SessionId {
    /// Validate and construct a session id from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, IdentityValidationError> {
        if id.trim().is_empty() {
            return Err(IdentityValidationError::EmptySessionId);
        }
        let parsed =
            Uuid::parse_str(&id).map_err(|_| IdentityValidationError::InvalidSessionId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<SessionId> for String {
    fn from(value: SessionId) -> Self {
        let SessionId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for SessionId {
    type Error = IdentityValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Per-session anti-forgery token issued by the gateway and attached to
/// state-changing relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Wrap a gateway-issued token, rejecting blank values.
    pub fn new(token: impl Into<String>) -> Result<Self, IdentityValidationError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(IdentityValidationError::EmptyCsrfToken);
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Display profile and UI permission hints cached in the client-readable
/// `identity` cookie.
///
/// The cookie must be valid JSON with exactly this shape; anything else
/// is treated as "no identity". These hints gate rendering only — the
/// gateway re-checks authorization on every relayed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Identity {
    /// Stable identifier of the signed-in user.
    pub slug: String,
    /// Name shown in the site header.
    pub display_name: String,
    /// UI permission hints, e.g. `albums:edit`.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Identity {
    /// Parse the identity cookie payload.
    pub fn from_cookie_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serialise for the cookie value.
    ///
    /// Serialisation of this shape cannot fail; the fallback keeps the
    /// call site infallible without panicking machinery.
    pub fn to_cookie_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Whether the identity carries a UI hint.
    pub fn has_permission(&self, hint: &str) -> bool {
        self.permissions.iter().any(|candidate| candidate == hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", true)]
    #[case("not-a-uuid", false)]
    #[case("", false)]
    #[case("  ", false)]
    fn session_id_accepts_only_uuids(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(SessionId::new(raw).is_ok(), ok);
    }

    #[test]
    fn identity_round_trips_through_cookie_json() {
        let identity = Identity {
            slug: "marta".to_owned(),
            display_name: "Marta".to_owned(),
            permissions: vec!["albums:edit".to_owned()],
        };
        let parsed = Identity::from_cookie_json(&identity.to_cookie_json()).expect("round trip");
        assert_eq!(parsed, identity);
        assert!(parsed.has_permission("albums:edit"));
        assert!(!parsed.has_permission("scopes:admin"));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"slug":"m"}"#)]
    #[case(r#"{"slug":"m","displayName":"M","unexpected":1}"#)]
    fn identity_rejects_unexpected_shapes(#[case] raw: &str) {
        assert!(Identity::from_cookie_json(raw).is_err());
    }

    #[test]
    fn csrf_token_rejects_blank_values() {
        assert!(CsrfToken::new("  ").is_err());
        assert_eq!(CsrfToken::new("tok-1").expect("token").as_str(), "tok-1");
    }
}
