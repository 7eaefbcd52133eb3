//! Wire payloads exchanged with the gateway.

use serde::{Deserialize, Serialize};

use crate::domain::forms::FieldErrors;
use crate::domain::ports::LoginSession;
use crate::domain::{Identity, LoginCredentials, OauthParams, SessionId};

use super::client::GatewayError;

/// Body for `POST /login` on the gateway.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginRequestDto<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<&'a str>,
}

impl<'a> LoginRequestDto<'a> {
    pub fn new(credentials: &'a LoginCredentials, oauth: &'a OauthParams) -> Self {
        Self {
            username: credentials.username(),
            password: credentials.password(),
            client_id: oauth.client_id(),
            redirect_uri: oauth.redirect_uri(),
            state: oauth.state(),
        }
    }
}

/// Body of a successful gateway login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginResponseDto {
    pub session_id: String,
    pub identity: Identity,
}

impl LoginResponseDto {
    pub fn into_login_session(self) -> Result<LoginSession, GatewayError> {
        let session = SessionId::new(&self.session_id).map_err(|err| {
            GatewayError::decode(format!("gateway returned an invalid session id: {err}"))
        })?;
        Ok(LoginSession {
            session,
            identity: self.identity,
        })
    }
}

/// Body of `GET /session/csrf/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CsrfResponseDto {
    pub token: String,
}

/// Error body the gateway attaches to non-2xx responses.
///
/// Both parts are optional; older gateway builds send plain text.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub fields: Option<FieldErrors>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_skips_absent_oauth_parts() {
        let credentials =
            LoginCredentials::try_from_parts("marta", "orchard-gate").expect("credentials");
        let oauth = OauthParams::default();
        let value =
            serde_json::to_value(LoginRequestDto::new(&credentials, &oauth)).expect("serialise");
        assert_eq!(value["username"], "marta");
        assert!(value.get("clientId").is_none());
        assert!(value.get("redirectUri").is_none());
    }

    #[test]
    fn login_response_validates_the_session_id() {
        let dto: LoginResponseDto = serde_json::from_str(
            r#"{
                "sessionId": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
                "identity": { "slug": "marta", "displayName": "Marta" }
            }"#,
        )
        .expect("login JSON");
        let session = dto.into_login_session().expect("session");
        assert_eq!(session.identity.slug, "marta");

        let bad: LoginResponseDto = serde_json::from_str(
            r#"{ "sessionId": "nope", "identity": { "slug": "m", "displayName": "M" } }"#,
        )
        .expect("shape parses");
        assert!(bad.into_login_session().is_err());
    }

    #[test]
    fn error_body_tolerates_missing_parts() {
        let body: ErrorBodyDto = serde_json::from_str("{}").expect("empty body");
        assert!(body.message.is_none());
        assert!(body.fields.is_none());

        let body: ErrorBodyDto = serde_json::from_str(
            r#"{ "message": "no", "fields": { "name": ["taken"] } }"#,
        )
        .expect("full body");
        assert_eq!(body.message.as_deref(), Some("no"));
        assert_eq!(
            body.fields.expect("fields").for_field("name"),
            ["taken".to_owned()]
        );
    }
}
