//! HTTP client for the gateway and its error mapping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error as ThisError;

use super::dto::{CsrfResponseDto, ErrorBodyDto, LoginRequestDto, LoginResponseDto};
use crate::domain::forms::{
    AlbumForm, FieldErrors, ImageForm, PermissionForm, ScopeForm, ServiceClientForm,
};
use crate::domain::ports::{AdminRelay, DirectoryQuery, LoginSession, SessionGateway};
use crate::domain::records::{Album, Image, Permission, Scope, ServiceClient, TaskTemplate, User};
use crate::domain::{
    CsrfToken, Error, ErrorCode, LoginCredentials, OauthParams, SessionId, Slug,
};

/// Default transport timeout for gateway calls.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

/// Cookie name carrying the session correlation token.
const SESSION_COOKIE: &str = "session_id";
/// Header carrying the anti-forgery token on state-changing relays.
const CSRF_HEADER: &str = "x-csrf-token";

/// Transport-level failures from the gateway adapter.
///
/// Mapped into the domain [`Error`] at the port boundary; handlers never
/// see this type.
#[derive(Debug, ThisError)]
pub enum GatewayError {
    /// The gateway answered with a non-2xx status.
    #[error("gateway returned status {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
        fields: Option<FieldErrors>,
    },
    /// The connection failed before a status arrived.
    #[error("gateway transport failure: {message}")]
    Transport { message: String },
    /// The transport timeout elapsed.
    #[error("gateway request timed out: {message}")]
    Timeout { message: String },
    /// The response body was not the expected JSON.
    #[error("gateway payload could not be decoded: {message}")]
    Decode { message: String },
}

impl GatewayError {
    pub(super) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Map a gateway status onto the stable error code catalogue.
///
/// The eight statuses the frontend distinguishes keep their identity;
/// anything else is a generic failure.
fn error_code_for_status(status: StatusCode) -> ErrorCode {
    match status {
        StatusCode::BAD_REQUEST => ErrorCode::InvalidRequest,
        StatusCode::UNAUTHORIZED => ErrorCode::Unauthorized,
        StatusCode::FORBIDDEN => ErrorCode::Forbidden,
        StatusCode::NOT_FOUND => ErrorCode::NotFound,
        StatusCode::METHOD_NOT_ALLOWED => ErrorCode::MethodNotAllowed,
        StatusCode::GONE => ErrorCode::Gone,
        StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::UnprocessableEntity,
        StatusCode::SERVICE_UNAVAILABLE => ErrorCode::ServiceUnavailable,
        _ => ErrorCode::InternalError,
    }
}

impl From<GatewayError> for Error {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Status {
                status,
                message,
                fields,
            } => {
                let error = Error::new(error_code_for_status(status), message);
                match fields {
                    Some(fields) => error.with_detail_entry("fields", json!(fields)),
                    None => error,
                }
            }
            GatewayError::Transport { message }
            | GatewayError::Timeout { message }
            | GatewayError::Decode { message } => Error::internal(message),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout {
            message: error.to_string(),
        }
    } else {
        GatewayError::Transport {
            message: error.to_string(),
        }
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GatewayError {
    let parsed: ErrorBodyDto = serde_json::from_slice(body).unwrap_or_default();
    let message = parsed.message.unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {preview}", status.as_u16())
        }
    });
    GatewayError::Status {
        status,
        message,
        fields: parsed.fields,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

/// Gateway adapter performing one HTTPS request per port call.
pub struct GatewayHttpClient {
    client: Client,
    base: Url,
}

impl GatewayHttpClient {
    /// Build an adapter with the default transport timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base, DEFAULT_GATEWAY_TIMEOUT)
    }

    /// Build an adapter with an explicit transport timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base.join(path).map_err(|err| GatewayError::Transport {
            message: format!("invalid gateway endpoint {path}: {err}"),
        })
    }

    fn session_cookie(session: &SessionId) -> String {
        format!("{SESSION_COOKIE}={session}")
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref())
            .map_err(|err| GatewayError::decode(format!("invalid gateway JSON payload: {err}")))
    }

    async fn read_empty(response: reqwest::Response) -> Result<(), GatewayError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(())
    }

    /// Authenticated GET returning a typed JSON payload.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionId,
    ) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .header(header::ACCEPT, "application/json")
            .header(header::COOKIE, Self::session_cookie(session))
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response).await
    }

    /// Authenticated POST with a CSRF token, returning the created record.
    async fn relay_create<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        session: &SessionId,
        csrf: &CsrfToken,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .header(header::ACCEPT, "application/json")
            .header(header::COOKIE, Self::session_cookie(session))
            .header(CSRF_HEADER, csrf.as_str())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::read_json(response).await
    }
}

#[async_trait]
impl SessionGateway for GatewayHttpClient {
    async fn login(
        &self,
        credentials: &LoginCredentials,
        oauth: &OauthParams,
    ) -> Result<LoginSession, Error> {
        let response = self
            .client
            .post(self.endpoint("login")?)
            .header(header::ACCEPT, "application/json")
            .json(&LoginRequestDto::new(credentials, oauth))
            .send()
            .await
            .map_err(map_transport_error)?;
        let dto: LoginResponseDto = Self::read_json(response).await?;
        Ok(dto.into_login_session()?)
    }

    async fn logout(&self, session: &SessionId) -> Result<(), Error> {
        let response = self
            .client
            .post(self.endpoint("logout")?)
            .header(header::COOKIE, Self::session_cookie(session))
            .send()
            .await
            .map_err(map_transport_error)?;
        Ok(Self::read_empty(response).await?)
    }

    async fn csrf(&self, session: &SessionId) -> Result<CsrfToken, Error> {
        let path = format!("session/csrf/{session}");
        let dto: CsrfResponseDto = self.fetch(&path, session).await?;
        CsrfToken::new(dto.token)
            .map_err(|err| Error::internal(format!("gateway issued an unusable token: {err}")))
    }
}

#[async_trait]
impl DirectoryQuery for GatewayHttpClient {
    async fn permissions(&self, session: &SessionId) -> Result<Vec<Permission>, Error> {
        Ok(self.fetch("permissions", session).await?)
    }

    async fn scopes(&self, session: &SessionId) -> Result<Vec<Scope>, Error> {
        Ok(self.fetch("scopes", session).await?)
    }

    async fn users(&self, session: &SessionId) -> Result<Vec<User>, Error> {
        Ok(self.fetch("users", session).await?)
    }

    async fn task_templates(&self, session: &SessionId) -> Result<Vec<TaskTemplate>, Error> {
        Ok(self.fetch("task-templates", session).await?)
    }

    async fn albums(&self, session: &SessionId) -> Result<Vec<Album>, Error> {
        Ok(self.fetch("albums", session).await?)
    }

    async fn service_clients(&self, session: &SessionId) -> Result<Vec<ServiceClient>, Error> {
        Ok(self.fetch("service-clients", session).await?)
    }

    async fn album_images(&self, session: &SessionId, album: &Slug) -> Result<Vec<Image>, Error> {
        let path = format!("albums/{album}/images");
        Ok(self.fetch(&path, session).await?)
    }
}

#[async_trait]
impl AdminRelay for GatewayHttpClient {
    async fn create_scope(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &ScopeForm,
    ) -> Result<Scope, Error> {
        Ok(self.relay_create("scopes", session, csrf, form).await?)
    }

    async fn create_permission(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &PermissionForm,
    ) -> Result<Permission, Error> {
        Ok(self.relay_create("permissions", session, csrf, form).await?)
    }

    async fn create_service_client(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &ServiceClientForm,
    ) -> Result<ServiceClient, Error> {
        Ok(self
            .relay_create("service-clients", session, csrf, form)
            .await?)
    }

    async fn create_album(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &AlbumForm,
    ) -> Result<Album, Error> {
        Ok(self.relay_create("albums", session, csrf, form).await?)
    }

    async fn create_image(
        &self,
        session: &SessionId,
        csrf: &CsrfToken,
        form: &ImageForm,
    ) -> Result<Image, Error> {
        Ok(self.relay_create("images", session, csrf, form).await?)
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for the non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)]
    #[case(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)]
    #[case(StatusCode::FORBIDDEN, ErrorCode::Forbidden)]
    #[case(StatusCode::NOT_FOUND, ErrorCode::NotFound)]
    #[case(StatusCode::METHOD_NOT_ALLOWED, ErrorCode::MethodNotAllowed)]
    #[case(StatusCode::GONE, ErrorCode::Gone)]
    #[case(StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::UnprocessableEntity)]
    #[case(StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ServiceUnavailable)]
    #[case(StatusCode::BAD_GATEWAY, ErrorCode::InternalError)]
    #[case(StatusCode::IM_A_TEAPOT, ErrorCode::InternalError)]
    fn statuses_map_to_the_stable_catalogue(
        #[case] status: StatusCode,
        #[case] expected: ErrorCode,
    ) {
        let err: Error = map_status_error(status, b"{}").into();
        assert_eq!(err.code, expected);
    }

    #[test]
    fn status_errors_carry_the_gateway_message_and_fields() {
        let body = br#"{ "message": "name is taken", "fields": { "name": ["taken"] } }"#;
        let err: Error = map_status_error(StatusCode::UNPROCESSABLE_ENTITY, body).into();
        assert_eq!(err.message, "name is taken");
        let details = err.details.expect("details");
        assert_eq!(details["fields"]["name"][0], "taken");
    }

    #[test]
    fn unparseable_error_bodies_fall_back_to_a_preview() {
        let err = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"  upstream   asleep  ");
        match err {
            GatewayError::Status {
                status, message, ..
            } => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
                assert_eq!(message, "status 503: upstream asleep");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn long_previews_are_truncated() {
        let body = "x".repeat(400);
        let err = map_status_error(StatusCode::BAD_GATEWAY, body.as_bytes());
        match err {
            GatewayError::Status { message, .. } => {
                assert!(message.ends_with("..."));
                assert!(message.len() < 200);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn transport_failures_collapse_to_internal_errors() {
        let err: Error = GatewayError::Transport {
            message: "connection refused".to_owned(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn session_cookie_uses_the_site_cookie_name() {
        let session =
            SessionId::new("7c9e6679-7425-40de-944b-e07fc1f90ae7").expect("fixture id");
        assert_eq!(
            GatewayHttpClient::session_cookie(&session),
            "session_id=7c9e6679-7425-40de-944b-e07fc1f90ae7",
        );
    }
}
