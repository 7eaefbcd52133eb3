//! Driving port for the session relay (login, logout, CSRF).

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{
    CsrfToken, Error, Identity, LoginCredentials, OauthParams, SessionId,
};

/// Session material returned by a successful gateway login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    /// Correlation token for subsequent relayed calls.
    pub session: SessionId,
    /// Display profile cached in the identity cookie.
    pub identity: Identity,
}

/// Domain use-case port for the session relay.
///
/// Every method performs at most one outbound call; failures are
/// surfaced once and never retried.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Relay credentials (and any OAuth parts) to the gateway login.
    async fn login(
        &self,
        credentials: &LoginCredentials,
        oauth: &OauthParams,
    ) -> Result<LoginSession, Error>;

    /// Relay a logout for the session.
    async fn logout(&self, session: &SessionId) -> Result<(), Error>;

    /// Fetch the per-session anti-forgery token.
    async fn csrf(&self, session: &SessionId) -> Result<CsrfToken, Error>;
}

/// Session id issued by [`FixtureSessionGateway`].
pub const FIXTURE_SESSION_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
/// CSRF token issued by [`FixtureSessionGateway`].
pub const FIXTURE_CSRF_TOKEN: &str = "f3b9c600-5c1d-4d2e-8f65-1d9b0a1c44aa";

const FIXTURE_USERNAME: &str = "marta";
const FIXTURE_PASSWORD: &str = "orchard-gate";

/// In-memory session gateway used by handler tests and dev bring-up.
///
/// `marta` / `orchard-gate` authenticates successfully and produces a
/// fixed session id and identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionGateway;

impl FixtureSessionGateway {
    fn identity() -> Identity {
        Identity {
            slug: FIXTURE_USERNAME.to_owned(),
            display_name: "Marta".to_owned(),
            permissions: vec!["albums:edit".to_owned(), "scopes:admin".to_owned()],
        }
    }
}

#[async_trait]
impl SessionGateway for FixtureSessionGateway {
    async fn login(
        &self,
        credentials: &LoginCredentials,
        _oauth: &OauthParams,
    ) -> Result<LoginSession, Error> {
        if credentials.username() == FIXTURE_USERNAME
            && credentials.password() == FIXTURE_PASSWORD
        {
            let session = SessionId::new(FIXTURE_SESSION_ID)
                .map_err(|err| Error::internal(format!("invalid fixture session id: {err}")))?;
            Ok(LoginSession {
                session,
                identity: Self::identity(),
            })
        } else {
            Err(Error::unauthorized("invalid credentials").with_details(json!({
                "fields": { "credentials": ["invalid username or password"] }
            })))
        }
    }

    async fn logout(&self, _session: &SessionId) -> Result<(), Error> {
        Ok(())
    }

    async fn csrf(&self, _session: &SessionId) -> Result<CsrfToken, Error> {
        CsrfToken::new(FIXTURE_CSRF_TOKEN)
            .map_err(|err| Error::internal(format!("invalid fixture csrf token: {err}")))
    }
}
