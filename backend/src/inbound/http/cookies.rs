//! Cookie gate over the three site cookies.
//!
//! `session_id` is the http-only correlation token, `identity` a
//! client-readable JSON blob, `authenticated` a plain flag the frontend
//! reads before rendering. The gate only reports what the cookies say —
//! it is a rendering guard, never a security boundary; the gateway
//! re-checks authorization on every relayed call.

use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::warn;

use crate::domain::ports::LoginSession;
use crate::domain::{Error, Identity, SessionId};

/// Server-set, http-only session correlation cookie.
pub const SESSION_COOKIE: &str = "session_id";
/// Client-readable identity blob (percent-encoded JSON).
pub const IDENTITY_COOKIE: &str = "identity";
/// Client-readable "signed in" flag.
pub const AUTHENTICATED_COOKIE: &str = "authenticated";

/// Lifetime of the site cookies; the gateway session expires sooner.
const COOKIE_TTL: time::Duration = time::Duration::hours(2);

/// Snapshot of the three cookies for one request.
#[derive(Debug, Clone)]
pub struct CookieGate {
    session: Option<SessionId>,
    identity: Option<Identity>,
    authenticated: bool,
}

impl CookieGate {
    /// Read the gate from a request's cookies.
    ///
    /// Malformed values never fail the request: an unparseable session
    /// id or identity blob is logged and treated as absent.
    pub fn read(req: &HttpRequest) -> Self {
        let session = req.cookie(SESSION_COOKIE).and_then(|cookie| {
            match SessionId::new(cookie.value()) {
                Ok(session) => Some(session),
                Err(err) => {
                    warn!(error = %err, "invalid session cookie value");
                    None
                }
            }
        });

        let identity = req
            .cookie(IDENTITY_COOKIE)
            .and_then(|cookie| decode_identity(cookie.value()));

        let authenticated = req
            .cookie(AUTHENTICATED_COOKIE)
            .is_some_and(|cookie| cookie.value() == "true");

        Self {
            session,
            identity,
            authenticated,
        }
    }

    /// The session correlation token, when the cookie holds a valid one.
    pub fn session(&self) -> Option<&SessionId> {
        self.session.as_ref()
    }

    /// The cached display profile, when the cookie parses.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Rendering hint: both the flag and a session token are present.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated && self.session.is_some()
    }

    /// Require a session token or fail the relay before any outbound call.
    pub fn require_session(&self) -> Result<SessionId, Error> {
        self.session
            .clone()
            .ok_or_else(|| Error::unauthorized("session not found"))
    }
}

impl FromRequest for CookieGate {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::read(req)))
    }
}

fn decode_identity(raw: &str) -> Option<Identity> {
    let decoded = match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded,
        Err(err) => {
            warn!(error = %err, "identity cookie is not valid UTF-8");
            return None;
        }
    };
    match Identity::from_cookie_json(&decoded) {
        Ok(identity) => Some(identity),
        Err(err) => {
            warn!(error = %err, "identity cookie is not the expected JSON shape");
            None
        }
    }
}

/// Cookies set after a successful login relay.
pub fn login_cookies(login: &LoginSession) -> [Cookie<'static>; 3] {
    let identity_value =
        utf8_percent_encode(&login.identity.to_cookie_json(), NON_ALPHANUMERIC).to_string();
    [
        Cookie::build(SESSION_COOKIE, login.session.to_string())
            .path("/")
            .secure(true)
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(COOKIE_TTL)
            .finish(),
        Cookie::build(IDENTITY_COOKIE, identity_value)
            .path("/")
            .secure(true)
            .same_site(SameSite::Lax)
            .max_age(COOKIE_TTL)
            .finish(),
        Cookie::build(AUTHENTICATED_COOKIE, "true")
            .path("/")
            .secure(true)
            .same_site(SameSite::Lax)
            .max_age(COOKIE_TTL)
            .finish(),
    ]
}

/// Expired replacements clearing all three cookies.
pub fn clear_cookies() -> [Cookie<'static>; 3] {
    [SESSION_COOKIE, IDENTITY_COOKIE, AUTHENTICATED_COOKIE].map(|name| {
        Cookie::build(name, "")
            .path("/")
            .max_age(time::Duration::ZERO)
            .finish()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    const SESSION: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";

    fn identity_cookie_value() -> String {
        utf8_percent_encode(
            r#"{"slug":"marta","displayName":"Marta","permissions":["albums:edit"]}"#,
            NON_ALPHANUMERIC,
        )
        .to_string()
    }

    #[test]
    fn reads_all_three_cookies() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, SESSION))
            .cookie(Cookie::new(IDENTITY_COOKIE, identity_cookie_value()))
            .cookie(Cookie::new(AUTHENTICATED_COOKIE, "true"))
            .to_http_request();
        let gate = CookieGate::read(&req);
        assert!(gate.is_authenticated());
        assert_eq!(gate.session().expect("session").as_ref(), SESSION);
        assert_eq!(gate.identity().expect("identity").slug, "marta");
    }

    #[rstest]
    #[case("not json at all")]
    #[case("%FF%FE")]
    #[case("%7B%22slug%22%3A%22m%22%7D")]
    fn malformed_identity_gates_as_absent(#[case] value: &str) {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, SESSION))
            .cookie(Cookie::new(IDENTITY_COOKIE, value))
            .to_http_request();
        let gate = CookieGate::read(&req);
        assert!(gate.identity().is_none());
        assert!(gate.session().is_some());
    }

    #[test]
    fn tampered_session_cookie_is_ignored() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "not-a-uuid"))
            .cookie(Cookie::new(AUTHENTICATED_COOKIE, "true"))
            .to_http_request();
        let gate = CookieGate::read(&req);
        assert!(gate.session().is_none());
        assert!(!gate.is_authenticated());
        let err = gate.require_session().expect_err("no session");
        assert_eq!(err.message, "session not found");
    }

    #[test]
    fn authenticated_flag_alone_is_not_enough() {
        let req = TestRequest::default()
            .cookie(Cookie::new(AUTHENTICATED_COOKIE, "true"))
            .to_http_request();
        assert!(!CookieGate::read(&req).is_authenticated());
    }

    #[test]
    fn login_cookies_follow_the_contract() {
        let login = LoginSession {
            session: SessionId::new(SESSION).expect("session id"),
            identity: Identity {
                slug: "marta".to_owned(),
                display_name: "Marta".to_owned(),
                permissions: vec![],
            },
        };
        let [session, identity, authenticated] = login_cookies(&login);
        assert_eq!(session.name(), SESSION_COOKIE);
        assert_eq!(session.http_only(), Some(true));
        assert_eq!(identity.http_only(), None);
        assert!(!identity.value().contains('{'), "identity must be encoded");
        assert_eq!(authenticated.value(), "true");
    }

    #[test]
    fn clear_cookies_expire_immediately() {
        for cookie in clear_cookies() {
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
            assert!(cookie.value().is_empty());
        }
    }
}
