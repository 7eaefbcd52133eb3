//! End-to-end coverage for the session relay endpoints, driven through
//! an in-process app wired with the fixture gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::cookie::Cookie;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};

use hearthside::Trace;
use hearthside::domain::ports::{
    FIXTURE_CSRF_TOKEN, FIXTURE_SESSION_ID, FixtureAdminRelay, FixtureDirectoryQuery,
    LoginSession, SessionGateway,
};
use hearthside::domain::{
    CsrfToken, Error, LoginCredentials, OauthParams, SessionId,
};
use hearthside::inbound::http::session::{csrf, login, logout};
use hearthside::inbound::http::state::HttpState;

fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::fixtures()))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .service(login)
                .service(logout)
                .service(csrf),
        )
}

fn login_body(username: &str, password: &str) -> Value {
    json!({ "username": username, "password": password })
}

#[actix_web::test]
async fn login_sets_the_three_site_cookies() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(login_body("marta", "orchard-gate"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let cookies: Vec<_> = res.response().cookies().collect();
    let names: Vec<&str> = cookies.iter().map(|cookie| cookie.name()).collect();
    assert!(names.contains(&"session_id"));
    assert!(names.contains(&"identity"));
    assert!(names.contains(&"authenticated"));

    let session = cookies
        .iter()
        .find(|cookie| cookie.name() == "session_id")
        .expect("session cookie");
    assert_eq!(session.value(), FIXTURE_SESSION_ID);
    assert_eq!(session.http_only(), Some(true));

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["identity"]["slug"], "marta");
    assert_eq!(body["identity"]["displayName"], "Marta");
}

#[actix_web::test]
async fn login_rejects_wrong_credentials_with_field_errors() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(login_body("marta", "wrong"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
    assert!(body["details"]["fields"]["credentials"][0].is_string());
}

#[actix_web::test]
async fn login_validates_the_payload_before_any_relay() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(login_body("   ", "pw"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(
        body["details"]["fields"]["username"][0],
        "username must not be empty"
    );
}

#[actix_web::test]
async fn login_rejects_malformed_oauth_parts() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "username": "marta",
                "password": "orchard-gate",
                "clientId": "not-a-uuid"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert!(body["details"]["fields"]["clientId"][0].is_string());
}

/// Gateway double recording whether any relay method was reached.
struct RecordingGateway {
    reached: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl SessionGateway for RecordingGateway {
    async fn login(
        &self,
        _credentials: &LoginCredentials,
        _oauth: &OauthParams,
    ) -> Result<LoginSession, Error> {
        self.reached.store(true, Ordering::SeqCst);
        Err(Error::unavailable("unexpected outbound call"))
    }

    async fn logout(&self, _session: &SessionId) -> Result<(), Error> {
        self.reached.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn csrf(&self, _session: &SessionId) -> Result<CsrfToken, Error> {
        self.reached.store(true, Ordering::SeqCst);
        Err(Error::unavailable("unexpected outbound call"))
    }
}

#[actix_web::test]
async fn logout_without_a_session_cookie_is_rejected_up_front() {
    let reached = Arc::new(AtomicBool::new(false));
    let state = HttpState::new(
        Arc::new(RecordingGateway {
            reached: reached.clone(),
        }),
        Arc::new(FixtureDirectoryQuery),
        Arc::new(FixtureAdminRelay),
    );
    let app = test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(login)
                .service(logout)
                .service(csrf),
        ),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/v1/logout").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "session not found");
    assert!(
        !reached.load(Ordering::SeqCst),
        "no outbound call may happen without a session cookie",
    );
}

#[actix_web::test]
async fn logout_clears_cookies_and_redirects() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(Cookie::new("session_id", FIXTURE_SESSION_ID))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        res.headers()
            .get(header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("ascii"),
        "/",
    );

    for cookie in res.response().cookies() {
        assert!(cookie.value().is_empty(), "{} must be cleared", cookie.name());
    }
}

#[actix_web::test]
async fn csrf_returns_the_gateway_token() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/session/csrf")
            .cookie(Cookie::new("session_id", FIXTURE_SESSION_ID))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["token"], FIXTURE_CSRF_TOKEN);
}

#[actix_web::test]
async fn csrf_requires_a_session_cookie() {
    let app = test::init_service(test_app()).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/session/csrf")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
