//! Session relay handlers: login, logout, CSRF token issuance.
//!
//! ```text
//! POST /api/v1/login {"username":"marta","password":"..."}
//! POST /api/v1/logout
//! GET  /api/v1/session/csrf
//! ```
//!
//! Each handler performs at most one outbound call to the gateway and
//! surfaces a failure once; nothing is retried.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::forms::FieldErrors;
use crate::domain::{
    ApiResult, AuthValidationError, Error, Identity, LoginCredentials, OauthParams,
};
use crate::inbound::http::cookies::{CookieGate, clear_cookies, login_cookies};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// The OAuth parts are present only when the login page was reached from
/// an authorization redirect.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Login response body: the profile also cached in the identity cookie.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub identity: Identity,
}

/// CSRF response body for `GET /api/v1/session/csrf`.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CsrfResponse {
    pub token: String,
}

fn auth_field_error(err: AuthValidationError) -> Error {
    let mut fields = FieldErrors::new();
    fields.push(err.field(), err.to_string());
    Error::invalid_request(err.to_string()).with_details(json!({ "fields": fields }))
}

/// Relay credentials to the gateway and establish the cookie session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session, identity, and flag cookies"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.username, &request.password)
        .map_err(auth_field_error)?;
    let oauth = OauthParams::try_from_parts(
        request.client_id.as_deref(),
        request.redirect_uri.as_deref(),
        request.state.as_deref(),
    )
    .map_err(auth_field_error)?;

    let session = state.gateway.login(&credentials, &oauth).await?;
    let [session_cookie, identity_cookie, flag_cookie] = login_cookies(&session);
    Ok(HttpResponse::Ok()
        .cookie(session_cookie)
        .cookie(identity_cookie)
        .cookie(flag_cookie)
        .json(LoginResponse {
            identity: session.identity,
        }))
}

/// Relay a logout and clear the site cookies.
///
/// Without a `session_id` cookie this fails up front and performs no
/// outbound call.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 303, description = "Logged out; cookies cleared"),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, gate: CookieGate) -> ApiResult<HttpResponse> {
    let session = gate.require_session()?;
    state.gateway.logout(&session).await?;

    let [session_cookie, identity_cookie, flag_cookie] = clear_cookies();
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .cookie(session_cookie)
        .cookie(identity_cookie)
        .cookie(flag_cookie)
        .finish())
}

/// Fetch the per-session anti-forgery token from the gateway.
#[utoipa::path(
    get,
    path = "/api/v1/session/csrf",
    responses(
        (status = 200, description = "Token issued", body = CsrfResponse),
        (status = 401, description = "Session not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["session"],
    operation_id = "csrfToken"
)]
#[get("/session/csrf")]
pub async fn csrf(
    state: web::Data<HttpState>,
    gate: CookieGate,
) -> ApiResult<web::Json<CsrfResponse>> {
    let session = gate.require_session()?;
    let token = state.gateway.csrf(&session).await?;
    Ok(web::Json(CsrfResponse {
        token: token.as_str().to_owned(),
    }))
}
