//! Admin form relays: validate locally, then forward one POST.
//!
//! Mutations stay with the gateway; these handlers only reject obviously
//! bad forms early and attach the session cookie plus the CSRF token the
//! gateway expects on state-changing requests.

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde_json::json;

use crate::domain::forms::{
    AlbumForm, ImageForm, PermissionForm, ScopeForm, ServiceClientForm, Validation,
};
use crate::domain::{ApiResult, Banner, CsrfToken, Error};
use crate::inbound::http::cookies::CookieGate;
use crate::inbound::http::state::HttpState;

/// Header carrying the gateway-issued anti-forgery token.
pub const CSRF_HEADER: &str = "x-csrf-token";

fn require_csrf(req: &HttpRequest) -> Result<CsrfToken, Error> {
    let missing = || {
        Error::invalid_request("csrf token is required").with_details(json!({
            "fields": { "csrfToken": ["csrf token is required"] }
        }))
    };
    let raw = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(missing)?;
    CsrfToken::new(raw).map_err(|_| missing())
}

fn reject_invalid(validation: Validation) -> Result<(), Error> {
    if validation.is_valid() {
        return Ok(());
    }
    Err(
        Error::invalid_request("form validation failed").with_details(json!({
            "fields": validation.into_field_errors()
        })),
    )
}

/// Create an authorization scope.
#[utoipa::path(
    post,
    path = "/api/v1/scopes",
    request_body = ScopeForm,
    responses(
        (status = 201, description = "Scope created", body = crate::domain::records::Scope),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 422, description = "Gateway rejected the form", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createScope"
)]
#[post("/scopes")]
pub async fn create_scope(
    state: web::Data<HttpState>,
    gate: CookieGate,
    req: HttpRequest,
    payload: web::Json<ScopeForm>,
) -> ApiResult<HttpResponse> {
    let session = gate.require_session()?;
    let csrf = require_csrf(&req)?;
    let form = payload.into_inner();
    reject_invalid(form.validate())?;
    let record = state
        .admin
        .create_scope(&session, &csrf, &form)
        .await
        .map_err(Banner::attach)?;
    Ok(HttpResponse::Created().json(record))
}

/// Grant a scope to a user or service client.
#[utoipa::path(
    post,
    path = "/api/v1/permissions",
    request_body = PermissionForm,
    responses(
        (status = 201, description = "Permission created", body = crate::domain::records::Permission),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 422, description = "Gateway rejected the form", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createPermission"
)]
#[post("/permissions")]
pub async fn create_permission(
    state: web::Data<HttpState>,
    gate: CookieGate,
    req: HttpRequest,
    payload: web::Json<PermissionForm>,
) -> ApiResult<HttpResponse> {
    let session = gate.require_session()?;
    let csrf = require_csrf(&req)?;
    let form = payload.into_inner();
    reject_invalid(form.validate())?;
    let record = state
        .admin
        .create_permission(&session, &csrf, &form)
        .await
        .map_err(Banner::attach)?;
    Ok(HttpResponse::Created().json(record))
}

/// Register a service client.
#[utoipa::path(
    post,
    path = "/api/v1/service-clients",
    request_body = ServiceClientForm,
    responses(
        (status = 201, description = "Service client created", body = crate::domain::records::ServiceClient),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 422, description = "Gateway rejected the form", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createServiceClient"
)]
#[post("/service-clients")]
pub async fn create_service_client(
    state: web::Data<HttpState>,
    gate: CookieGate,
    req: HttpRequest,
    payload: web::Json<ServiceClientForm>,
) -> ApiResult<HttpResponse> {
    let session = gate.require_session()?;
    let csrf = require_csrf(&req)?;
    let form = payload.into_inner();
    reject_invalid(form.validate())?;
    let record = state
        .admin
        .create_service_client(&session, &csrf, &form)
        .await
        .map_err(Banner::attach)?;
    Ok(HttpResponse::Created().json(record))
}

/// Create a gallery album.
#[utoipa::path(
    post,
    path = "/api/v1/albums",
    request_body = AlbumForm,
    responses(
        (status = 201, description = "Album created", body = crate::domain::records::Album),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 422, description = "Gateway rejected the form", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createAlbum"
)]
#[post("/albums")]
pub async fn create_album(
    state: web::Data<HttpState>,
    gate: CookieGate,
    req: HttpRequest,
    payload: web::Json<AlbumForm>,
) -> ApiResult<HttpResponse> {
    let session = gate.require_session()?;
    let csrf = require_csrf(&req)?;
    let form = payload.into_inner();
    reject_invalid(form.validate())?;
    let record = state
        .admin
        .create_album(&session, &csrf, &form)
        .await
        .map_err(Banner::attach)?;
    Ok(HttpResponse::Created().json(record))
}

/// Register an uploaded image in an album.
#[utoipa::path(
    post,
    path = "/api/v1/images",
    request_body = ImageForm,
    responses(
        (status = 201, description = "Image created", body = crate::domain::records::Image),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Session not found", body = Error),
        (status = 422, description = "Gateway rejected the form", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "createImage"
)]
#[post("/images")]
pub async fn create_image(
    state: web::Data<HttpState>,
    gate: CookieGate,
    req: HttpRequest,
    payload: web::Json<ImageForm>,
) -> ApiResult<HttpResponse> {
    let session = gate.require_session()?;
    let csrf = require_csrf(&req)?;
    let form = payload.into_inner();
    reject_invalid(form.validate())?;
    let record = state
        .admin
        .create_image(&session, &csrf, &form)
        .await
        .map_err(Banner::attach)?;
    Ok(HttpResponse::Created().json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_csrf_header_is_a_field_error() {
        let req = TestRequest::default().to_http_request();
        let err = require_csrf(&req).expect_err("no header");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        let details = err.details.expect("details");
        assert_eq!(details["fields"]["csrfToken"][0], "csrf token is required");
    }

    #[test]
    fn blank_csrf_header_is_rejected() {
        let req = TestRequest::default()
            .insert_header((CSRF_HEADER, "  "))
            .to_http_request();
        assert!(require_csrf(&req).is_err());
    }

    #[test]
    fn present_csrf_header_is_accepted() {
        let req = TestRequest::default()
            .insert_header((CSRF_HEADER, "tok-1"))
            .to_http_request();
        assert_eq!(require_csrf(&req).expect("token").as_str(), "tok-1");
    }

    #[test]
    fn invalid_forms_become_field_errors() {
        let form = ScopeForm {
            name: "Bad Name".to_owned(),
            description: String::new(),
        };
        let err = reject_invalid(form.validate()).expect_err("invalid form");
        let details = err.details.expect("details");
        assert!(details["fields"]["name"][0].is_string());
    }
}
