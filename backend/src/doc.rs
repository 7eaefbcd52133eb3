//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the JSON API:
//! session relay, directory reads, admin relays, and health probes. Used
//! by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::forms::{AlbumForm, ImageForm, PermissionForm, ScopeForm, ServiceClientForm};
use crate::domain::records::{Album, Image, Permission, Scope, ServiceClient, TaskTemplate, User};
use crate::domain::{Error, ErrorCode, Identity};
use crate::inbound::http::session::{CsrfResponse, LoginRequest, LoginResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session_id",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the JSON API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Hearthside backend API",
        description = "Cookie-gated relay onto the family identity/authorization gateway."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::session::login,
        crate::inbound::http::session::logout,
        crate::inbound::http::session::csrf,
        crate::inbound::http::directory::list_permissions,
        crate::inbound::http::directory::list_scopes,
        crate::inbound::http::directory::list_users,
        crate::inbound::http::directory::list_task_templates,
        crate::inbound::http::directory::list_albums,
        crate::inbound::http::directory::list_service_clients,
        crate::inbound::http::directory::list_album_images,
        crate::inbound::http::admin::create_scope,
        crate::inbound::http::admin::create_permission,
        crate::inbound::http::admin::create_service_client,
        crate::inbound::http::admin::create_album,
        crate::inbound::http::admin::create_image,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        LoginRequest,
        LoginResponse,
        CsrfResponse,
        Album,
        Image,
        Permission,
        Scope,
        ServiceClient,
        TaskTemplate,
        User,
        AlbumForm,
        ImageForm,
        PermissionForm,
        ScopeForm,
        ServiceClientForm,
    )),
    tags(
        (name = "session", description = "Login, logout, and CSRF relay"),
        (name = "directory", description = "Gateway-backed resource pages"),
        (name = "admin", description = "Validated state-changing relays"),
        (name = "health", description = "Probes for the reverse proxy")
    )
)]
pub struct ApiDoc;
