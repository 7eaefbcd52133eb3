//! Server construction and middleware wiring.

mod config;

pub use config::{BuildMode, ConfigError, ServerConfig};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use url::Url;

use hearthside::Trace;
#[cfg(debug_assertions)]
use hearthside::doc::ApiDoc;
use hearthside::inbound::http::admin::{
    create_album, create_image, create_permission, create_scope, create_service_client,
};
use hearthside::inbound::http::directory::{
    list_album_images, list_albums, list_permissions, list_scopes, list_service_clients,
    list_task_templates, list_users,
};
use hearthside::inbound::http::health::{HealthState, live, ready};
use hearthside::inbound::http::session::{csrf, login, logout};
use hearthside::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(login)
        .service(logout)
        .service(csrf)
        .service(list_permissions)
        .service(list_scopes)
        .service(list_users)
        .service(list_task_templates)
        .service(list_albums)
        .service(list_service_clients)
        .service(list_album_images)
        .service(create_scope)
        .service(create_permission)
        .service(create_service_client)
        .service(create_album)
        .service(create_image);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the main HTTPS server.
///
/// Binds with TLS when the configuration carries cert/key material, and
/// falls back to plain HTTP otherwise (debug builds only reach that
/// state).
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let bind_addr = ("0.0.0.0", config.https_port);

    let factory = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    });

    let server = match config.tls {
        Some(tls) => factory.bind_rustls_0_23(bind_addr, tls)?.run(),
        None => factory.bind(bind_addr)?.run(),
    };

    health_state.mark_ready();
    Ok(server)
}

/// Answer every plain-HTTP request with a `301` to the site URL.
async fn redirect_to_site(req: HttpRequest, site_url: web::Data<Url>) -> HttpResponse {
    let location = req
        .uri()
        .path_and_query()
        .map_or_else(String::new, |parts| {
            parts.as_str().trim_start_matches('/').to_owned()
        });
    let target = site_url
        .join(&location)
        .map_or_else(|_| site_url.as_str().to_owned(), |url| url.to_string());
    HttpResponse::build(StatusCode::MOVED_PERMANENTLY)
        .insert_header((header::LOCATION, target))
        .finish()
}

/// Construct the plain-HTTP listener that redirects onto the site URL.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_redirect_server(site_url: Url, http_port: u16) -> std::io::Result<Server> {
    let site_url = web::Data::new(site_url);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(site_url.clone())
            .default_service(web::route().to(redirect_to_site))
    })
    .bind(("0.0.0.0", http_port))?
    .run();
    Ok(server)
}
