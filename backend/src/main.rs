//! Backend entry-point: wires the TLS app server and the HTTP redirect.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use hearthside::inbound::http::health::HealthState;
use hearthside::inbound::http::state::HttpState;
use hearthside::outbound::gateway::GatewayHttpClient;

mod server;

use server::{ServerConfig, create_redirect_server, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    let gateway = Arc::new(
        GatewayHttpClient::new(config.gateway_url().clone()).map_err(std::io::Error::other)?,
    );
    let http_state = HttpState::new(gateway.clone(), gateway.clone(), gateway);

    let health_state = web::Data::new(HealthState::new());
    let redirect = create_redirect_server(config.site_url().clone(), config.http_port)?;
    let server = create_server(health_state, http_state, config)?;

    tokio::try_join!(server, redirect).map(|_| ())
}
