//! Environment-driven server configuration.
//!
//! Release builds fail fast on missing or malformed settings; debug
//! builds log a warning and fall back to development defaults so local
//! bring-up needs no environment at all.

use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Gateway host name, e.g. `auth.hearthside.example`.
pub const GATEWAY_HOST_ENV: &str = "GATEWAY_HOST";
/// Gateway port.
pub const GATEWAY_PORT_ENV: &str = "GATEWAY_PORT";
/// Gateway scheme; `https` unless a dev gateway runs without TLS.
pub const GATEWAY_SCHEME_ENV: &str = "GATEWAY_SCHEME";
/// Public site URL used by the HTTP→HTTPS redirect.
pub const SITE_URL_ENV: &str = "SITE_URL";
/// Port of the plain-HTTP redirect listener.
pub const HTTP_PORT_ENV: &str = "HTTP_PORT";
/// Port of the TLS listener.
pub const HTTPS_PORT_ENV: &str = "HTTPS_PORT";
/// PEM certificate chain file.
pub const TLS_CERT_ENV: &str = "TLS_CERT_FILE";
/// PEM private key file.
pub const TLS_KEY_ENV: &str = "TLS_KEY_FILE";

const DEV_GATEWAY_HOST: &str = "127.0.0.1";
const DEV_GATEWAY_PORT: u16 = 8900;
const DEV_SITE_URL: &str = "https://localhost:8443/";
const DEV_HTTP_PORT: u16 = 8080;
const DEV_HTTPS_PORT: u16 = 8443;

/// Configuration failures surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not set")]
    MissingEnv { name: &'static str },
    #[error("{name}={value} is invalid; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read {path}: {source}")]
    UnreadableFile {
        path: String,
        source: std::io::Error,
    },
    #[error("certificate error: {0}")]
    Certificate(String),
    #[error("private key error: {0}")]
    PrivateKey(String),
    #[error("TLS configuration error: {0}")]
    Tls(String),
}

/// Whether missing settings warn (debug) or fail (release).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Mode of the running binary.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Source of environment strings, swappable in tests.
pub trait Env {
    /// Look up a variable, `None` when unset or not unicode.
    fn string(&self, name: &str) -> Option<String>;
}

/// Process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl Env for SystemEnv {
    fn string(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Resolved server configuration.
#[derive(Debug)]
pub struct ServerConfig {
    pub(crate) gateway_url: Url,
    pub(crate) site_url: Url,
    pub(crate) http_port: u16,
    pub(crate) https_port: u16,
    pub(crate) tls: Option<rustls::ServerConfig>,
}

impl ServerConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// In release mode, any missing or malformed variable is an error;
    /// TLS material must be present and parseable in both modes once the
    /// cert/key variables are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(&SystemEnv, BuildMode::current())
    }

    fn resolve<E: Env>(env: &E, mode: BuildMode) -> Result<Self, ConfigError> {
        let gateway_url = gateway_url(env, mode)?;
        let site_url = parse_url_env(env, mode, SITE_URL_ENV, DEV_SITE_URL)?;
        let http_port = parse_port_env(env, mode, HTTP_PORT_ENV, DEV_HTTP_PORT)?;
        let https_port = parse_port_env(env, mode, HTTPS_PORT_ENV, DEV_HTTPS_PORT)?;
        let tls = tls_config(env, mode)?;

        Ok(Self {
            gateway_url,
            site_url,
            http_port,
            https_port,
            tls,
        })
    }

    /// Base URL for outbound gateway calls.
    pub fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Public site URL the redirect listener points at.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }
}

fn debug_warn_or_error<T, F>(
    mode: BuildMode,
    fallback: T,
    error: ConfigError,
    warn_fn: F,
) -> Result<T, ConfigError>
where
    F: FnOnce(),
{
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn required_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    dev_default: &str,
) -> Result<String, ConfigError> {
    match env.string(name) {
        Some(value) => Ok(value),
        None => debug_warn_or_error(
            mode,
            dev_default.to_owned(),
            ConfigError::MissingEnv { name },
            || warn!("{name} not set; defaulting to {dev_default} (dev only)"),
        ),
    }
}

fn parse_port_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    dev_default: u16,
) -> Result<u16, ConfigError> {
    let raw = required_env(env, mode, name, &dev_default.to_string())?;
    match raw.parse::<u16>() {
        Ok(port) => Ok(port),
        Err(_) => debug_warn_or_error(
            mode,
            dev_default,
            ConfigError::InvalidEnv {
                name,
                value: raw.clone(),
                expected: "a TCP port number",
            },
            || warn!(value = %raw, "invalid {name}; defaulting to {dev_default}"),
        ),
    }
}

fn parse_url_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    dev_default: &str,
) -> Result<Url, ConfigError> {
    let raw = required_env(env, mode, name, dev_default)?;
    match (Url::parse(&raw), Url::parse(dev_default)) {
        (Ok(url), _) => Ok(url),
        (Err(_), Ok(fallback)) => debug_warn_or_error(
            mode,
            fallback,
            ConfigError::InvalidEnv {
                name,
                value: raw.clone(),
                expected: "an absolute URL",
            },
            || warn!(value = %raw, "invalid {name}; defaulting to {dev_default}"),
        ),
        (Err(_), Err(_)) => Err(ConfigError::InvalidEnv {
            name,
            value: raw,
            expected: "an absolute URL",
        }),
    }
}

fn gateway_url<E: Env>(env: &E, mode: BuildMode) -> Result<Url, ConfigError> {
    let host = required_env(env, mode, GATEWAY_HOST_ENV, DEV_GATEWAY_HOST)?;
    let port = parse_port_env(env, mode, GATEWAY_PORT_ENV, DEV_GATEWAY_PORT)?;
    let scheme = match env.string(GATEWAY_SCHEME_ENV) {
        None => default_gateway_scheme(mode).to_owned(),
        Some(value) if value == "http" || value == "https" => value,
        Some(value) => debug_warn_or_error(
            mode,
            default_gateway_scheme(mode).to_owned(),
            ConfigError::InvalidEnv {
                name: GATEWAY_SCHEME_ENV,
                value: value.clone(),
                expected: "http|https",
            },
            || warn!(value = %value, "invalid {GATEWAY_SCHEME_ENV}; using default"),
        )?,
    };

    // Trailing slash matters: reqwest joins relative paths onto it.
    let raw = format!("{scheme}://{host}:{port}/");
    Url::parse(&raw).map_err(|_| ConfigError::InvalidEnv {
        name: GATEWAY_HOST_ENV,
        value: raw,
        expected: "a resolvable host name",
    })
}

const fn default_gateway_scheme(mode: BuildMode) -> &'static str {
    if mode.is_debug() { "http" } else { "https" }
}

fn tls_config<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Option<rustls::ServerConfig>, ConfigError> {
    let cert_path = env.string(TLS_CERT_ENV);
    let key_path = env.string(TLS_KEY_ENV);
    match (cert_path, key_path) {
        (Some(cert_path), Some(key_path)) => Ok(Some(load_tls(&cert_path, &key_path)?)),
        (None, None) => debug_warn_or_error(
            mode,
            None,
            ConfigError::MissingEnv { name: TLS_CERT_ENV },
            || warn!("TLS cert/key not set; serving plain HTTP (dev only)"),
        ),
        (Some(_), None) => Err(ConfigError::MissingEnv { name: TLS_KEY_ENV }),
        (None, Some(_)) => Err(ConfigError::MissingEnv { name: TLS_CERT_ENV }),
    }
}

/// Build a rustls server config from PEM cert chain and key files.
pub fn load_tls(cert_path: &str, key_path: &str) -> Result<rustls::ServerConfig, ConfigError> {
    let cert_pem = std::fs::read(cert_path).map_err(|source| ConfigError::UnreadableFile {
        path: cert_path.to_owned(),
        source,
    })?;
    let key_pem = std::fs::read(key_path).map_err(|source| ConfigError::UnreadableFile {
        path: key_path.to_owned(),
        source,
    })?;

    let certs = parse_certificates(&cert_pem)?;
    if certs.is_empty() {
        return Err(ConfigError::Certificate(format!(
            "no certificates found in {cert_path}"
        )));
    }
    let key = parse_private_key(&key_pem)?;

    rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)
        .map_err(|err| ConfigError::Tls(err.to_string()))
}

fn parse_certificates(pem: &[u8]) -> Result<Vec<CertificateDer<'static>>, ConfigError> {
    CertificateDer::pem_slice_iter(pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| ConfigError::Certificate(format!("failed to parse certificates: {err}")))
}

fn parse_private_key(pem: &[u8]) -> Result<PrivateKeyDer<'static>, ConfigError> {
    PrivateKeyDer::from_pem_slice(pem)
        .map_err(|err| ConfigError::PrivateKey(format!("failed to parse private key: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl Env for MapEnv {
        fn string(&self, name: &str) -> Option<String> {
            self.0.get(name).map(|value| (*value).to_owned())
        }
    }

    fn full_env() -> MapEnv {
        MapEnv(HashMap::from([
            (GATEWAY_HOST_ENV, "auth.hearthside.example"),
            (GATEWAY_PORT_ENV, "8900"),
            (SITE_URL_ENV, "https://hearthside.example/"),
            (HTTP_PORT_ENV, "80"),
            (HTTPS_PORT_ENV, "443"),
        ]))
    }

    #[test]
    fn release_mode_requires_every_setting() {
        let err = ServerConfig::resolve(&MapEnv(HashMap::new()), BuildMode::Release)
            .expect_err("empty env must fail");
        assert!(matches!(err, ConfigError::MissingEnv { .. }));
    }

    #[test]
    fn release_mode_requires_tls_material() {
        let err = ServerConfig::resolve(&full_env(), BuildMode::Release)
            .expect_err("missing TLS must fail");
        assert!(matches!(
            err,
            ConfigError::MissingEnv {
                name: TLS_CERT_ENV
            }
        ));
    }

    #[test]
    fn debug_mode_falls_back_to_dev_defaults() {
        let config = ServerConfig::resolve(&MapEnv(HashMap::new()), BuildMode::Debug)
            .expect("debug defaults");
        assert_eq!(config.gateway_url().as_str(), "http://127.0.0.1:8900/");
        assert_eq!(config.http_port, DEV_HTTP_PORT);
        assert!(config.tls.is_none());
    }

    #[test]
    fn gateway_url_uses_https_and_configured_parts() {
        let url = gateway_url(&full_env(), BuildMode::Release).expect("gateway url");
        assert_eq!(url.as_str(), "https://auth.hearthside.example:8900/");
    }

    #[test]
    fn malformed_port_fails_release_mode() {
        let mut env = full_env();
        env.0.insert(HTTPS_PORT_ENV, "forty-four-three");
        let err = ServerConfig::resolve(&env, BuildMode::Release).expect_err("bad port");
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                name: HTTPS_PORT_ENV,
                ..
            }
        ));
    }

    #[test]
    fn one_sided_tls_config_always_fails() {
        let mut env = full_env();
        env.0.insert(TLS_CERT_ENV, "/etc/hearthside/cert.pem");
        let err = ServerConfig::resolve(&env, BuildMode::Debug).expect_err("half TLS");
        assert!(matches!(err, ConfigError::MissingEnv { name: TLS_KEY_ENV }));
    }

    #[test]
    fn unreadable_tls_files_are_reported() {
        let err = load_tls("/nonexistent/cert.pem", "/nonexistent/key.pem")
            .expect_err("missing files");
        assert!(matches!(err, ConfigError::UnreadableFile { .. }));
    }
}
