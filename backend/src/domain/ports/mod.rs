//! Driving ports for the HTTP adapter.
//!
//! In hexagonal terms these are *driving* ports: inbound handlers call
//! them without knowing the backing infrastructure (the real gateway
//! client or a test fixture). Handler tests substitute the fixtures and
//! stay deterministic without network I/O.

mod admin_relay;
mod directory_query;
mod session_gateway;

pub use admin_relay::{AdminRelay, FixtureAdminRelay};
pub use directory_query::{DirectoryQuery, FixtureDirectoryQuery};
pub use session_gateway::{
    FIXTURE_CSRF_TOKEN, FIXTURE_SESSION_ID, FixtureSessionGateway, LoginSession, SessionGateway,
};

use chrono::{DateTime, Utc};

use super::Error;

/// Parse a fixture timestamp, surfacing corruption as an internal error.
pub(crate) fn fixture_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    raw.parse()
        .map_err(|err| Error::internal(format!("invalid fixture timestamp: {err}")))
}
