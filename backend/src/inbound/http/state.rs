//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AdminRelay, DirectoryQuery, FixtureAdminRelay, FixtureDirectoryQuery, FixtureSessionGateway,
    SessionGateway,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub gateway: Arc<dyn SessionGateway>,
    pub directory: Arc<dyn DirectoryQuery>,
    pub admin: Arc<dyn AdminRelay>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        gateway: Arc<dyn SessionGateway>,
        directory: Arc<dyn DirectoryQuery>,
        admin: Arc<dyn AdminRelay>,
    ) -> Self {
        Self {
            gateway,
            directory,
            admin,
        }
    }

    /// State backed entirely by fixtures, for tests and dev bring-up.
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixtureSessionGateway),
            Arc::new(FixtureDirectoryQuery),
            Arc::new(FixtureAdminRelay),
        )
    }
}
