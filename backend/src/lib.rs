//! Hearthside backend library modules.
//!
//! The BFF layer of the family website: cookie-gated JSON endpoints that
//! relay session and resource calls to the identity/authorization
//! gateway. Hexagonal layout: `domain` holds types and driving ports,
//! `inbound` the HTTP adapter, `outbound` the gateway client.

pub mod domain;
pub mod doc;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Trace middleware attaching per-request trace identifiers.
pub use middleware::Trace;
