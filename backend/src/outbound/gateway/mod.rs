//! Reqwest-backed adapter for the identity/authorization gateway.
//!
//! The adapter owns transport details only: session cookie propagation,
//! timeout and HTTP error mapping, and JSON decoding into domain
//! records. Use-case logic stays behind the driving ports.

mod client;
mod dto;

pub use client::{GatewayError, GatewayHttpClient};
