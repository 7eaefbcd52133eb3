//! Outbound adapters owning transport details.

pub mod gateway;
