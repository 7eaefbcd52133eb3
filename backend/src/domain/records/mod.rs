//! Read-model records fetched from the gateway.
//!
//! These are flat snapshots: the gateway owns their lifecycle and this
//! layer re-serialises them to the frontend unchanged. Fields mirror the
//! gateway's camelCase JSON; timestamps are RFC 3339.

mod album;
mod image;
mod permission;
mod scope;
mod service_client;
mod task_template;
mod user;

pub use album::Album;
pub use image::Image;
pub use permission::Permission;
pub use scope::Scope;
pub use service_client::ServiceClient;
pub use task_template::TaskTemplate;
pub use user::User;
