//! Domain primitives for the Hearthside BFF.
//!
//! Purpose: define the strongly typed values exchanged between the HTTP
//! adapter and the gateway ports. Records are snapshots owned by the
//! external gateway; this layer never persists them. Keep types immutable
//! and document serialisation contracts (serde) in each type's Rustdoc.

pub mod auth;
pub mod banner;
pub mod error;
pub mod forms;
pub mod identity;
pub mod ports;
pub mod records;
pub mod slug;

pub use self::auth::{AuthValidationError, LoginCredentials, OauthParams};
pub use self::banner::Banner;
pub use self::error::{Error, ErrorCode};
pub use self::identity::{CsrfToken, Identity, IdentityValidationError, SessionId};
pub use self::slug::{Slug, SlugValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use hearthside::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
