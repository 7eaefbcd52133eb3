//! Error response types.
//!
//! One payload shape serves every endpoint. Inbound adapters turn it into
//! an HTTP response; the outbound gateway adapter maps transport failures
//! into it at the port boundary.

use crate::middleware::trace::TraceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code.
///
/// The catalogue mirrors the gateway statuses the relay distinguishes;
/// everything else collapses to [`ErrorCode::InternalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The gateway does not support this method on the resource.
    MethodNotAllowed,
    /// The resource existed once and has been retired.
    Gone,
    /// The gateway understood the payload but rejected its contents.
    UnprocessableEntity,
    /// The gateway is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// API error response payload.
///
/// # Examples
/// ```
/// use hearthside::domain::{Error, ErrorCode};
///
/// let err = Error::new(ErrorCode::NotFound, "missing");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    pub code: ErrorCode,
    /// Human-readable error message.
    #[schema(example = "Something went wrong")]
    pub message: String,
    /// Correlation identifier for tracing this error across systems.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(alias = "trace_id")]
    pub trace_id: Option<String>,
    /// Supplementary error details.
    ///
    /// A JSON object carrying structured context: `fields` holds the
    /// uniform `{field: [messages]}` validation shape, `banner` the
    /// presentational pair for failed gateway fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl Error {
    /// Create a new error.
    ///
    /// Captures the current trace identifier if one is in scope so the
    /// error payload is correlated automatically.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Attach a trace identifier to the error.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use hearthside::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad")
    ///     .with_details(json!({ "fields": { "name": ["required"] } }));
    /// assert!(err.details.is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Merge one key into the details object, creating it when absent.
    pub fn with_detail_entry(mut self, key: &str, value: Value) -> Self {
        match self.details.as_mut().and_then(Value::as_object_mut) {
            Some(map) => {
                map.insert(key.to_owned(), value);
            }
            None => {
                self.details = Some(serde_json::json!({ key: value }));
            }
        }
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Coverage for payload construction and detail merging.

    use super::*;
    use serde_json::json;

    #[test]
    fn constructors_set_codes() {
        let cases = [
            (Error::invalid_request("a"), ErrorCode::InvalidRequest),
            (Error::unauthorized("b"), ErrorCode::Unauthorized),
            (Error::forbidden("c"), ErrorCode::Forbidden),
            (Error::not_found("d"), ErrorCode::NotFound),
            (Error::unavailable("e"), ErrorCode::ServiceUnavailable),
            (Error::internal("f"), ErrorCode::InternalError),
        ];
        for (err, code) in cases {
            assert_eq!(err.code, code);
        }
    }

    #[test]
    fn detail_entry_merges_into_existing_object() {
        let err = Error::invalid_request("bad")
            .with_details(json!({ "fields": { "name": ["required"] } }))
            .with_detail_entry("banner", json!({ "title": "t" }));
        let details = err.details.expect("details present");
        assert!(details.get("fields").is_some());
        assert_eq!(details["banner"]["title"], "t");
    }

    #[test]
    fn detail_entry_creates_object_when_absent() {
        let err = Error::not_found("gone").with_detail_entry("banner", json!({ "title": "t" }));
        assert_eq!(err.details.expect("details")["banner"]["title"], "t");
    }

    #[test]
    fn serialises_snake_case_codes() {
        let err = Error::new(ErrorCode::UnprocessableEntity, "no");
        let value = serde_json::to_value(&err).expect("serialise");
        assert_eq!(value["code"], "unprocessable_entity");
    }

    #[test]
    fn new_returns_no_trace_id_out_of_scope() {
        assert!(Error::internal("boom").trace_id.is_none());
    }
}
