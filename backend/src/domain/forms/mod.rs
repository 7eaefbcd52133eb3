//! Pure field validators for the admin-style forms.
//!
//! Each form type exposes `validate() -> Validation`: a predicate chain
//! over string length and shape with no side effects. The same
//! `{field: [messages]}` shape carries gateway-reported field errors, so
//! the frontend renders both identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod album;
mod image;
mod permission;
mod scope;
mod service_client;

pub use album::AlbumForm;
pub use image::ImageForm;
pub use permission::PermissionForm;
pub use scope::ScopeForm;
pub use service_client::ServiceClientForm;

/// Return `true` when `value` parses as a UUID.
///
/// # Examples
/// ```
/// use hearthside::domain::forms::check_uuid;
///
/// assert!(check_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
/// assert!(!check_uuid("not-a-uuid"));
/// ```
pub fn check_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

/// Per-field validation messages in the uniform `{field: [messages]}`
/// shape shared with the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// An empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one message against `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_owned()).or_default().push(message.into());
    }

    /// Whether no field has errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against `field`.
    pub fn for_field(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Every message, in field order.
    pub fn messages(&self) -> Vec<String> {
        self.0.values().flatten().cloned().collect()
    }
}

/// Outcome of validating one form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    fields: FieldErrors,
}

impl Validation {
    /// Start an empty (passing) validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, field: &str, ok: bool, message: &str) {
        if !ok {
            self.fields.push(field, message);
        }
    }

    /// Whether every predicate held.
    pub fn is_valid(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flattened descriptive messages.
    pub fn messages(&self) -> Vec<String> {
        self.fields.messages()
    }

    /// The per-field error shape for the response payload.
    pub fn into_field_errors(self) -> FieldErrors {
        self.fields
    }
}

pub(crate) fn chars_within(value: &str, min: usize, max: usize) -> bool {
    let count = value.chars().count();
    (min..=max).contains(&count)
}

pub(crate) fn chars_at_most(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}
