//! Presentational banner catalogue for failed gateway fetches.
//!
//! The frontend shows a titled banner instead of raw status codes. The
//! wording is part of the site's voice and is pinned here so the whole
//! contract is reviewable in one place.

use serde::Serialize;
use serde_json::json;

use super::error::{Error, ErrorCode};

/// Title and detail line for one error banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    /// Headline shown above the detail line.
    pub title: &'static str,
    /// One-sentence explanation in the site's voice.
    pub detail: &'static str,
}

impl Banner {
    /// Banner for a stable error code.
    #[must_use]
    pub const fn for_code(code: ErrorCode) -> Self {
        let (title, detail) = match code {
            ErrorCode::InvalidRequest => (
                "Scrambled request",
                "The gateway could not make sense of that request.",
            ),
            ErrorCode::Unauthorized => ("Who goes there?", "Sign in to see this page."),
            ErrorCode::Forbidden => (
                "You shall not pass",
                "You do not have permission to view this.",
            ),
            ErrorCode::NotFound => ("Off the map", "There is nothing at this address."),
            ErrorCode::MethodNotAllowed => ("Wrong door", "That action is not available here."),
            ErrorCode::Gone => ("Packed away", "This page has been retired."),
            ErrorCode::UnprocessableEntity => (
                "Needs another look",
                "The gateway rejected the submitted details.",
            ),
            ErrorCode::ServiceUnavailable => (
                "Gone fishing",
                "The family gateway is taking a break. Try again shortly.",
            ),
            ErrorCode::InternalError => (
                "Something broke",
                "An unexpected error occurred. Try again shortly.",
            ),
        };
        Self { title, detail }
    }

    /// Attach this error's banner to its details under the `banner` key.
    #[must_use]
    pub fn attach(error: Error) -> Error {
        let banner = Self::for_code(error.code);
        error.with_detail_entry(
            "banner",
            json!({ "title": banner.title, "detail": banner.detail }),
        )
    }
}
