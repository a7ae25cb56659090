// src/api/page.rs
//! Raw page envelopes and vendor error bodies.
//!
//! One `RawPage` is the parsed shape of a single vendor list response:
//! an `items` array of still-raw JSON resources, the next-page cursor,
//! the response-level etag and the `pageInfo` block. Domain conversion
//! happens later, per item, in the client state.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// Paging details for lists of resources: how many results exist and
/// how many came back in this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}

/// One vendor response to a single paginated call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub etag: Option<String>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: Option<PageInfo>,
}

/// Whether a next-page token promises further pages.
///
/// A present, non-blank token asserts more pages may exist; an absent
/// or blank token is terminal. Both terminal forms occur in the wild.
pub fn token_continues(token: Option<&str>) -> bool {
    token.is_some_and(|t| !t.trim().is_empty())
}

/// Parses a successful response body into a [`RawPage`].
pub fn parse_raw_page(body: &str) -> Result<RawPage, Error> {
    serde_json::from_str(body).map_err(|e| {
        Error::MalformedResponse(format!(
            "page envelope did not parse: {} (body: {})",
            e,
            body_preview(body)
        ))
    })
}

// ---------------------------------------------------------------------------
// Vendor error envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct VendorErrorEnvelope {
    error: VendorErrorBody,
}

#[derive(Debug, Deserialize)]
struct VendorErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<VendorErrorItem>,
}

#[derive(Debug, Deserialize)]
struct VendorErrorItem {
    #[serde(default)]
    domain: String,
    #[serde(default)]
    reason: String,
}

/// Parses a non-success response body into an untriaged vendor failure.
///
/// The first entry of the `errors` array carries the (domain, reason)
/// pair the classifier needs. A body that is not the structured vendor
/// envelope still yields a `VendorFailure` with the HTTP status and a
/// body preview, so the caller always has one stable error surface.
pub fn parse_error_body(status: u16, body: &str) -> Error {
    match serde_json::from_str::<VendorErrorEnvelope>(body) {
        Ok(envelope) => {
            let (domain, reason) = envelope
                .error
                .errors
                .into_iter()
                .next()
                .map(|item| (item.domain, item.reason))
                .unwrap_or_default();
            Error::VendorFailure {
                // Prefer the envelope's own code; fall back to HTTP.
                status: if envelope.error.code != 0 {
                    envelope.error.code
                } else {
                    status
                },
                domain,
                reason,
                message: envelope.error.message,
            }
        }
        Err(_) => Error::VendorFailure {
            status,
            domain: String::new(),
            reason: String::new(),
            message: body_preview(body),
        },
    }
}

fn body_preview(body: &str) -> String {
    if body.len() > ERROR_BODY_PREVIEW_LENGTH {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < ERROR_BODY_PREVIEW_LENGTH)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
