// src/api/key.rs
//! Canonical cache keys for logical requests.
//!
//! Two requests that mean the same thing must produce the same key, no
//! matter how their parameters were assembled: parameter insertion order
//! and the element order of list parameters are both erased. Credentials
//! and per-user quota tags never enter the key.

use super::request::{ParamValue, RequestDescriptor, SECRET_PARAMS};
use crate::api::page;
use serde_json::Value;
use std::collections::BTreeMap;

/// Builds the canonical cache key for one page of a logical request.
///
/// The key is compact sorted-key JSON over the sanitized parameter set
/// plus the endpoint identity, with the page cursor appended as a
/// trailing field so each page of the same logical request gets a
/// distinct key.
pub fn build_key(descriptor: &RequestDescriptor) -> String {
    let mut canonical: BTreeMap<&str, Value> = BTreeMap::new();
    canonical.insert("#kind", Value::from(descriptor.kind().resource_path()));

    for (name, value) in descriptor.params() {
        if SECRET_PARAMS.contains(&name) || name == "pageToken" {
            continue;
        }
        let canonical_value = match value {
            ParamValue::Single(v) => Value::from(v.as_str()),
            ParamValue::Many(vs) => {
                let mut sorted = vs.clone();
                sorted.sort();
                Value::from(sorted)
            }
        };
        canonical.insert(name, canonical_value);
    }

    // BTreeMap serializes in lexicographic key order, which is the
    // whole point: the serialization is the canonical form.
    let body = serde_json::to_string(&canonical)
        .unwrap_or_else(|_| format!("{{\"#kind\":\"{}\"}}", descriptor.kind().resource_path()));

    match descriptor.get("pageToken") {
        Some(ParamValue::Single(token)) if page::token_continues(Some(token.as_str())) => {
            format!("{}#page={}", body, token)
        }
        _ => body,
    }
}
