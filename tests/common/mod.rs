// tests/common/mod.rs
//! Shared test doubles for driving the engine without a network.

// Each integration test binary compiles its own copy; not every binary
// uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use ytmeta::{Error, PageFetcher, RawPage, RequestDescriptor};

/// A fetcher that replays a fixed script of page results and counts
/// how many vendor calls it served.
pub struct ScriptedFetcher {
    script: Mutex<VecDeque<Result<RawPage, Error>>>,
    seen: Mutex<Vec<RequestDescriptor>>,
    calls: AtomicU32,
}

impl ScriptedFetcher {
    pub fn new(script: Vec<Result<RawPage, Error>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every descriptor this fetcher was asked to execute, in order.
    pub fn seen(&self) -> Vec<RequestDescriptor> {
        self.seen.lock().expect("seen mutex poisoned").clone()
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch_page(&self, descriptor: &RequestDescriptor) -> Result<RawPage, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .expect("seen mutex poisoned")
            .push(descriptor.clone());
        self.script
            .lock()
            .expect("script mutex poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(RawPage::default()))
    }
}

/// Builds a raw page from pre-parsed vendor items.
pub fn page(items: Vec<Value>, next_page_token: Option<&str>, etag: Option<&str>) -> RawPage {
    RawPage {
        items,
        next_page_token: next_page_token.map(str::to_owned),
        etag: etag.map(str::to_owned),
        page_info: None,
    }
}

/// A minimal raw `video` resource.
pub fn video_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "snippet": { "title": title }
    })
}

/// A minimal raw `caption` resource.
pub fn caption_json(id: &str, language: &str) -> Value {
    json!({
        "id": id,
        "snippet": { "videoId": "dQw4w9WgXcQ", "language": language, "trackKind": "standard" }
    })
}

/// An untriaged vendor failure the way the HTTP layer produces them.
pub fn vendor_failure(status: u16, domain: &str, reason: &str) -> Error {
    Error::VendorFailure {
        status,
        domain: domain.to_string(),
        reason: reason.to_string(),
        message: format!("scripted {} failure", status),
    }
}
