// src/api/state.rs
//! Pagination state for one logical request.
//!
//! A `ClientState` owns everything one logical request accumulates
//! between pages: the concrete vendor request (whose cursor field it
//! rewrites through the capability binding), the current page of
//! converted domain items, the cursor, terminal flags and the
//! pages-fetched counter. It is created once per logical request and
//! never reused; the quota-guarded iterator drives it and reads the
//! flags.

use super::capability::CapabilityBinding;
use super::key::build_key;
use super::page::{self, RawPage};
use super::request::ListRequest;
use super::{Converter, PageFetcher, ResponseCache};
use crate::error::Error;
use std::any::Any;
use std::sync::Arc;

pub struct ClientState<R, D> {
    request: R,
    binding: Arc<CapabilityBinding>,
    converter: Converter<D>,
    cache: Arc<dyn ResponseCache>,
    fetcher: Arc<dyn PageFetcher>,
    items: Vec<D>,
    cursor: Option<String>,
    finished: bool,
    failed: bool,
    pages_fetched: u32,
}

impl<R, D> ClientState<R, D>
where
    R: ListRequest,
    D: Send + 'static,
{
    pub fn new(
        request: R,
        binding: Arc<CapabilityBinding>,
        converter: Converter<D>,
        cache: Arc<dyn ResponseCache>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            request,
            binding,
            converter,
            cache,
            fetcher,
            items: Vec::new(),
            cursor: None,
            finished: false,
            failed: false,
            pages_fetched: 0,
        }
    }

    /// Fetches and converts the next page.
    ///
    /// Writes the current cursor into the request, routes the fetch
    /// through the response cache under the canonical key, converts the
    /// raw items and propagates the page etag plus the request's
    /// language hint onto each converted item. On success the
    /// pages-fetched counter advances and the cursor moves to the
    /// response's next-page token (blank and absent both count as
    /// terminal).
    pub async fn update(&mut self) -> Result<(), Error> {
        let binding = Arc::clone(&self.binding);
        binding.apply_page_token(&mut self.request as &mut dyn Any, self.cursor.as_deref());

        let descriptor = self.request.descriptor();
        let cache_key = build_key(&descriptor);
        log::debug!("fetching {} page under key {}", descriptor.kind(), cache_key);

        let raw_page: RawPage = self
            .cache
            .get_or_fetch(&cache_key, &descriptor, self.fetcher.as_ref())
            .await?;
        self.pages_fetched += 1;

        if raw_page.items.is_empty() {
            self.items.clear();
            self.cursor = None;
            return Ok(());
        }

        let hint = binding.read_language_hint(&self.request as &dyn Any);
        let mut converted = Vec::with_capacity(raw_page.items.len());
        for raw_item in &raw_page.items {
            let mut item = (self.converter)(raw_item)?;
            if let Some(etag) = raw_page.etag.as_deref() {
                binding.apply_parent_id(&mut item as &mut dyn Any, etag);
            }
            if let Some(hint) = hint.as_deref() {
                binding.apply_language_hint(&mut item as &mut dyn Any, hint);
            }
            converted.push(item);
        }
        self.items = converted;

        // A request type that cannot carry a cursor cannot advance past
        // its first page, whatever the response claims.
        self.cursor = if binding.supports_paging() {
            raw_page
                .next_page_token
                .filter(|token| page::token_continues(Some(token.as_str())))
        } else {
            None
        };

        Ok(())
    }

    /// Whether this logical request has been marked complete.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the cursor left by the last update is terminal.
    pub(crate) fn cursor_is_terminal(&self) -> bool {
        self.cursor.is_none()
    }

    /// The current page of converted items.
    pub fn items(&self) -> &[D] {
        &self.items
    }

    /// Hands the current page of items to the caller, leaving the state
    /// empty until the next update.
    pub(crate) fn take_items(&mut self) -> Vec<D> {
        std::mem::take(&mut self.items)
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Whether a fatal failure has been recorded for this request.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }

    pub(crate) fn mark_failed(&mut self) {
        self.failed = true;
    }
}
