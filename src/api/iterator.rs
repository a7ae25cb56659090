// src/api/iterator.rs
//! The caller-facing page iterator with quota protection.
//!
//! Every vendor page costs metered quota, so a single caller action is
//! never allowed to page indefinitely: after the page ceiling the
//! iterator ends as if the vendor had returned a terminal page. Vendor
//! failures are triaged here; "not found" recovers as an empty terminal
//! page, everything else is fatal for the logical request.

use super::request::ListRequest;
use super::state::ClientState;
use crate::error::{Error, FailureKind};

/// One logical request's iterator over pages of converted domain items.
///
/// Not an `Iterator` impl: advancing performs async I/O, and the page
/// is the natural unit the quota guard accounts in.
pub struct PagedRequest<R, D> {
    state: ClientState<R, D>,
    page_ceiling: u32,
}

impl<R, D> PagedRequest<R, D>
where
    R: ListRequest,
    D: Send + 'static,
{
    pub fn new(state: ClientState<R, D>, page_ceiling: u32) -> Self {
        Self {
            state,
            page_ceiling,
        }
    }

    /// Whether another `next_page` call can produce data.
    pub fn has_next(&self) -> bool {
        !self.state.has_failed() && !self.state.is_finished()
    }

    /// Pages fetched so far for this logical request.
    pub fn pages_fetched(&self) -> u32 {
        self.state.pages_fetched()
    }

    /// Fetches the next page of converted items.
    ///
    /// Returns an empty vec without error when the request is already
    /// exhausted (caller misuse, logged), when the page ceiling is
    /// reached, or when the vendor reports the resource does not exist.
    /// Any other vendor failure marks the request permanently failed
    /// and surfaces as a typed error; retrying requires a new logical
    /// request, since partial pagination state is not resumable.
    pub async fn next_page(&mut self) -> Result<Vec<D>, Error> {
        if !self.has_next() {
            log::warn!("next_page called on an exhausted request");
            return Ok(Vec::new());
        }

        if self.state.pages_fetched() >= self.page_ceiling {
            log::warn!(
                "page ceiling ({}) reached; ending iteration with the vendor still offering pages, result set may be incomplete",
                self.page_ceiling
            );
            self.state.mark_finished();
            return Ok(Vec::new());
        }

        match self.state.update().await {
            Ok(()) => {
                if self.state.cursor_is_terminal() {
                    self.state.mark_finished();
                }
                Ok(self.state.take_items())
            }
            Err(err) => match err.failure_kind() {
                FailureKind::NotFoundAsEmpty => {
                    log::debug!("resource not found, treating as empty result");
                    self.state.mark_finished();
                    Ok(Vec::new())
                }
                _ => {
                    self.state.mark_failed();
                    Err(err.into_classified())
                }
            },
        }
    }

    /// Drains every remaining page into one vec, stopping at the page
    /// ceiling like any other caller would.
    pub async fn collect_all(mut self) -> Result<Vec<D>, Error> {
        let mut all_items = Vec::new();
        while self.has_next() {
            all_items.extend(self.next_page().await?);
        }
        Ok(all_items)
    }
}
