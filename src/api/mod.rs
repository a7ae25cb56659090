// src/api/mod.rs
//! The paginated request engine.
//!
//! This module drives repeated calls against the vendor's paginated
//! list endpoints with clear separation between the generic machinery
//! (canonical keys, capability bindings, pagination state, the
//! quota-guarded iterator) and the injected collaborators (page
//! fetcher, converter, response cache).

pub mod cache;
pub mod capability;
pub mod http;
pub mod iterator;
pub mod key;
pub mod page;
pub mod request;
pub mod state;

use crate::error::Error;
use async_trait::async_trait;
use std::sync::Arc;

/// The ability to execute exactly one vendor call for a request's
/// current state and return the raw page.
///
/// The engine owns pagination, caching and error triage; a fetcher owns
/// nothing but the wire. Errors it raises should be
/// [`Error::VendorFailure`] when the vendor answered with a structured
/// error body and [`Error::Transport`] when there was no HTTP response.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, descriptor: &request::RequestDescriptor) -> Result<page::RawPage, Error>;
}

/// A pure conversion from one raw vendor resource to a domain entity.
/// One converter per entity kind; no side effects, no partial failure.
pub type Converter<D> = Arc<dyn Fn(&serde_json::Value) -> Result<D, Error> + Send + Sync>;

// Re-export the public interface
pub use cache::{MemoryCache, NoopCache, ReplayCache, ResponseCache};
pub use capability::{CapabilityBinding, CapabilityRegistry};
pub use http::YouTubeHttpClient;
pub use iterator::PagedRequest;
pub use key::build_key;
pub use page::{token_continues, PageInfo, RawPage};
pub use request::{
    CaptionListRequest, ChannelListRequest, ListRequest, ParamValue, PlaylistItemListRequest,
    PlaylistListRequest, RequestDescriptor, RequestKind, SearchListRequest, VideoListRequest,
};
pub use state::ClientState;
