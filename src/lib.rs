// src/lib.rs
//! ytmeta library — a service layer for YouTube metadata retrieval.
//!
//! Fetches channels, playlists, playlist items, videos, caption tracks
//! and search results from the paginated, quota-metered YouTube Data
//! API v3 and maps vendor resources into local domain entities.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `Error`, `FailureKind`, `VendorReason`, `ValidationError`
//! - **Configuration** — `ClientConfig`
//! - **Domain model** — `Channel`, `Playlist`, `PlaylistItem`, `Video`, `Caption`, `SearchHit`
//! - **Domain types** — `ChannelId`, `PlaylistId`, `VideoId`, `ApiKey`
//! - **Engine** — `PagedRequest`, `ClientState`, `CapabilityRegistry`, caches, `YouTubeHttpClient`
//! - **Service facade** — `MetadataService`
//!
//! # Example
//!
//! ```no_run
//! use ytmeta::{ClientConfig, MetadataService, VideoId};
//!
//! # async fn example() -> Result<(), ytmeta::Error> {
//! let service = MetadataService::new(ClientConfig::from_env()?)?;
//! let id = VideoId::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ")?;
//!
//! let mut pages = service.list_videos(&[id]);
//! while pages.has_next() {
//!     for video in pages.next_page().await? {
//!         println!("{}: {}", video.id, video.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod model;
mod service;
mod types;

// --- Error Handling ---
pub use crate::error::{classify_failure, Error, FailureKind, VendorReason};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::ClientConfig;

// --- Domain Model ---
pub use crate::model::{
    convert, Caption, Channel, Playlist, PlaylistItem, SearchHit, SearchHitKind, Video,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, CaptionId, ChannelId, Id, PlaylistId, VideoId};

// --- Engine ---
pub use crate::api::{
    build_key, token_continues, CapabilityBinding, CapabilityRegistry, CaptionListRequest,
    ChannelListRequest, ClientState, Converter, ListRequest, MemoryCache, NoopCache, PageFetcher,
    PageInfo, PagedRequest, ParamValue, PlaylistItemListRequest, PlaylistListRequest, RawPage,
    ReplayCache, RequestDescriptor, RequestKind, ResponseCache, SearchListRequest,
    VideoListRequest, YouTubeHttpClient,
};

// --- Caller-side recovery ---
pub use crate::error_recovery::retry_with_backoff;

// --- Service Facade ---
pub use crate::service::{builtin_registry, MetadataService};
