// src/service.rs
//! Service facade wiring the engine to its collaborators.
//!
//! `MetadataService` holds the capability registry, the response cache
//! and the page fetcher, and hands out one configured
//! [`PagedRequest`] per caller-initiated logical request. Each entity
//! kind pairs its concrete request type with its converter here, in one
//! place, at startup.

use crate::api::{
    CapabilityBinding, CapabilityRegistry, CaptionListRequest, ChannelListRequest, ClientState,
    Converter, ListRequest, MemoryCache, NoopCache, PagedRequest, PageFetcher,
    PlaylistItemListRequest, PlaylistListRequest, ResponseCache, SearchListRequest,
    VideoListRequest, YouTubeHttpClient,
};
use crate::config::ClientConfig;
use crate::error::Error;
use crate::model::{
    convert, Caption, Channel, Playlist, PlaylistItem, SearchHit, Video,
};
use crate::types::{ChannelId, PlaylistId, VideoId};
use std::any::Any;
use std::sync::Arc;

/// The caller-facing entry point for YouTube metadata retrieval.
pub struct MetadataService {
    config: ClientConfig,
    registry: Arc<CapabilityRegistry>,
    cache: Arc<dyn ResponseCache>,
    fetcher: Arc<dyn PageFetcher>,
}

impl MetadataService {
    /// Builds a service with the default HTTP fetcher, the built-in
    /// capability bindings and an in-memory cache.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let fetcher: Arc<dyn PageFetcher> =
            Arc::new(YouTubeHttpClient::new(config.api_key.clone())?);
        let cache: Arc<dyn ResponseCache> = if config.no_cache {
            Arc::new(NoopCache)
        } else {
            Arc::new(MemoryCache::new(config.cache_capacity))
        };
        Ok(Self::with_parts(
            config,
            Arc::new(builtin_registry()),
            cache,
            fetcher,
        ))
    }

    /// Builds a service from explicit collaborators. This is the seam
    /// tests and alternative deployments (replay cache, fake fetcher)
    /// plug into.
    pub fn with_parts(
        config: ClientConfig,
        registry: Arc<CapabilityRegistry>,
        cache: Arc<dyn ResponseCache>,
        fetcher: Arc<dyn PageFetcher>,
    ) -> Self {
        Self {
            config,
            registry,
            cache,
            fetcher,
        }
    }

    fn paged<R, D>(&self, mut request: R, converter: Converter<D>) -> PagedRequest<R, D>
    where
        R: ListRequest,
        D: Send + 'static,
    {
        let binding = self.registry.binding_for::<R>();
        binding.apply_page_size(&mut request as &mut dyn Any, self.config.page_size);
        let state = ClientState::new(
            request,
            binding,
            converter,
            Arc::clone(&self.cache),
            Arc::clone(&self.fetcher),
        );
        PagedRequest::new(state, self.config.page_ceiling)
    }

    /// Channels by ID.
    pub fn list_channels(&self, ids: &[ChannelId]) -> PagedRequest<ChannelListRequest, Channel> {
        self.paged(ChannelListRequest::by_ids(ids), Arc::new(convert::channel_from_raw))
    }

    /// A channel's playlists.
    pub fn list_playlists(
        &self,
        channel_id: ChannelId,
    ) -> PagedRequest<PlaylistListRequest, Playlist> {
        self.paged(
            PlaylistListRequest::by_channel(channel_id),
            Arc::new(convert::playlist_from_raw),
        )
    }

    /// A playlist's entries.
    pub fn list_playlist_items(
        &self,
        playlist_id: PlaylistId,
    ) -> PagedRequest<PlaylistItemListRequest, PlaylistItem> {
        self.paged(
            PlaylistItemListRequest::by_playlist(playlist_id),
            Arc::new(convert::playlist_item_from_raw),
        )
    }

    /// Videos by ID.
    pub fn list_videos(&self, ids: &[VideoId]) -> PagedRequest<VideoListRequest, Video> {
        self.paged(VideoListRequest::by_ids(ids), Arc::new(convert::video_from_raw))
    }

    /// A video's caption tracks.
    pub fn list_captions(&self, video_id: VideoId) -> PagedRequest<CaptionListRequest, Caption> {
        self.paged(
            CaptionListRequest::by_video(video_id),
            Arc::new(convert::caption_from_raw),
        )
    }

    /// Free-text search across videos, channels and playlists.
    pub fn search(&self, query: impl Into<String>) -> PagedRequest<SearchListRequest, SearchHit> {
        self.paged(
            SearchListRequest::by_query(query),
            Arc::new(convert::search_hit_from_raw),
        )
    }
}

/// Registers the capability bindings for every supported request type.
///
/// This is the one place that knows which optional behaviors each
/// vendor endpoint supports. Notably absent entries are deliberate:
/// `captions.list` does not paginate, and neither `playlistItems.list`
/// nor `search.list` accepts a language hint.
pub fn builtin_registry() -> CapabilityRegistry {
    let registry = CapabilityRegistry::new();

    registry.register::<ChannelListRequest>(
        CapabilityBinding::new()
            .language_hint_from::<ChannelListRequest>(|r| r.hl.clone())
            .page_size_into::<ChannelListRequest>(|r, n| r.max_results = Some(n))
            .page_token_into::<ChannelListRequest>(|r, t| r.page_token = t)
            .language_hint_into::<Channel>(|c, hl| c.language_hint = Some(hl.to_string()))
            .parent_id_into::<Channel>(|c, etag| c.etag = Some(etag.to_string())),
    );

    registry.register::<PlaylistListRequest>(
        CapabilityBinding::new()
            .language_hint_from::<PlaylistListRequest>(|r| r.hl.clone())
            .page_size_into::<PlaylistListRequest>(|r, n| r.max_results = Some(n))
            .page_token_into::<PlaylistListRequest>(|r, t| r.page_token = t)
            .language_hint_into::<Playlist>(|p, hl| p.language_hint = Some(hl.to_string()))
            .parent_id_into::<Playlist>(|p, etag| p.etag = Some(etag.to_string())),
    );

    registry.register::<PlaylistItemListRequest>(
        CapabilityBinding::new()
            .page_size_into::<PlaylistItemListRequest>(|r, n| r.max_results = Some(n))
            .page_token_into::<PlaylistItemListRequest>(|r, t| r.page_token = t)
            .parent_id_into::<PlaylistItem>(|i, etag| i.etag = Some(etag.to_string())),
    );

    registry.register::<VideoListRequest>(
        CapabilityBinding::new()
            .language_hint_from::<VideoListRequest>(|r| r.hl.clone())
            .page_size_into::<VideoListRequest>(|r, n| r.max_results = Some(n))
            .page_token_into::<VideoListRequest>(|r, t| r.page_token = t)
            .language_hint_into::<Video>(|v, hl| v.language_hint = Some(hl.to_string()))
            .parent_id_into::<Video>(|v, etag| v.etag = Some(etag.to_string())),
    );

    registry.register::<CaptionListRequest>(
        CapabilityBinding::new()
            .parent_id_into::<Caption>(|c, etag| c.etag = Some(etag.to_string())),
    );

    registry.register::<SearchListRequest>(
        CapabilityBinding::new()
            .page_size_into::<SearchListRequest>(|r, n| r.max_results = Some(n))
            .page_token_into::<SearchListRequest>(|r, t| r.page_token = t)
            .parent_id_into::<SearchHit>(|h, etag| h.etag = Some(etag.to_string())),
    );

    registry
}
