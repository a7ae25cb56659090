// src/api/request.rs
//! Logical request identity and parameters.
//!
//! The vendor exposes one structurally similar but not interface
//! compatible request shape per list endpoint. Each shape is a concrete
//! struct here; the generic engine sees them only through
//! [`ListRequest`] (identity + parameter set) and through the optional
//! capabilities registered in [`super::capability::CapabilityRegistry`].

use crate::constants::{
    CAPTION_LIST_PARTS, CHANNEL_LIST_PARTS, PLAYLIST_ITEM_LIST_PARTS, PLAYLIST_LIST_PARTS,
    SEARCH_LIST_PARTS, VIDEO_LIST_PARTS,
};
use crate::types::{ChannelId, PlaylistId, VideoId};
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;

/// The vendor list endpoint a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Channels,
    Playlists,
    PlaylistItems,
    Videos,
    Captions,
    Search,
}

impl RequestKind {
    /// The URL path segment for this endpoint under the API base.
    pub fn resource_path(&self) -> &'static str {
        match self {
            Self::Channels => "channels",
            Self::Playlists => "playlists",
            Self::PlaylistItems => "playlistItems",
            Self::Videos => "videos",
            Self::Captions => "captions",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resource_path())
    }
}

/// One request parameter value: a scalar or a list.
///
/// List values keep their caller-supplied order here; canonicalization
/// (sorting) happens only in the key builder, so the wire request
/// preserves whatever order the caller chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

/// Identity of a vendor request plus its parameter set.
///
/// Derived fresh from a concrete request struct before every page fetch,
/// so it always reflects the current cursor. Parameters keep insertion
/// order for readable URLs and logs; ordering never affects the cache
/// key.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    kind: RequestKind,
    params: IndexMap<String, ParamValue>,
}

/// Parameter names that must never reach a cache key.
///
/// Fixed denylist of credentials and per-user quota tags. `pageToken`
/// is not secret but is also excluded from the parameter map portion of
/// the key, because the key builder appends it as a trailing field.
pub const SECRET_PARAMS: [&str; 5] = [
    "key",
    "access_token",
    "onBehalfOfContentOwner",
    "onBehalfOfContentOwnerChannel",
    "quotaUser",
];

impl RequestDescriptor {
    pub fn new(kind: RequestKind) -> Self {
        Self {
            kind,
            params: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Sets a scalar parameter, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.params
            .insert(name.to_string(), ParamValue::Single(value.into()));
    }

    /// Sets a scalar parameter only when a value is present.
    pub fn set_opt(&mut self, name: &str, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Sets a list parameter, replacing any previous value.
    pub fn set_list<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.insert(
            name.to_string(),
            ParamValue::Many(values.into_iter().map(Into::into).collect()),
        );
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// Iterates parameters in insertion order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The common contract every vendor list request satisfies.
///
/// Deliberately minimal: identity and parameters. Everything optional
/// (language hints, paging, page size) lives in capability bindings so
/// that a request type lacking a feature simply never sees it.
pub trait ListRequest: Any + Send + Sync + 'static {
    fn kind(&self) -> RequestKind;
    fn descriptor(&self) -> RequestDescriptor;
}

// ---------------------------------------------------------------------------
// Concrete request shapes
// ---------------------------------------------------------------------------

/// `channels.list` request.
#[derive(Debug, Clone)]
pub struct ChannelListRequest {
    pub part: String,
    pub ids: Vec<ChannelId>,
    pub hl: Option<String>,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
}

impl ChannelListRequest {
    pub fn by_ids(ids: &[ChannelId]) -> Self {
        Self {
            part: CHANNEL_LIST_PARTS.to_string(),
            ids: ids.to_vec(),
            hl: None,
            max_results: None,
            page_token: None,
        }
    }
}

impl ListRequest for ChannelListRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Channels
    }

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(self.kind());
        descriptor.set("part", &self.part);
        descriptor.set_list("id", self.ids.iter().map(|id| id.as_str().to_string()));
        descriptor.set_opt("hl", self.hl.clone());
        descriptor.set_opt("maxResults", self.max_results.map(|n| n.to_string()));
        descriptor.set_opt("pageToken", self.page_token.clone());
        descriptor
    }
}

/// `playlists.list` request for a channel's playlists.
#[derive(Debug, Clone)]
pub struct PlaylistListRequest {
    pub part: String,
    pub channel_id: ChannelId,
    pub hl: Option<String>,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
}

impl PlaylistListRequest {
    pub fn by_channel(channel_id: ChannelId) -> Self {
        Self {
            part: PLAYLIST_LIST_PARTS.to_string(),
            channel_id,
            hl: None,
            max_results: None,
            page_token: None,
        }
    }
}

impl ListRequest for PlaylistListRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Playlists
    }

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(self.kind());
        descriptor.set("part", &self.part);
        descriptor.set("channelId", self.channel_id.as_str());
        descriptor.set_opt("hl", self.hl.clone());
        descriptor.set_opt("maxResults", self.max_results.map(|n| n.to_string()));
        descriptor.set_opt("pageToken", self.page_token.clone());
        descriptor
    }
}

/// `playlistItems.list` request for a playlist's entries.
///
/// The endpoint has no `hl` parameter; item titles come in the
/// playlist's own language.
#[derive(Debug, Clone)]
pub struct PlaylistItemListRequest {
    pub part: String,
    pub playlist_id: PlaylistId,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
}

impl PlaylistItemListRequest {
    pub fn by_playlist(playlist_id: PlaylistId) -> Self {
        Self {
            part: PLAYLIST_ITEM_LIST_PARTS.to_string(),
            playlist_id,
            max_results: None,
            page_token: None,
        }
    }
}

impl ListRequest for PlaylistItemListRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::PlaylistItems
    }

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(self.kind());
        descriptor.set("part", &self.part);
        descriptor.set("playlistId", self.playlist_id.as_str());
        descriptor.set_opt("maxResults", self.max_results.map(|n| n.to_string()));
        descriptor.set_opt("pageToken", self.page_token.clone());
        descriptor
    }
}

/// `videos.list` request.
#[derive(Debug, Clone)]
pub struct VideoListRequest {
    pub part: String,
    pub ids: Vec<VideoId>,
    pub hl: Option<String>,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
}

impl VideoListRequest {
    pub fn by_ids(ids: &[VideoId]) -> Self {
        Self {
            part: VIDEO_LIST_PARTS.to_string(),
            ids: ids.to_vec(),
            hl: None,
            max_results: None,
            page_token: None,
        }
    }
}

impl ListRequest for VideoListRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Videos
    }

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(self.kind());
        descriptor.set("part", &self.part);
        descriptor.set_list("id", self.ids.iter().map(|id| id.as_str().to_string()));
        descriptor.set_opt("hl", self.hl.clone());
        descriptor.set_opt("maxResults", self.max_results.map(|n| n.to_string()));
        descriptor.set_opt("pageToken", self.page_token.clone());
        descriptor
    }
}

/// `captions.list` request for a video's caption tracks.
///
/// The endpoint returns every track in one response: no `pageToken`, no
/// `maxResults`, no `hl`. Its capability binding therefore carries no
/// paging handles, which is exactly the case the engine must treat as a
/// no-op rather than an error.
#[derive(Debug, Clone)]
pub struct CaptionListRequest {
    pub part: String,
    pub video_id: VideoId,
}

impl CaptionListRequest {
    pub fn by_video(video_id: VideoId) -> Self {
        Self {
            part: CAPTION_LIST_PARTS.to_string(),
            video_id,
        }
    }
}

impl ListRequest for CaptionListRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Captions
    }

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(self.kind());
        descriptor.set("part", &self.part);
        descriptor.set("videoId", self.video_id.as_str());
        descriptor
    }
}

/// `search.list` request.
#[derive(Debug, Clone)]
pub struct SearchListRequest {
    pub part: String,
    pub query: String,
    pub channel_id: Option<ChannelId>,
    /// Comma-separated resource kinds to search, e.g. `"video,playlist"`.
    pub result_type: Option<String>,
    pub max_results: Option<u32>,
    pub page_token: Option<String>,
}

impl SearchListRequest {
    pub fn by_query(query: impl Into<String>) -> Self {
        Self {
            part: SEARCH_LIST_PARTS.to_string(),
            query: query.into(),
            channel_id: None,
            result_type: None,
            max_results: None,
            page_token: None,
        }
    }
}

impl ListRequest for SearchListRequest {
    fn kind(&self) -> RequestKind {
        RequestKind::Search
    }

    fn descriptor(&self) -> RequestDescriptor {
        let mut descriptor = RequestDescriptor::new(self.kind());
        descriptor.set("part", &self.part);
        descriptor.set("q", &self.query);
        descriptor.set_opt("channelId", self.channel_id.as_ref().map(|id| id.as_str()));
        descriptor.set_opt("type", self.result_type.clone());
        descriptor.set_opt("maxResults", self.max_results.map(|n| n.to_string()));
        descriptor.set_opt("pageToken", self.page_token.clone());
        descriptor
    }
}
