// src/model/mod.rs
//! Local domain entities produced from vendor resources.
//!
//! These are the shapes the rest of the application works with. They
//! carry only the fields the service layer actually serves; the raw
//! vendor resources hold far more. Each entity's `etag` and
//! `language_hint` are not part of the vendor item itself: the engine
//! propagates them from the response envelope and the originating
//! request through capability bindings.

pub mod convert;

use crate::types::{CaptionId, ChannelId, PlaylistId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A YouTube channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub subscriber_count: Option<u64>,
    pub video_count: Option<u64>,
    /// Response-level etag propagated onto each item of the page.
    pub etag: Option<String>,
    /// The `hl` the originating request asked titles to be localized in.
    pub language_hint: Option<String>,
}

/// A playlist owned by a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub channel_id: Option<ChannelId>,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub item_count: Option<u64>,
    pub etag: Option<String>,
    pub language_hint: Option<String>,
}

/// One entry of a playlist, pointing at a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub playlist_id: Option<PlaylistId>,
    pub video_id: Option<VideoId>,
    pub title: String,
    pub position: Option<u64>,
    pub published_at: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}

/// A YouTube video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub channel_id: Option<ChannelId>,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// ISO 8601 duration as reported by the vendor, e.g. `PT4M13S`.
    pub duration: Option<String>,
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
    pub etag: Option<String>,
    pub language_hint: Option<String>,
}

/// A caption track attached to a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub id: CaptionId,
    pub video_id: Option<VideoId>,
    pub language: Option<String>,
    /// `standard` or `asr` (auto-generated).
    pub track_kind: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}

/// What kind of resource a search result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchHitKind {
    Video,
    Channel,
    Playlist,
}

/// One result of a `search.list` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched resource's own ID (video, channel or playlist ID).
    pub id: String,
    pub kind: SearchHitKind,
    pub title: String,
    pub channel_id: Option<ChannelId>,
    pub published_at: Option<DateTime<Utc>>,
    pub etag: Option<String>,
}
