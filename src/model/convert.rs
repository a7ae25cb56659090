// src/model/convert.rs
//! Raw vendor resources to domain entities.
//!
//! One pure converter per entity kind, each total over missing optional
//! fields. Only an absent resource `id` is a conversion failure; every
//! other field degrades to `None`. Counts arrive as JSON strings from
//! the vendor (`"viewCount": "1024"`), so numeric extraction accepts
//! both strings and numbers.

use super::{Caption, Channel, Playlist, PlaylistItem, SearchHit, SearchHitKind, Video};
use crate::error::Error;
use crate::types::{CaptionMarker, ChannelMarker, Id, PlaylistMarker, VideoMarker};
use chrono::{DateTime, Utc};
use serde_json::Value;

fn str_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn time_at(value: &Value, pointer: &str) -> Option<DateTime<Utc>> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
}

fn count_at(value: &Value, pointer: &str) -> Option<u64> {
    match value.pointer(pointer) {
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    }
}

fn id_at<T>(value: &Value, pointer: &str) -> Option<Id<T>> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .and_then(|s| Id::new(s).ok())
}

fn required_id<T>(raw: &Value, resource: &'static str) -> Result<Id<T>, Error> {
    raw.get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedResponse(format!("{} resource missing id", resource)))
        .and_then(|s| Id::new(s).map_err(Error::from))
}

/// Converts one raw `channel` resource.
pub fn channel_from_raw(raw: &Value) -> Result<Channel, Error> {
    Ok(Channel {
        id: required_id::<ChannelMarker>(raw, "channel")?,
        title: str_at(raw, "/snippet/title").unwrap_or_default(),
        description: str_at(raw, "/snippet/description"),
        published_at: time_at(raw, "/snippet/publishedAt"),
        subscriber_count: count_at(raw, "/statistics/subscriberCount"),
        video_count: count_at(raw, "/statistics/videoCount"),
        etag: None,
        language_hint: None,
    })
}

/// Converts one raw `playlist` resource.
pub fn playlist_from_raw(raw: &Value) -> Result<Playlist, Error> {
    Ok(Playlist {
        id: required_id::<PlaylistMarker>(raw, "playlist")?,
        channel_id: id_at::<ChannelMarker>(raw, "/snippet/channelId"),
        title: str_at(raw, "/snippet/title").unwrap_or_default(),
        description: str_at(raw, "/snippet/description"),
        published_at: time_at(raw, "/snippet/publishedAt"),
        item_count: count_at(raw, "/contentDetails/itemCount"),
        etag: None,
        language_hint: None,
    })
}

/// Converts one raw `playlistItem` resource.
///
/// The target video ID appears under both `snippet.resourceId.videoId`
/// and `contentDetails.videoId` depending on requested parts; either is
/// accepted.
pub fn playlist_item_from_raw(raw: &Value) -> Result<PlaylistItem, Error> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedResponse("playlistItem resource missing id".to_string()))?;
    Ok(PlaylistItem {
        id: id.to_string(),
        playlist_id: id_at::<PlaylistMarker>(raw, "/snippet/playlistId"),
        video_id: id_at::<VideoMarker>(raw, "/snippet/resourceId/videoId")
            .or_else(|| id_at::<VideoMarker>(raw, "/contentDetails/videoId")),
        title: str_at(raw, "/snippet/title").unwrap_or_default(),
        position: count_at(raw, "/snippet/position"),
        published_at: time_at(raw, "/snippet/publishedAt"),
        etag: None,
    })
}

/// Converts one raw `video` resource.
pub fn video_from_raw(raw: &Value) -> Result<Video, Error> {
    Ok(Video {
        id: required_id::<VideoMarker>(raw, "video")?,
        channel_id: id_at::<ChannelMarker>(raw, "/snippet/channelId"),
        title: str_at(raw, "/snippet/title").unwrap_or_default(),
        description: str_at(raw, "/snippet/description"),
        published_at: time_at(raw, "/snippet/publishedAt"),
        duration: str_at(raw, "/contentDetails/duration"),
        view_count: count_at(raw, "/statistics/viewCount"),
        like_count: count_at(raw, "/statistics/likeCount"),
        etag: None,
        language_hint: None,
    })
}

/// Converts one raw `caption` resource.
pub fn caption_from_raw(raw: &Value) -> Result<Caption, Error> {
    Ok(Caption {
        id: required_id::<CaptionMarker>(raw, "caption")?,
        video_id: id_at::<VideoMarker>(raw, "/snippet/videoId"),
        language: str_at(raw, "/snippet/language"),
        track_kind: str_at(raw, "/snippet/trackKind"),
        last_updated: time_at(raw, "/snippet/lastUpdated"),
        etag: None,
    })
}

/// Converts one raw `searchResult` resource.
///
/// Search results nest their identity: `id.kind` names the resource
/// kind and the matching `id.videoId`/`id.channelId`/`id.playlistId`
/// field carries the actual ID.
pub fn search_hit_from_raw(raw: &Value) -> Result<SearchHit, Error> {
    let (kind, id) = if let Some(id) = str_at(raw, "/id/videoId") {
        (SearchHitKind::Video, id)
    } else if let Some(id) = str_at(raw, "/id/channelId") {
        (SearchHitKind::Channel, id)
    } else if let Some(id) = str_at(raw, "/id/playlistId") {
        (SearchHitKind::Playlist, id)
    } else {
        return Err(Error::MalformedResponse(
            "search result carries no resource id".to_string(),
        ));
    };

    Ok(SearchHit {
        id,
        kind,
        title: str_at(raw, "/snippet/title").unwrap_or_default(),
        channel_id: id_at::<ChannelMarker>(raw, "/snippet/channelId"),
        published_at: time_at(raw, "/snippet/publishedAt"),
        etag: None,
    })
}
