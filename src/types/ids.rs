use super::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for resource IDs with phantom types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different ID kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaylistMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionMarker;

/// Type aliases for specific ID types
pub type ChannelId = Id<ChannelMarker>;
pub type PlaylistId = Id<PlaylistMarker>;
pub type VideoId = Id<VideoMarker>;
pub type CaptionId = Id<CaptionMarker>;

impl<T> Id<T> {
    /// Create an ID from a bare identifier string, with validation.
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let value = input.into();
        validate_id_chars(&value)?;
        Ok(Self {
            value,
            _phantom: PhantomData,
        })
    }

    /// Create an ID from an already validated string (internal use)
    pub(crate) fn from_validated(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the ID as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        validate_id_chars(&value).map_err(serde::de::Error::custom)?;
        Ok(Self::from_validated(value))
    }
}

/// YouTube IDs are URL-safe base64-ish tokens. This accepts any such
/// token of plausible length rather than enforcing per-resource prefixes
/// (`UC`, `PL`, ...), which the vendor does not guarantee.
fn validate_id_chars(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() || input.len() > 64 {
        return Err(ValidationError::InvalidId(format!(
            "Invalid ID length: expected 1..=64 characters, got {}",
            input.len()
        )));
    }
    if !input
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ValidationError::InvalidId(
            "ID must contain only alphanumeric characters, '_' or '-'".to_string(),
        ));
    }
    Ok(())
}

impl VideoId {
    /// Parses a bare video ID or any common YouTube watch URL.
    ///
    /// Accepted URL shapes: `watch?v=<id>`, `youtu.be/<id>`,
    /// `/shorts/<id>`, `/embed/<id>`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        lazy_static! {
            static ref VIDEO_URL_RE: Regex = Regex::new(
                r"(?:[?&]v=|youtu\.be/|/shorts/|/embed/)([A-Za-z0-9_-]{11})(?:[&?/#]|$)"
            )
            .expect("video URL regex is valid");
        }

        let cleaned = input.trim();
        if cleaned.contains('/') || cleaned.contains('?') {
            if let Some(captures) = VIDEO_URL_RE.captures(cleaned) {
                if let Some(id) = captures.get(1) {
                    return Self::new(id.as_str());
                }
            }
            return Err(ValidationError::InvalidUrl {
                url: cleaned.to_string(),
                reason: "No video ID found in URL".to_string(),
            });
        }
        Self::new(cleaned)
    }
}

impl PlaylistId {
    /// Parses a bare playlist ID or a URL carrying a `list=` parameter.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        lazy_static! {
            static ref PLAYLIST_URL_RE: Regex =
                Regex::new(r"[?&]list=([A-Za-z0-9_-]+)(?:[&#]|$)")
                    .expect("playlist URL regex is valid");
        }

        let cleaned = input.trim();
        if cleaned.contains('/') || cleaned.contains('?') {
            if let Some(captures) = PLAYLIST_URL_RE.captures(cleaned) {
                if let Some(id) = captures.get(1) {
                    return Self::new(id.as_str());
                }
            }
            return Err(ValidationError::InvalidUrl {
                url: cleaned.to_string(),
                reason: "No playlist ID found in URL".to_string(),
            });
        }
        Self::new(cleaned)
    }
}

impl ChannelId {
    /// Parses a bare channel ID or a `/channel/<id>` URL.
    ///
    /// Handle-style URLs (`/@name`) are not resolvable offline; the
    /// vendor requires a `forHandle` lookup for those.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        lazy_static! {
            static ref CHANNEL_URL_RE: Regex =
                Regex::new(r"/channel/([A-Za-z0-9_-]+)(?:[/?#]|$)")
                    .expect("channel URL regex is valid");
        }

        let cleaned = input.trim().trim_end_matches('/');
        if cleaned.contains('/') {
            if let Some(captures) = CHANNEL_URL_RE.captures(cleaned) {
                if let Some(id) = captures.get(1) {
                    return Self::new(id.as_str());
                }
            }
            return Err(ValidationError::InvalidUrl {
                url: cleaned.to_string(),
                reason: "No channel ID found in URL".to_string(),
            });
        }
        Self::new(cleaned)
    }
}
