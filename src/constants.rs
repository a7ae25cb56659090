// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you the story of
//! how the system operates: how large a page it asks for, how many pages
//! one caller action may consume, how much it caches.

// ---------------------------------------------------------------------------
// YouTube API boundaries
// ---------------------------------------------------------------------------

/// How many resources the YouTube API returns per page of results.
///
/// The API maximum for list endpoints is 50. We use the maximum to
/// minimize round-trips, since every round-trip costs metered quota.
pub const YOUTUBE_API_PAGE_SIZE: u32 = 50;

/// Maximum number of pages one logical request may fetch.
///
/// A single caller action must never exhaust the process-wide metered
/// quota by paging indefinitely. Reaching the ceiling silently ends
/// iteration as if the vendor had returned a terminal page; the
/// truncation is logged because result sets may be incomplete.
pub const PAGE_CEILING_DEFAULT: u32 = 3;

// ---------------------------------------------------------------------------
// Part selectors
// ---------------------------------------------------------------------------

/// Resource parts requested for `channels.list`.
pub const CHANNEL_LIST_PARTS: &str = "snippet,contentDetails,statistics";

/// Resource parts requested for `playlists.list`.
pub const PLAYLIST_LIST_PARTS: &str = "snippet,contentDetails";

/// Resource parts requested for `playlistItems.list`.
pub const PLAYLIST_ITEM_LIST_PARTS: &str = "snippet,contentDetails";

/// Resource parts requested for `videos.list`.
pub const VIDEO_LIST_PARTS: &str = "snippet,contentDetails,statistics";

/// Resource parts requested for `captions.list`.
pub const CAPTION_LIST_PARTS: &str = "snippet";

/// Resource parts requested for `search.list`.
pub const SEARCH_LIST_PARTS: &str = "snippet";

// ---------------------------------------------------------------------------
// Response cache boundaries
// ---------------------------------------------------------------------------

/// How many raw pages the in-memory response cache retains.
///
/// Sized for a service process juggling a few dozen concurrent logical
/// requests; least-recently-used pages are evicted beyond this.
pub const RESPONSE_CACHE_CAPACITY: usize = 256;

/// How long a cached raw page stays valid, in seconds.
pub const RESPONSE_CACHE_TTL_SECS: u64 = 300;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
