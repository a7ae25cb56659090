// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the system.
//! Vendor failures arrive as an ad-hoc (status, domain, reason) triple;
//! `classify_failure` triages that triple into a small set of outcomes
//! that decide what is fatal, what callers may retry, and what is
//! treated as "no data".

use std::fmt;
use thiserror::Error;

/// YouTube API error reasons as a typed vocabulary.
///
/// Instead of matching against magic strings like `"quotaExceeded"`,
/// the vendor's reason codes are encoded in the type system. Each
/// variant tells you exactly what the API reported and enables
/// pattern-based triage without stringly-typed dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorReason {
    /// The supplied API key is invalid or revoked
    KeyInvalid,
    /// The request cannot be completed because the quota was exceeded
    QuotaExceeded,
    /// The daily quota allotment was exhausted
    DailyLimitExceeded,
    /// Too many requests in a short window
    RateLimitExceeded,
    /// Too many requests on behalf of this specific user
    UserRateLimitExceeded,
    /// The caller lacks the elevated authorization the resource requires
    Forbidden,
    /// The requested resource does not exist
    NotFound,
    /// The named playlist does not exist
    PlaylistNotFound,
    /// The named video does not exist
    VideoNotFound,
    /// The named channel does not exist
    ChannelNotFound,
    /// Request parameters failed the vendor's validation
    BadRequest,
    /// A reason code this client doesn't recognize yet
    Unknown(String),
}

impl VendorReason {
    /// Parse a vendor reason string into the typed vocabulary.
    pub fn from_api_response(reason: &str) -> Self {
        match reason {
            "keyInvalid" => Self::KeyInvalid,
            "quotaExceeded" => Self::QuotaExceeded,
            "dailyLimitExceeded" => Self::DailyLimitExceeded,
            "rateLimitExceeded" => Self::RateLimitExceeded,
            "userRateLimitExceeded" => Self::UserRateLimitExceeded,
            "forbidden" => Self::Forbidden,
            "notFound" => Self::NotFound,
            "playlistNotFound" => Self::PlaylistNotFound,
            "videoNotFound" => Self::VideoNotFound,
            "channelNotFound" => Self::ChannelNotFound,
            "badRequest" => Self::BadRequest,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this reason signals a quota or rate limit condition.
    pub fn is_quota(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded
                | Self::DailyLimitExceeded
                | Self::RateLimitExceeded
                | Self::UserRateLimitExceeded
        )
    }

    /// Whether this reason means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::PlaylistNotFound | Self::VideoNotFound | Self::ChannelNotFound
        )
    }
}

impl fmt::Display for VendorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyInvalid => write!(f, "keyInvalid"),
            Self::QuotaExceeded => write!(f, "quotaExceeded"),
            Self::DailyLimitExceeded => write!(f, "dailyLimitExceeded"),
            Self::RateLimitExceeded => write!(f, "rateLimitExceeded"),
            Self::UserRateLimitExceeded => write!(f, "userRateLimitExceeded"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::NotFound => write!(f, "notFound"),
            Self::PlaylistNotFound => write!(f, "playlistNotFound"),
            Self::VideoNotFound => write!(f, "videoNotFound"),
            Self::ChannelNotFound => write!(f, "channelNotFound"),
            Self::BadRequest => write!(f, "badRequest"),
            Self::Unknown(reason) => write!(f, "{}", reason),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// A vendor failure as it came off the wire, before triage.
    ///
    /// Produced by the page fetcher. The quota-guarded iterator runs it
    /// through [`classify_failure`] and re-raises one of the typed
    /// variants below, or recovers it as an empty result for 404.
    #[error("YouTube API rejected the request ({status}, {domain}/{reason}): {message}")]
    VendorFailure {
        status: u16,
        domain: String,
        reason: String,
        message: String,
    },

    #[error("Authentication failed ({status}, {domain}/{reason}): {message}")]
    Authentication {
        status: u16,
        domain: String,
        reason: String,
        message: String,
    },

    #[error("API quota exhausted ({status}, {domain}/{reason}): {message}")]
    QuotaExceeded {
        status: u16,
        domain: String,
        reason: String,
        message: String,
    },

    #[error("Access forbidden ({status}, {domain}/{reason}): {message}")]
    AccessForbidden {
        status: u16,
        domain: String,
        reason: String,
        message: String,
    },

    #[error("YouTube API client error ({status}, {domain}/{reason}): {message}")]
    Client {
        status: u16,
        domain: String,
        reason: String,
        message: String,
    },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}

// Allow converting from anyhow::Error at the boundary, flattening the chain
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl Error {
    /// Triage this error into a failure outcome.
    ///
    /// Total over every variant: errors with no vendor structure
    /// (malformed bodies, IO, validation) count as client errors.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Error::VendorFailure {
                status,
                domain,
                reason,
                ..
            } => classify_failure(Some(*status), domain, reason),
            Error::Authentication { .. } => FailureKind::Authentication,
            Error::QuotaExceeded { .. } => FailureKind::QuotaExceeded,
            Error::AccessForbidden { .. } => FailureKind::AccessForbidden,
            Error::Client { .. } => FailureKind::Client,
            Error::Transport(_) => FailureKind::TransportFailure,
            _ => FailureKind::Client,
        }
    }

    /// Rewrite an untriaged [`Error::VendorFailure`] into its typed
    /// variant, preserving the original status/domain/reason for
    /// diagnostics. Already-typed errors pass through unchanged.
    pub fn into_classified(self) -> Error {
        match self {
            Error::VendorFailure {
                status,
                domain,
                reason,
                message,
            } => match classify_failure(Some(status), &domain, &reason) {
                FailureKind::Authentication => Error::Authentication {
                    status,
                    domain,
                    reason,
                    message,
                },
                FailureKind::QuotaExceeded => Error::QuotaExceeded {
                    status,
                    domain,
                    reason,
                    message,
                },
                FailureKind::AccessForbidden => Error::AccessForbidden {
                    status,
                    domain,
                    reason,
                    message,
                },
                // NotFoundAsEmpty is recovered before this point; a
                // stray one degrades to a client error.
                FailureKind::NotFoundAsEmpty | FailureKind::Client => Error::Client {
                    status,
                    domain,
                    reason,
                    message,
                },
                FailureKind::TransportFailure => Error::Transport(message),
            },
            other => other,
        }
    }

    /// Whether a caller-initiated retry of a fresh logical request is
    /// worth attempting. The engine itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::VendorFailure { status, .. } | Error::Client { status, .. } => {
                matches!(status, 408 | 429 | 500..=599)
            }
            _ => false,
        }
    }
}

/// Terminal failure outcomes for one logical request.
///
/// These are outcomes, not transitions: once the iterator observes a
/// fatal kind it stays exhausted, and `NotFoundAsEmpty` ends iteration
/// as an ordinary empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Credential rejected or request not authorized (fatal)
    Authentication,
    /// Metered quota or rate limit exhausted (fatal)
    QuotaExceeded,
    /// Resource requires elevated authorization the caller lacks (fatal)
    AccessForbidden,
    /// Resource does not exist; recovered as an empty terminal page
    NotFoundAsEmpty,
    /// Any other vendor-reported request failure (fatal)
    Client,
    /// Network failure with no structured vendor response (fatal)
    TransportFailure,
}

impl FailureKind {
    /// Every outcome except "not found" exhausts the logical request
    /// with an error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FailureKind::NotFoundAsEmpty)
    }
}

/// Classifies a vendor failure signal into a [`FailureKind`].
///
/// Pure function over (HTTP status, vendor error domain, vendor reason).
/// A `None` status means the request never produced an HTTP response.
pub fn classify_failure(status: Option<u16>, domain: &str, reason: &str) -> FailureKind {
    let Some(status) = status else {
        return FailureKind::TransportFailure;
    };
    let reason = VendorReason::from_api_response(reason);

    match status {
        400 if reason == VendorReason::KeyInvalid => FailureKind::Authentication,
        403 => {
            if reason.is_quota() || domain.contains("quota") || domain.contains("usageLimits") {
                FailureKind::QuotaExceeded
            } else if reason == VendorReason::Forbidden {
                FailureKind::AccessForbidden
            } else {
                FailureKind::Authentication
            }
        }
        404 => FailureKind::NotFoundAsEmpty,
        _ => FailureKind::Client,
    }
}

/// Result type alias for convenience
#[allow(dead_code)]
pub type Result<T, E = Error> = std::result::Result<T, E>;
