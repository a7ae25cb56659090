// src/error_recovery.rs
//! Retry with exponential backoff for caller-side recovery.
//!
//! The engine never retries internally; a failed logical request is
//! permanently exhausted. Callers that want another attempt start a
//! fresh logical request, and this helper wraps that loop for the
//! failures worth repeating (transport faults, vendor 5xx).

use crate::error::Error;
use std::time::Duration;

/// Retries an async operation with exponential backoff.
///
/// Non-retryable failures (quota exhaustion, authentication, not-found)
/// return immediately; waiting would not change the outcome.
pub async fn retry_with_backoff<F, T, Fut>(
    mut operation: F,
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, Error>>,
{
    let mut delay = initial_delay;
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !e.is_retryable() {
                    return Err(e);
                }
                last_error = Some(e);

                if attempt < max_attempts {
                    log::warn!("Attempt {} failed, retrying after {:?}", attempt, delay);
                    tokio::time::sleep(delay).await;

                    // Exponential backoff with cap
                    delay = std::cmp::min(delay * 2, max_delay);
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::Transport("Retry failed with no error".to_string())))
}
