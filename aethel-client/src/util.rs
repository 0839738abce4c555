//! Utility module for common functionality
//!
//! This module provides small helpers used across the Aethel client.

use std::sync::atomic::{AtomicU64, Ordering};

/// Last cache-busting token handed out in this process
static LAST_CACHE_TOKEN: AtomicU64 = AtomicU64::new(0);

/// Produce a cache-busting token.
///
/// Tokens are milliseconds since the Unix epoch, but strictly increasing
/// across the whole process: when the clock has not moved past the last
/// token, the last token plus one is used instead.
pub fn next_cache_token() -> u64 {
    let now = chrono::Utc::now().timestamp_millis().max(0) as u64;

    let previous = LAST_CACHE_TOKEN
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);

    now.max(previous + 1)
}

/// Truncate a string for logging, adding ellipsis if truncated
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        s.chars().take(max_chars).collect()
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
