//
//  seafile-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers used by the command-line front end.
//!
//! ## Categories
//!
//! - **Time Utilities**: [`format_time`], [`format_relative_time`]
//! - **String Utilities**: [`truncate`]
//! - **Size Utilities**: [`format_size`]
//! - **Path Utilities**: [`normalize_remote_path`]
//! - **Identifiers**: [`is_repo_id`]
//!
//! ## Example
//!
//! ```rust
//! use seafile_cli::util::{format_size, normalize_remote_path};
//!
//! assert_eq!(format_size(1536), "1.5 KB");
//! assert_eq!(normalize_remote_path("docs/"), "/docs");
//! ```

use chrono::{DateTime, Local, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Seafile repository IDs are lowercase UUIDs.
static REPO_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

/// Formats a Unix timestamp into a local datetime string.
///
/// Returns "Unknown" if the timestamp cannot be represented.
///
/// # Example
///
/// ```rust
/// use seafile_cli::util::format_time;
///
/// let formatted = format_time(1704067200);
/// // "2024-01-01 02:00:00" or similar, depending on the local timezone
/// ```
pub fn format_time(timestamp: i64) -> String {
    if let Some(dt) = DateTime::from_timestamp(timestamp, 0) {
        let local: DateTime<Local> = dt.into();
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        "Unknown".to_string()
    }
}

/// Formats a Unix timestamp relative to now ("3 days ago").
///
/// # Example
///
/// ```rust
/// use seafile_cli::util::format_relative_time;
///
/// let now = chrono::Utc::now().timestamp();
/// assert_eq!(format_relative_time(now), "just now");
/// ```
pub fn format_relative_time(timestamp: i64) -> String {
    let diff = Utc::now().timestamp() - timestamp;

    if diff < 0 {
        return "in the future".to_string();
    }

    let diff = diff as u64;

    let (count, unit) = if diff < 60 {
        return "just now".to_string();
    } else if diff < 3600 {
        (diff / 60, "minute")
    } else if diff < 86400 {
        (diff / 3600, "hour")
    } else if diff < 604800 {
        (diff / 86400, "day")
    } else if diff < 2592000 {
        (diff / 604800, "week")
    } else if diff < 31536000 {
        (diff / 2592000, "month")
    } else {
        (diff / 31536000, "year")
    };

    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}

/// Truncates a string to at most `max_len` characters, adding "..." when cut.
///
/// Counts characters, not bytes, so multi-byte names are never split.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Formats a byte count for display (binary units).
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Normalizes a path inside a repository: one leading slash, no trailing
/// slash, no empty components. The root is `/`.
pub fn normalize_remote_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

/// Checks whether a string looks like a repository ID rather than a name.
pub fn is_repo_id(s: &str) -> bool {
    REPO_ID_PATTERN.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("Übersicht.txt", 6), "Übe...");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now().timestamp();
        assert_eq!(format_relative_time(now + 120), "in the future");
        assert_eq!(format_relative_time(now - 90), "1 minute ago");
        assert_eq!(format_relative_time(now - 3 * 86400), "3 days ago");
    }

    #[test]
    fn test_normalize_remote_path() {
        assert_eq!(normalize_remote_path(""), "/");
        assert_eq!(normalize_remote_path("/"), "/");
        assert_eq!(normalize_remote_path("a//b/"), "/a/b");
    }

    #[test]
    fn test_is_repo_id() {
        assert!(is_repo_id("7f1c0e5a-3b2d-4c1e-9f8a-0123456789ab"));
        assert!(!is_repo_id("My Library"));
        assert!(!is_repo_id("7F1C0E5A-3B2D-4C1E-9F8A-0123456789AB"));
    }
}
