//! Paging and ordering helpers for list endpoints.
//!
//! Clamping happens here so every store backend sees the same bounded values.

use serde::Deserialize;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Largest page a caller can request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Longest free-text search string accepted.
pub const MAX_SEARCH_LEN: usize = 100;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided skip to non-negative.
pub fn clamp_skip(skip: Option<i64>) -> i64 {
    skip.unwrap_or(0).max(0)
}

/// Creation-time ordering for article listings.
///
/// Ties on `created_at` are broken by id in the same direction, so the order
/// is total and repeated queries page identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Newest first.
    #[default]
    Latest,
    /// Oldest first.
    Oldest,
}

impl SortOrder {
    pub fn is_descending(self) -> bool {
        matches!(self, SortOrder::Latest)
    }

    /// SQL keyword for `ORDER BY`.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Latest => "DESC",
            SortOrder::Oldest => "ASC",
        }
    }
}

/// Normalize a free-text search term: trimmed, lowercased, truncated.
///
/// Returns `None` for missing or whitespace-only input.
pub fn normalize_search(search: Option<&str>) -> Option<String> {
    let trimmed = search?.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_SEARCH_LEN).collect::<String>().to_lowercase())
}
