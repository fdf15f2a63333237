//! Pagination
//!
//! With extra-limit enabled the row query asks for one row more than the
//! page size. The caller detects the next page from that extra row and
//! trims it with [`Pagination::from_rows`]; the builder never trims.

use config::PaginationConfig;
use serde::{Deserialize, Serialize};

/// Clamp a requested page and limit with the default bounds
/// (page 1, limit 10, min 1, max 100)
pub fn validate_page_and_limit(page: i64, limit: i64) -> (i64, i64) {
    PaginationConfig::default().validate_page_and_limit(page, limit)
}

/// The effective page computed by the last build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
    /// Value bound to `LIMIT ?`: `limit + 1` with extra-limit
    pub fetch_limit: i64,
    pub extra_limit: bool,
}

impl PageWindow {
    pub fn new(page: i64, limit: i64, extra_limit: bool) -> Self {
        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
            fetch_limit: if extra_limit { limit.saturating_add(1) } else { limit },
            extra_limit,
        }
    }
}

/// Page metadata returned alongside the rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    /// Rows on this page
    pub size: i64,
    pub total: i64,
    pub has_next: bool,
}

impl Pagination {
    /// Shape fetched rows into a page
    ///
    /// With extra-limit the presence of the look-ahead row sets `has_next`
    /// and that row is dropped. Without it `has_next` comes from `total`.
    pub fn from_rows<T>(mut rows: Vec<T>, window: &PageWindow, total: i64) -> (Vec<T>, Self) {
        let limit = usize::try_from(window.limit).unwrap_or(0);

        let has_next = if window.extra_limit {
            rows.len() > limit
        } else {
            window.page.saturating_mul(window.limit) < total
        };

        rows.truncate(limit);

        let pagination = Self {
            page: window.page,
            size: rows.len() as i64,
            total,
            has_next,
        };

        (rows, pagination)
    }
}
