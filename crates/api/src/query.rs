//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for list endpoints.
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size a caller may request.
const MAX_PAGE_SIZE: i64 = 100;

/// Page-based pagination parameters (`?page=&size=`).
///
/// Pages are 1-based. Repositories work in limit/offset terms, so handlers
/// convert via [`PageParams::to_limit_offset`].
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PageParams {
    /// Convert to a clamped `(limit, offset)` pair.
    ///
    /// `page` below 1 is treated as 1; `size` is clamped to `1..=100` with a
    /// default of 20.
    pub fn to_limit_offset(&self) -> (i64, i64) {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let page = self.page.unwrap_or(1).max(1);
        (size, (page - 1) * size)
    }
}
