//! Shared response envelopes for API handlers.
//!
//! Success payloads ride in a `{ "data": ... }` wrapper; paginated
//! listings put a [`Page`] inside it. Use [`DataResponse`] instead of
//! ad-hoc `serde_json::json!({ "data": ... })` so the payload shape is
//! checked at compile time.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One page of a listing, with the metadata a client needs to render
/// pager controls. `page` is 1-based.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}
