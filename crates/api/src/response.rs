//! Shared response envelope types for API handlers.
//!
//! Single resources are wrapped in `{ "data": ... }`. Paginated listings use
//! [`agora_db::models::page::Paginated`], whose `data` field plays the same role.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
