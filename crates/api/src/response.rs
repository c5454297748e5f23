//! Shared response envelope types for API handlers.
//!
//! Endpoints that return derived or filtered payloads wrap them in a
//! `{ "data": ... }` envelope; plain resource bodies are returned bare. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
