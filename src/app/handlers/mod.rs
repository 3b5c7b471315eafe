pub mod commenting;
pub mod grading;
pub mod misc;

use crate::domain::id::Id;
use crate::utils::error::Result;
use axum::Json;
use serde_json::{json, Value};

/// Parses an identifier taken from the request path.
pub(crate) fn clean_id(raw: &str) -> Result<Id> {
    Id::parse(raw)
}

pub(crate) fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}
