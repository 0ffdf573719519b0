//! HTTP services, one module per resource. Each exposes a
//! `configure_routes()` returning its actix `Scope`.

pub mod comments;
pub mod jobs;
pub mod package_sets;
pub mod packages;

use crate::error::{ApiError, ApiResult};
use serde_json::{json, Value};

/// Runs blocking work (SQLite writes that may wait on locks, provider and
/// sink calls) on the blocking pool.
pub(crate) async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

/// Metadata must be a JSON object; absent metadata becomes `{}`.
pub(crate) fn metadata_object(metadata: Option<Value>) -> ApiResult<Value> {
    match metadata {
        None => Ok(json!({})),
        Some(value @ Value::Object(_)) => Ok(value),
        Some(_) => Err(ApiError::validation("metadata must be a JSON object")),
    }
}
