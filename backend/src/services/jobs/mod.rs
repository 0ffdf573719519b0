//! # Job Service Module
//!
//! Read-only access to the job controller for clients polling background work.

mod get_status;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/v1/jobs";

/// Configures and returns the Actix web scope for the job service.
///
/// # Registered Routes:
///
/// *   **`GET /{job_id}`**:
///     - **Handler**: `get_status::process`
///     - **Description**: Current status of a background job, or `404` for an unknown id.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/{job_id}", get().to(get_status::process))
}
