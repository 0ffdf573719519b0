//! # Job Status Service
//!
//! Backs `GET /api/v1/jobs/{job_id}`, the polling endpoint for background jobs such as
//! `async_sync`. The status is read from the job controller's shared map.

use crate::auth::ActingUser;
use crate::error::ApiError;
use crate::job_controller::state::JobsState;
use actix_web::{web, HttpResponse, Responder, ResponseError};

/// Actix web handler for `GET /api/v1/jobs/{job_id}`.
///
/// # Arguments
/// * `job_id` - The id returned when the job was scheduled.
/// * `state` - The job controller state.
///
/// # Returns
/// - `200 OK` with the `JobStatus` (`Pending`, `InProgress`, `Completed` or `Failed`).
/// - `404 Not Found` if no job has this id.
pub(crate) async fn process(
    job_id: web::Path<String>,
    state: web::Data<JobsState>,
    _user: ActingUser,
) -> impl Responder {
    let job_id = job_id.into_inner();
    match state.status(&job_id).await {
        Some(status) => HttpResponse::Ok().json(status),
        None => ApiError::not_found(format!("job '{}'", job_id)).error_response(),
    }
}
