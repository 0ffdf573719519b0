//! # Package Set Sync Service
//!
//! Imports every package the cache provider knows for a package set.
//!
//! ## Workflow
//!
//! 1.  **Blocking Sync** (`POST /{slug}/sync`): `process` runs `sync_package_set` on the
//!     blocking pool. Missing packages are created with the acting user as creator and every
//!     package's cache is fetched. The `SyncReport` (`created`, `refreshed`, `failed`) is
//!     returned as `200 OK`; one package failing does not stop the others.
//!
//! 2.  **Background Sync** (`POST /{slug}/async_sync`): `process_async` checks the set exists,
//!     registers a job with the job controller and answers `{"id": job_id}` immediately.
//!
//! 3.  **Job Execution**: the same import runs on the blocking pool. After each package the
//!     completed percentage is reported as `InProgress(percent)`.
//!
//! 4.  **Completion**: the job ends as `Completed(<SyncReport JSON>)` or `Failed(<reason>)`,
//!     readable at `GET /api/v1/jobs/{id}`.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::sync_package_set;
use crate::error::ApiResult;
use crate::job_controller::state::{JobUpdate, JobsState};
use crate::services::blocking;
use crate::store::package_sets;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::jobs::{JobHandle, JobStatus, SyncReport};
use log::{error, info};

/// Actix web handler for `POST /api/v1/package-sets/{slug}/sync`.
///
/// # Returns
/// - `200 OK` with the `SyncReport`.
/// - `404 Not Found` if no set has this slug.
/// - `502 Bad Gateway` if the provider cannot list the set's packages.
pub(crate) async fn process(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    user: ActingUser,
) -> impl Responder {
    match sync(state.get_ref().clone(), slug.into_inner(), user).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => e.error_response(),
    }
}

async fn sync(state: AppState, slug: String, user: ActingUser) -> ApiResult<SyncReport> {
    blocking(move || {
        let conn = state.db.connect()?;
        let package_set = package_sets::get(&conn, &slug)?;
        sync_package_set(
            &conn,
            &package_set,
            user.name(),
            state.provider.as_ref(),
            &state.locks,
            |_| {},
        )
    })
    .await
}

/// Actix web handler for `POST /api/v1/package-sets/{slug}/async_sync`.
///
/// # Arguments
/// * `state` - Shared application state.
/// * `jobs` - The job controller state the progress is reported to.
/// * `slug` - The package set slug, from the URL path.
/// * `user` - The acting user, recorded as creator of imported packages.
///
/// # Returns
/// - `200 OK` with a `JobHandle` to poll.
/// - `404 Not Found` if no set has this slug.
pub(crate) async fn process_async(
    state: web::Data<AppState>,
    jobs: web::Data<JobsState>,
    slug: web::Path<String>,
    user: ActingUser,
) -> impl Responder {
    match schedule_sync_job(state.get_ref().clone(), jobs.get_ref().clone(), slug.into_inner(), user).await {
        Ok(id) => HttpResponse::Ok().json(JobHandle { id }),
        Err(e) => e.error_response(),
    }
}

/// Registers a sync job and spawns its work.
///
/// Returns the job id once the job is `Pending`; the import itself continues on the
/// blocking pool and reports through `jobs.tx`.
async fn schedule_sync_job(
    state: AppState,
    jobs: JobsState,
    slug: String,
    user: ActingUser,
) -> ApiResult<String> {
    // Unknown sets fail the request instead of producing a failed job.
    let package_set = {
        let conn = state.db.connect()?;
        package_sets::get(&conn, &slug)?
    };

    let job_id = jobs.register().await;
    let tx = jobs.tx.clone();
    let job_id_for_task = job_id.clone();

    tokio::spawn(async move {
        let tx_block = tx.clone();
        let job_id_for_blocking = job_id_for_task.clone();

        let handle = tokio::task::spawn_blocking(move || -> ApiResult<SyncReport> {
            let conn = state.db.connect()?;
            sync_package_set(
                &conn,
                &package_set,
                user.name(),
                state.provider.as_ref(),
                &state.locks,
                |percent| {
                    let _ = tx_block.blocking_send(JobUpdate {
                        job_id: job_id_for_blocking.clone(),
                        status: JobStatus::InProgress(percent),
                    });
                },
            )
        });

        let status = match handle.await {
            Ok(Ok(report)) => match serde_json::to_string(&report) {
                Ok(body) => JobStatus::Completed(body),
                Err(e) => JobStatus::Failed(e.to_string()),
            },
            Ok(Err(e)) => JobStatus::Failed(e.to_string()),
            Err(join_err) => JobStatus::Failed(format!("join error: {}", join_err)),
        };
        match &status {
            JobStatus::Failed(reason) => error!("Sync job {} failed: {}", job_id_for_task, reason),
            _ => info!("Sync job {} finished", job_id_for_task),
        }
        let _ = tx
            .send(JobUpdate {
                job_id: job_id_for_task,
                status,
            })
            .await;
    });

    Ok(job_id)
}
