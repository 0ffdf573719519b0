//! # Snapshot Service
//!
//! Backs `POST /api/v1/package-sets/{package_set}/packages/{slug}/snapshot`, the only
//! way a package version is created.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives a `CreateVersionRequest` with `title`,
//!     `version_description` and `included_items`, the titles of the cache entries to freeze.
//!
//! 2.  **Locking**: the per-package lock is taken so no fetch replaces the cache mid-snapshot.
//!
//! 3.  **Version Creation**: `create_version` runs on the blocking pool inside one
//!     `IMMEDIATE` transaction. It rejects an empty selection, a blank title or description,
//!     and titles missing from the live cache (listed sorted under `titles`). Then it assigns
//!     the next `id_num`, copies the selected items and moves `latest_version`. A rejected
//!     snapshot leaves nothing behind.
//!
//! 4.  **HTTP Response**: the created `PackageVersion`, without item bodies, as `200 OK`.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::{create_version, VersionStub};
use crate::error::ApiResult;
use crate::services::blocking;
use crate::store::packages;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package_version::PackageVersion;
use common::requests::CreateVersionRequest;

/// Actix web handler for `POST .../packages/{slug}/snapshot`.
///
/// # Arguments
/// * `path` - `(package_set, slug)` from the URL.
/// * `user` - The acting user, recorded as the version's `created_by`.
/// * `payload` - The `CreateVersionRequest` body.
///
/// # Returns
/// - `200 OK` with the new `PackageVersion`.
/// - `400 Bad Request` for an empty selection, blank fields or unknown titles.
/// - `404 Not Found` if the package does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    user: ActingUser,
    payload: web::Json<CreateVersionRequest>,
) -> impl Responder {
    let (package_set, slug) = path.into_inner();
    match snapshot(state.get_ref().clone(), package_set, slug, user, payload.into_inner()).await {
        Ok(version) => HttpResponse::Ok().json(version),
        Err(e) => e.error_response(),
    }
}

async fn snapshot(
    state: AppState,
    set_slug: String,
    slug: String,
    user: ActingUser,
    req: CreateVersionRequest,
) -> ApiResult<PackageVersion> {
    let package_id = {
        let conn = state.db.connect()?;
        packages::get(&conn, &set_slug, &slug)?.package.id
    };
    let _guard = state.locks.acquire(package_id).await;
    let stub = VersionStub {
        title: req.title,
        version_description: req.version_description,
    };
    blocking(move || {
        let mut conn = state.db.connect()?;
        create_version(&mut conn, package_id, user.name(), &stub, &req.included_items)
    })
    .await
}
