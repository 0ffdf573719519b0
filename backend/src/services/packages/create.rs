//! # Package Creation Service
//!
//! Backs `POST /api/v1/package-sets/{package_set}/packages`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the owning set's slug from the path and a
//!     `CreatePackageRequest` (`slug`, optional `metadata`, optional `tags`) as JSON.
//!
//! 2.  **Validation**: the slug must match the URL slug pattern and `metadata`, when given,
//!     must be a JSON object.
//!
//! 3.  **Persistence**: the package set is looked up by slug and the package is inserted into
//!     the `packages` table. A new package starts `stale`, with an empty live cache and no
//!     version. A slug already used in the same set is a `409 Conflict`.
//!
//! 4.  **HTTP Response**: the stored package, with its (empty) cache, as `201 Created`.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::retrieve::refreshed_package;
use crate::error::ApiResult;
use crate::services::metadata_object;
use crate::store::{package_sets, packages, validate_slug};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package::PackageWithCache;
use common::requests::CreatePackageRequest;

/// Actix web handler for `POST /api/v1/package-sets/{package_set}/packages`.
///
/// # Arguments
/// * `state` - Shared application state (database and content resolver).
/// * `package_set` - Slug of the owning package set, from the URL path.
/// * `user` - The acting user, recorded as `created_by`.
/// * `payload` - The `CreatePackageRequest` body.
///
/// # Returns
/// - `201 Created` with the new `PackageWithCache`.
/// - `400 Bad Request` for an invalid slug or non-object metadata.
/// - `404 Not Found` if the package set does not exist.
/// - `409 Conflict` if the slug is already taken in this set.
pub(crate) async fn process(
    state: web::Data<AppState>,
    package_set: web::Path<String>,
    user: ActingUser,
    payload: web::Json<CreatePackageRequest>,
) -> impl Responder {
    match create_package(&state, &package_set, &user, payload.into_inner()) {
        Ok(package) => HttpResponse::Created().json(package),
        Err(e) => e.error_response(),
    }
}

/// Validates the request and inserts the package under `set_slug`.
fn create_package(
    state: &AppState,
    set_slug: &str,
    user: &ActingUser,
    req: CreatePackageRequest,
) -> ApiResult<PackageWithCache> {
    validate_slug(&req.slug)?;
    let metadata = metadata_object(req.metadata)?;
    let conn = state.db.connect()?;
    let package_set = package_sets::get(&conn, set_slug)?;
    let package = packages::insert(&conn, &package_set, &req.slug, &metadata, &req.tags, user.name())?;
    Ok(refreshed_package(package, state.resolver.as_ref()))
}
