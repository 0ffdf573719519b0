//! # Package Set Creation Service
//!
//! Backs `POST /api/v1/package-sets`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives a `CreatePackageSetRequest` with a `slug` and
//!     optional `metadata`.
//!
//! 2.  **Validation**: the slug must match the URL slug pattern; `metadata` defaults to `{}`
//!     and must be a JSON object.
//!
//! 3.  **Persistence**: the set is inserted with the acting user as `created_by`. A duplicate
//!     slug answers `409 Conflict`.
//!
//! 4.  **HTTP Response**: the stored `PackageSet` as `201 Created`.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::services::metadata_object;
use crate::store::{package_sets, validate_slug};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package_set::PackageSet;
use common::requests::CreatePackageSetRequest;

/// Actix web handler for `POST /api/v1/package-sets`.
///
/// # Arguments
/// * `user` - The acting user, recorded as `created_by`.
/// * `payload` - The `CreatePackageSetRequest` body.
///
/// # Returns
/// - `201 Created` with the new `PackageSet`.
/// - `400 Bad Request` for an invalid slug or non-object metadata.
/// - `409 Conflict` if the slug is taken.
pub(crate) async fn process(
    state: web::Data<AppState>,
    user: ActingUser,
    payload: web::Json<CreatePackageSetRequest>,
) -> impl Responder {
    match create_package_set(&state, &user, payload.into_inner()) {
        Ok(package_set) => HttpResponse::Created().json(package_set),
        Err(e) => e.error_response(),
    }
}

fn create_package_set(
    state: &AppState,
    user: &ActingUser,
    req: CreatePackageSetRequest,
) -> ApiResult<PackageSet> {
    validate_slug(&req.slug)?;
    let metadata = metadata_object(req.metadata)?;
    let conn = state.db.connect()?;
    package_sets::insert(&conn, &req.slug, &metadata, user.name())
}
