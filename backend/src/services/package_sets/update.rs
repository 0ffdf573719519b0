//! # Package Set Update Service
//!
//! Backs `PATCH /api/v1/package-sets/{slug}`. The metadata object is replaced as a
//! whole and `updated_at` is bumped; the slug cannot change.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::services::metadata_object;
use crate::store::package_sets;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package_set::PackageSet;
use common::requests::UpdatePackageSetRequest;

/// Actix web handler for `PATCH /api/v1/package-sets/{slug}`.
///
/// # Arguments
/// * `slug` - The package set slug, from the URL path.
/// * `payload` - `UpdatePackageSetRequest` carrying the new `metadata`.
///
/// # Returns
/// - `200 OK` with the updated `PackageSet`.
/// - `400 Bad Request` if `metadata` is not a JSON object.
/// - `404 Not Found` if no set has this slug.
pub(crate) async fn process(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    _user: ActingUser,
    payload: web::Json<UpdatePackageSetRequest>,
) -> impl Responder {
    match update_package_set(&state, &slug, payload.into_inner()) {
        Ok(package_set) => HttpResponse::Ok().json(package_set),
        Err(e) => e.error_response(),
    }
}

fn update_package_set(
    state: &AppState,
    slug: &str,
    req: UpdatePackageSetRequest,
) -> ApiResult<PackageSet> {
    let metadata = metadata_object(Some(req.metadata))?;
    let conn = state.db.connect()?;
    package_sets::update_metadata(&conn, slug, &metadata)
}
