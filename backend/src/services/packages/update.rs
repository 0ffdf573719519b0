//! # Package Update Service
//!
//! Backs `PATCH /api/v1/package-sets/{package_set}/packages/{slug}`. Only `metadata`
//! and `tags` can change; fields left out of the body keep their stored values. The
//! live cache and versions are never touched here.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::retrieve::refreshed_package;
use crate::error::ApiResult;
use crate::services::metadata_object;
use crate::store::packages;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package::PackageWithCache;
use common::requests::UpdatePackageRequest;

/// Actix web handler for `PATCH /api/v1/package-sets/{package_set}/packages/{slug}`.
///
/// # Arguments
/// * `path` - `(package_set, slug)` from the URL.
/// * `payload` - `UpdatePackageRequest` with optional `metadata` and `tags`.
///
/// # Returns
/// - `200 OK` with the updated `PackageWithCache`.
/// - `400 Bad Request` if `metadata` is not a JSON object.
/// - `404 Not Found` if the package does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    _user: ActingUser,
    payload: web::Json<UpdatePackageRequest>,
) -> impl Responder {
    let (package_set, slug) = path.into_inner();
    match update_package(&state, &package_set, &slug, payload.into_inner()) {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(e) => e.error_response(),
    }
}

fn update_package(
    state: &AppState,
    set_slug: &str,
    slug: &str,
    req: UpdatePackageRequest,
) -> ApiResult<PackageWithCache> {
    let metadata = req.metadata.map(|m| metadata_object(Some(m))).transpose()?;
    let conn = state.db.connect()?;
    let package = packages::get(&conn, set_slug, slug)?;
    let updated = packages::update(&conn, package.package.id, metadata.as_ref(), req.tags.as_ref())?;
    Ok(refreshed_package(updated, state.resolver.as_ref()))
}
