//! # Package Version Service
//!
//! Backs the version history of a package:
//!
//! - `GET .../packages/{slug}/versions` answers `{"results": [...]}` with every version in
//!   ascending `id_num` order, without item bodies.
//! - `PATCH .../packages/{slug}/versions/{id_num}` edits the descriptive fields of one
//!   version. Only `title` and `version_description` can change, and neither may be
//!   blank. Items, `id_num`, creator and package binding stay as they were created.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::get_all_versions;
use crate::error::{ApiError, ApiResult};
use crate::store::{packages, versions};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package_version::PackageVersion;
use common::requests::UpdateVersionRequest;
use serde::Serialize;

#[derive(Serialize)]
struct VersionList {
    results: Vec<PackageVersion>,
}

/// Actix web handler for `GET .../packages/{slug}/versions`.
///
/// # Returns
/// - `200 OK` with `{"results": [PackageVersion, ...]}`.
/// - `404 Not Found` if the package does not exist.
pub(crate) async fn list(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    _user: ActingUser,
) -> impl Responder {
    let (package_set, slug) = path.into_inner();
    match list_versions(&state, &package_set, &slug) {
        Ok(results) => HttpResponse::Ok().json(VersionList { results }),
        Err(e) => e.error_response(),
    }
}

fn list_versions(state: &AppState, set_slug: &str, slug: &str) -> ApiResult<Vec<PackageVersion>> {
    let conn = state.db.connect()?;
    let package = packages::get(&conn, set_slug, slug)?;
    get_all_versions(&conn, package.package.id)
}

/// Actix web handler for `PATCH .../packages/{slug}/versions/{id_num}`.
///
/// # Arguments
/// * `path` - `(package_set, slug, id_num)` from the URL.
/// * `payload` - `UpdateVersionRequest` with optional `title` and `version_description`.
///
/// # Returns
/// - `200 OK` with the updated `PackageVersion`.
/// - `400 Bad Request` if a present field is blank.
/// - `404 Not Found` if the package or version does not exist.
pub(crate) async fn update(
    state: web::Data<AppState>,
    path: web::Path<(String, String, i64)>,
    _user: ActingUser,
    payload: web::Json<UpdateVersionRequest>,
) -> impl Responder {
    let (package_set, slug, id_num) = path.into_inner();
    match update_version(&state, &package_set, &slug, id_num, payload.into_inner()) {
        Ok(version) => HttpResponse::Ok().json(version),
        Err(e) => e.error_response(),
    }
}

fn non_blank<'a>(field: &str, value: Option<&'a str>) -> ApiResult<Option<&'a str>> {
    match value.map(str::trim) {
        Some("") => Err(ApiError::validation(format!("{} may not be blank", field))),
        other => Ok(other),
    }
}

fn update_version(
    state: &AppState,
    set_slug: &str,
    slug: &str,
    id_num: i64,
    req: UpdateVersionRequest,
) -> ApiResult<PackageVersion> {
    let title = non_blank("title", req.title.as_deref())?;
    let description = non_blank("version_description", req.version_description.as_deref())?;
    let conn = state.db.connect()?;
    let package = packages::get(&conn, set_slug, slug)?;
    versions::update_descriptive(&conn, package.package.id, id_num, title, description)
}
