//! # Package Retrieval Service
//!
//! Backs `GET /api/v1/package-sets/{package_set}/packages/{slug}`, optionally with
//! `?version=<id_num>`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` receives the set and package slugs from the path and the
//!     raw `version` query value, if any.
//!
//! 2.  **Version Lookup**: `get_version` turns the raw value into a lookup result. An absent
//!     value or `-1` means no version was asked for; a non-numeric value or a number with no
//!     stored version means the version was not found.
//!
//! 3.  **View Composition**: `package_view` builds exactly one of two views. A found version
//!     yields the historical view (`cached: null`, `version_data` with the version's items).
//!     Anything else yields the live view (`cached` with the live cache, `version_data: null`).
//!     Items in either view are refreshed before they are returned.
//!
//! 4.  **HTTP Response**: the `PackageDetail` as `200 OK`. An unknown package is `404`; an
//!     unknown version is not an error and falls back to the live view.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::{get_version, package_view};
use crate::error::ApiResult;
use crate::store::packages;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::view::PackageDetail;
use common::requests::RetrieveQuery;

/// Actix web handler for `GET /api/v1/package-sets/{package_set}/packages/{slug}`.
///
/// # Arguments
/// * `path` - `(package_set, slug)` from the URL.
/// * `query` - The raw `?version=` value.
///
/// # Returns
/// - `200 OK` with the `PackageDetail` (live or historical view).
/// - `404 Not Found` if the package does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<RetrieveQuery>,
    _user: ActingUser,
) -> impl Responder {
    let (package_set, slug) = path.into_inner();
    match retrieve_package(&state, &package_set, &slug, query.version.as_deref()) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

fn retrieve_package(
    state: &AppState,
    set_slug: &str,
    slug: &str,
    version: Option<&str>,
) -> ApiResult<PackageDetail> {
    let conn = state.db.connect()?;
    let package = packages::get(&conn, set_slug, slug)?;
    let lookup = get_version(&conn, package.package.id, version)?;
    package_view(&conn, package, lookup, state.resolver.as_ref())
}
