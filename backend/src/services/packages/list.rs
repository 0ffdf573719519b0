//! # Package Listing Service
//!
//! Backs `GET /api/v1/package-sets/{package_set}/packages`.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: `process` takes the set slug from the path and an optional
//!     `?ordering=` field (`slug`, `last_fetched_date`, `created_at`, `updated_at`, with a
//!     leading `-` for descending order). Without one, packages are ordered by slug.
//!
//! 2.  **Database Query**: every package of the set is loaded together with its live cache.
//!
//! 3.  **Refresh**: each cached item goes through refresh-on-read before it is returned, so
//!     pointer items carry a current `url`, `size` and `checksum`.
//!
//! 4.  **HTTP Response**: a JSON array of packages as `200 OK`.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::retrieve::refreshed_package;
use crate::error::ApiResult;
use crate::store::{package_sets, packages, Ordering};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package::PackageWithCache;
use common::requests::ListQuery;

/// Actix web handler for `GET /api/v1/package-sets/{package_set}/packages`.
///
/// # Arguments
/// * `package_set` - Slug of the package set, from the URL path.
/// * `query` - Optional `ordering` field.
///
/// # Returns
/// - `200 OK` with an array of `PackageWithCache`.
/// - `400 Bad Request` for an unknown ordering field.
/// - `404 Not Found` if the package set does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    package_set: web::Path<String>,
    query: web::Query<ListQuery>,
    _user: ActingUser,
) -> impl Responder {
    match list_packages(&state, &package_set, query.ordering.as_deref()) {
        Ok(packages) => HttpResponse::Ok().json(packages),
        Err(e) => e.error_response(),
    }
}

fn list_packages(
    state: &AppState,
    set_slug: &str,
    ordering: Option<&str>,
) -> ApiResult<Vec<PackageWithCache>> {
    let ordering = Ordering::parse(ordering, packages::ORDERING_FIELDS, "slug")?;
    let conn = state.db.connect()?;
    let package_set = package_sets::get(&conn, set_slug)?;
    let listed = packages::list(&conn, &package_set, ordering)?;
    Ok(listed
        .into_iter()
        .map(|package| refreshed_package(package, state.resolver.as_ref()))
        .collect())
}
