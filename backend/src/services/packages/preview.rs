//! # Package Preview Service
//!
//! Backs `POST /api/v1/package-sets/{package_set}/packages/{slug}/preview`, which
//! re-fetches a package's live cache from the cache provider.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: the package is loaded by set and package slug.
//!
//! 2.  **Locking**: the per-package lock is taken for the whole fetch, so a snapshot of the
//!     same package sees either the old cache or the new one.
//!
//! 3.  **Fetch**: `fetch_cache` runs on the blocking pool. On success the cache is replaced
//!     and the package becomes `fresh`. On provider failure the package becomes `error`, the
//!     old cache is kept, and the failure is returned as `502 Bad Gateway`.
//!
//! 4.  **HTTP Response**: the refreshed package as `200 OK`.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::fetch_cache;
use crate::engine::retrieve::refreshed_package;
use crate::error::ApiResult;
use crate::services::blocking;
use crate::store::packages;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package::PackageWithCache;

/// Actix web handler for `POST .../packages/{slug}/preview`.
///
/// # Arguments
/// * `state` - Shared application state (database, provider, resolver, locks).
/// * `path` - `(package_set, slug)` from the URL.
///
/// # Returns
/// - `200 OK` with the freshly fetched `PackageWithCache`.
/// - `404 Not Found` if the package does not exist.
/// - `502 Bad Gateway` if the cache provider fails.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    _user: ActingUser,
) -> impl Responder {
    let (package_set, slug) = path.into_inner();
    match preview(state.get_ref().clone(), package_set, slug).await {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(e) => e.error_response(),
    }
}

/// Fetches the live cache while holding the package lock.
async fn preview(state: AppState, set_slug: String, slug: String) -> ApiResult<PackageWithCache> {
    let package = {
        let conn = state.db.connect()?;
        packages::get(&conn, &set_slug, &slug)?
    };
    let _guard = state.locks.acquire(package.package.id).await;
    blocking(move || {
        let conn = state.db.connect()?;
        let fetched = fetch_cache(&conn, &package.package, state.provider.as_ref())?;
        Ok(refreshed_package(fetched, state.resolver.as_ref()))
    })
    .await
}
