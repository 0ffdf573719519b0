//! # Package Publish Service
//!
//! Backs `POST /api/v1/package-sets/{package_set}/packages/{slug}/publish`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: the package is loaded, including its `latest_version`.
//!
//! 2.  **Publish**: the latest version and its refreshed items are handed to the publish
//!     sink on the blocking pool.
//!
//! 3.  **Failure Handling**: a package with no version, or a sink failure, moves the package
//!     to the `error` state and answers `502 Bad Gateway`.
//!
//! 4.  **HTTP Response**: `200 OK` with an empty body on success.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::engine::publish;
use crate::error::ApiResult;
use crate::services::blocking;
use crate::store::packages;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use log::info;

/// Actix web handler for `POST .../packages/{slug}/publish`.
///
/// # Arguments
/// * `path` - `(package_set, slug)` from the URL.
/// * `user` - The acting user, logged with the publish.
///
/// # Returns
/// - `200 OK` with an empty body once the sink accepted the version.
/// - `404 Not Found` if the package does not exist.
/// - `502 Bad Gateway` if there is nothing to publish or the sink fails.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    user: ActingUser,
) -> impl Responder {
    let (package_set, slug) = path.into_inner();
    match publish_package(state.get_ref().clone(), package_set, slug, user).await {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(e) => e.error_response(),
    }
}

async fn publish_package(
    state: AppState,
    set_slug: String,
    slug: String,
    user: ActingUser,
) -> ApiResult<()> {
    blocking(move || {
        let conn = state.db.connect()?;
        let package = packages::get(&conn, &set_slug, &slug)?;
        publish(
            &conn,
            &package.package,
            state.resolver.as_ref(),
            state.publisher.as_ref(),
        )?;
        info!("{} published {}/{}", user.name(), set_slug, slug);
        Ok(())
    })
    .await
}
