//! # Package Set Retrieval Service
//!
//! Backs `GET /api/v1/package-sets/{slug}`. The detailed representation is the set
//! itself plus every integration attached to it.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::store::{integrations, package_sets};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package_set::PackageSetDetail;

/// Actix web handler for `GET /api/v1/package-sets/{slug}`.
///
/// # Arguments
/// * `slug` - The package set slug, from the URL path.
///
/// # Returns
/// - `200 OK` with the `PackageSetDetail`.
/// - `404 Not Found` if no set has this slug.
pub(crate) async fn process(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    _user: ActingUser,
) -> impl Responder {
    match get_package_set(&state, &slug) {
        Ok(detail) => HttpResponse::Ok().json(detail),
        Err(e) => e.error_response(),
    }
}

/// Loads the set and its integrations.
fn get_package_set(state: &AppState, slug: &str) -> ApiResult<PackageSetDetail> {
    let conn = state.db.connect()?;
    let package_set = package_sets::get(&conn, slug)?;
    let integrations = integrations::list_for_set(&conn, &package_set)?;
    Ok(PackageSetDetail {
        package_set,
        integrations,
    })
}
