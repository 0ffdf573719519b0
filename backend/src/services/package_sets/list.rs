//! # Package Set Listing Service
//!
//! Backs `GET /api/v1/package-sets`. `?ordering=` accepts `slug`, `created_at` or
//! `updated_at`, with a leading `-` for descending order; slug ascending is the default.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::store::{package_sets, Ordering};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::package_set::PackageSet;
use common::requests::ListQuery;

/// Actix web handler for `GET /api/v1/package-sets`.
///
/// # Returns
/// - `200 OK` with an array of `PackageSet`.
/// - `400 Bad Request` for an unknown ordering field.
pub(crate) async fn process(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
    _user: ActingUser,
) -> impl Responder {
    match list_package_sets(&state, query.ordering.as_deref()) {
        Ok(sets) => HttpResponse::Ok().json(sets),
        Err(e) => e.error_response(),
    }
}

fn list_package_sets(state: &AppState, ordering: Option<&str>) -> ApiResult<Vec<PackageSet>> {
    let ordering = Ordering::parse(ordering, package_sets::ORDERING_FIELDS, "slug")?;
    let conn = state.db.connect()?;
    package_sets::list(&conn, ordering)
}
