//! # Comment Retrieval Service
//!
//! Backs `GET .../packages/{package}/comments/{id}`. A comment id that belongs to another
//! package is reported as not found.

use super::package_id;
use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::store::comments;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::comment::Comment;

/// Actix web handler for `GET .../packages/{package}/comments/{id}`.
///
/// # Arguments
/// * `path` - `(package_set, package, id)` from the URL.
///
/// # Returns
/// - `200 OK` with the `Comment`.
/// - `404 Not Found` if the package or comment does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String, i64)>,
    _user: ActingUser,
) -> impl Responder {
    let (package_set, package, id) = path.into_inner();
    match get_comment(&state, &package_set, &package, id) {
        Ok(comment) => HttpResponse::Ok().json(comment),
        Err(e) => e.error_response(),
    }
}

fn get_comment(state: &AppState, set_slug: &str, slug: &str, id: i64) -> ApiResult<Comment> {
    let conn = state.db.connect()?;
    let package_id = package_id(&conn, set_slug, slug)?;
    comments::get(&conn, package_id, id)
}
