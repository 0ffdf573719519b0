//! # Comment Listing Service
//!
//! Backs `GET .../packages/{package}/comments`: the package's comments in creation order.

use super::package_id;
use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::store::comments;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::comment::Comment;

/// Actix web handler for `GET .../packages/{package}/comments`.
///
/// # Returns
/// - `200 OK` with an array of `Comment`.
/// - `404 Not Found` if the package does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    _user: ActingUser,
) -> impl Responder {
    let (package_set, package) = path.into_inner();
    match list_comments(&state, &package_set, &package) {
        Ok(list) => HttpResponse::Ok().json(list),
        Err(e) => e.error_response(),
    }
}

fn list_comments(state: &AppState, set_slug: &str, slug: &str) -> ApiResult<Vec<Comment>> {
    let conn = state.db.connect()?;
    let package_id = package_id(&conn, set_slug, slug)?;
    comments::list(&conn, package_id)
}
