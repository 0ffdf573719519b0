//! # Comment Edit Service
//!
//! Backs `PATCH` and `DELETE` on `.../packages/{package}/comments/{id}`.
//!
//! ## Workflow
//!
//! 1.  **Lookup**: the comment is loaded within its package.
//!
//! 2.  **Ownership**: only the comment's author may change it; anyone else gets
//!     `401 Unauthorized` and the comment is left untouched.
//!
//! 3.  **Change**: `PATCH` replaces the trimmed body (blank bodies are rejected) and bumps
//!     `updated_at`; `DELETE` removes the comment and answers `204 No Content`.

use super::{comment_body, package_id};
use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::{ApiError, ApiResult};
use crate::store::comments;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::comment::Comment;
use common::requests::CommentRequest;
use log::info;
use rusqlite::Connection;

/// Actix web handler for `PATCH .../comments/{id}`.
///
/// # Returns
/// - `200 OK` with the edited `Comment`.
/// - `400 Bad Request` if the new body is blank.
/// - `401 Unauthorized` if the acting user is not the author.
/// - `404 Not Found` if the package or comment does not exist.
pub(crate) async fn update(
    state: web::Data<AppState>,
    path: web::Path<(String, String, i64)>,
    user: ActingUser,
    payload: web::Json<CommentRequest>,
) -> impl Responder {
    let (package_set, package, id) = path.into_inner();
    match edit_comment(&state, &package_set, &package, id, &user, &payload.body) {
        Ok(comment) => HttpResponse::Ok().json(comment),
        Err(e) => e.error_response(),
    }
}

/// Actix web handler for `DELETE .../comments/{id}`.
///
/// # Returns
/// - `204 No Content` once deleted.
/// - `401 Unauthorized` if the acting user is not the author.
/// - `404 Not Found` if the package or comment does not exist.
pub(crate) async fn remove(
    state: web::Data<AppState>,
    path: web::Path<(String, String, i64)>,
    user: ActingUser,
) -> impl Responder {
    let (package_set, package, id) = path.into_inner();
    match delete_comment(&state, &package_set, &package, id, &user) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

/// Loads the comment and checks `user` wrote it.
fn owned_comment(
    conn: &Connection,
    set_slug: &str,
    slug: &str,
    id: i64,
    user: &ActingUser,
) -> ApiResult<Comment> {
    let package_id = package_id(conn, set_slug, slug)?;
    let comment = comments::get(conn, package_id, id)?;
    if comment.created_by != user.name() {
        return Err(ApiError::Unauthorized);
    }
    Ok(comment)
}

fn edit_comment(
    state: &AppState,
    set_slug: &str,
    slug: &str,
    id: i64,
    user: &ActingUser,
    body: &str,
) -> ApiResult<Comment> {
    let body = comment_body(body)?;
    let conn = state.db.connect()?;
    let comment = owned_comment(&conn, set_slug, slug, id, user)?;
    comments::update_body(&conn, comment.package, id, body)
}

fn delete_comment(
    state: &AppState,
    set_slug: &str,
    slug: &str,
    id: i64,
    user: &ActingUser,
) -> ApiResult<()> {
    let conn = state.db.connect()?;
    let comment = owned_comment(&conn, set_slug, slug, id, user)?;
    comments::delete(&conn, comment.package, id)?;
    info!("{} deleted comment #{} on {}/{}", user.name(), id, set_slug, slug);
    Ok(())
}
