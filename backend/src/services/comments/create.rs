//! # Comment Creation Service
//!
//! Backs `POST .../packages/{package}/comments`. The body is trimmed and must not be
//! empty; the acting user becomes the author.

use super::{comment_body, package_id};
use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::ApiResult;
use crate::store::comments;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::comment::Comment;
use common::requests::CommentRequest;

/// Actix web handler for `POST .../packages/{package}/comments`.
///
/// # Arguments
/// * `path` - `(package_set, package)` from the URL.
/// * `user` - The acting user, recorded as the author.
/// * `payload` - `CommentRequest` with the comment `body`.
///
/// # Returns
/// - `201 Created` with the stored `Comment`.
/// - `400 Bad Request` if the body is blank.
/// - `404 Not Found` if the package does not exist.
pub(crate) async fn process(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    user: ActingUser,
    payload: web::Json<CommentRequest>,
) -> impl Responder {
    let (package_set, package) = path.into_inner();
    match create_comment(&state, &package_set, &package, &user, &payload.body) {
        Ok(comment) => HttpResponse::Created().json(comment),
        Err(e) => e.error_response(),
    }
}

fn create_comment(
    state: &AppState,
    set_slug: &str,
    slug: &str,
    user: &ActingUser,
    body: &str,
) -> ApiResult<Comment> {
    let body = comment_body(body)?;
    let conn = state.db.connect()?;
    let package_id = package_id(&conn, set_slug, slug)?;
    comments::insert(&conn, package_id, body, user.name())
}
