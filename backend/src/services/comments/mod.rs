//! # Comment Service Module
//!
//! Discussion threads on a package, under
//! `/api/v1/package-sets/{package_set}/packages/{package}/comments`.
//! Anyone may read and post; only a comment's author may edit or delete it.
//!
//! ## Sub-modules:
//!
//! - `create`: Posts a comment.
//! - `list`: Lists a package's comments.
//! - `get`: Reads one comment.
//! - `edit`: Author-only edit and delete.

mod create;
mod edit;
mod get;
mod list;

use crate::error::{ApiError, ApiResult};
use crate::store::packages;
use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;
use rusqlite::Connection;

const API_PATH: &str = "/api/v1/package-sets/{package_set}/packages/{package}/comments";

/// Configures and returns the Actix web scope for the comment service.
///
/// # Registered Routes:
///
/// *   **`GET ""`** / **`POST ""`**: `list::process`, `create::process`
/// *   **`GET /{id}`**: `get::process`
/// *   **`PATCH /{id}`** / **`DELETE /{id}`**: `edit::update`, `edit::remove`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", patch().to(edit::update))
        .route("/{id}", delete().to(edit::remove))
}

fn package_id(conn: &Connection, set_slug: &str, slug: &str) -> ApiResult<i64> {
    Ok(packages::get(conn, set_slug, slug)?.package.id)
}

fn comment_body(body: &str) -> ApiResult<&str> {
    match body.trim() {
        "" => Err(ApiError::validation("A comment may not be empty.")),
        trimmed => Ok(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{api_get, api_post, send, TestApp};
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use serde_json::json;

    const URL: &str = "/api/v1/package-sets/news/packages/story1/comments";

    async fn seeded() -> TestApp {
        let app = TestApp::new().await;
        api_post(&app, "/api/v1/package-sets", json!({"slug": "news"})).await;
        api_post(&app, "/api/v1/package-sets/news/packages", json!({"slug": "story1"})).await;
        app
    }

    #[actix_web::test]
    async fn post_and_list_comments() {
        let app = seeded().await;
        let (status, comment) = api_post(&app, URL, json!({"body": "  needs a photo "})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(comment["body"], "needs a photo");
        assert_eq!(comment["created_by"], "editor");

        let (status, _) = api_post(&app, URL, json!({"body": "   "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = api_get(&app, URL).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let id = comment["id"].as_i64().unwrap();
        let (status, body) = api_get(&app, &format!("{}/{}", URL, id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
    }

    #[actix_web::test]
    async fn only_author_edits_and_deletes() {
        let app = seeded().await;
        let (_, comment) = api_post(&app, URL, json!({"body": "draft"})).await;
        let url = format!("{}/{}", URL, comment["id"]);

        let (status, _) = send(
            &app,
            TestRequest::patch()
                .uri(&url)
                .insert_header((crate::auth::USER_HEADER, "copy-desk"))
                .set_json(json!({"body": "mine now"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            TestRequest::delete()
                .uri(&url)
                .insert_header((crate::auth::USER_HEADER, "copy-desk")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = send(
            &app,
            TestRequest::patch()
                .uri(&url)
                .insert_header((crate::auth::USER_HEADER, "editor"))
                .set_json(json!({"body": "final"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"], "final");

        let (status, _) = send(
            &app,
            TestRequest::delete()
                .uri(&url)
                .insert_header((crate::auth::USER_HEADER, "editor")),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = api_get(&app, &url).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
