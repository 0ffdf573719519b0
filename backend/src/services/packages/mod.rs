//! # Package Service Module
//!
//! Everything a newsroom does with a single package: creating and listing packages,
//! reading them live or at a past version, refreshing the live cache, freezing it into
//! versions and publishing the latest one.
//!
//! ## Sub-modules:
//!
//! - `create`: Creates a package inside a package set.
//! - `list`: Lists a set's packages with refreshed caches.
//! - `retrieve`: Serves the live or the historical view of one package.
//! - `update`: Edits metadata and tags.
//! - `preview`: Re-fetches the live cache from the cache provider.
//! - `publish`: Pushes the latest version to the publish sink.
//! - `snapshot`: Freezes selected cache items into a new version.
//! - `versions`: Lists versions and edits their descriptive fields.

mod create;
mod list;
mod preview;
mod publish;
mod retrieve;
mod snapshot;
mod update;
mod versions;

use actix_web::web::{get, patch, post, scope};
use actix_web::Scope;

/// The base path for all package-related API endpoints.
const API_PATH: &str = "/api/v1/package-sets/{package_set}/packages";

/// Configures and returns the Actix web scope for the package service.
///
/// # Registered Routes:
///
/// *   **`GET ""`**:
///     - **Handler**: `list::process`
///     - **Description**: Lists the set's packages, ordered by `?ordering=` (default `slug`).
///
/// *   **`POST ""`**:
///     - **Handler**: `create::process`
///     - **Description**: Creates a package and answers `201 Created`.
///
/// *   **`GET /{slug}`**:
///     - **Handler**: `retrieve::process`
///     - **Description**: The live view, or the historical view when `?version=n` names a
///       stored version (`cached: null`, `version_data: {...}`).
///
/// *   **`PATCH /{slug}`**:
///     - **Handler**: `update::process`
///     - **Description**: Updates metadata and tags.
///
/// *   **`POST /{slug}/preview`**:
///     - **Handler**: `preview::process`
///     - **Description**: Re-fetches the live cache and returns the package.
///
/// *   **`POST /{slug}/publish`**:
///     - **Handler**: `publish::process`
///     - **Description**: Pushes the latest version to the publish sink.
///
/// *   **`POST /{slug}/snapshot`**:
///     - **Handler**: `snapshot::process`
///     - **Description**: Creates a new version from selected cache items.
///
/// *   **`GET /{slug}/versions`**:
///     - **Handler**: `versions::list`
///     - **Description**: `{"results": [...]}` ordered by `id_num`.
///
/// *   **`PATCH /{slug}/versions/{id_num}`**:
///     - **Handler**: `versions::update`
///     - **Description**: Edits a version's title and description.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{slug}", get().to(retrieve::process))
        .route("/{slug}", patch().to(update::process))
        .route("/{slug}/preview", post().to(preview::process))
        .route("/{slug}/publish", post().to(publish::process))
        .route("/{slug}/snapshot", post().to(snapshot::process))
        .route("/{slug}/versions", get().to(versions::list))
        .route("/{slug}/versions/{id_num}", patch().to(versions::update))
}
