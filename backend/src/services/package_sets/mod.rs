//! # Package Set Service Module
//!
//! Package sets group the packages of one publication. This module registers their
//! CRUD endpoints, the integration endpoint and the two ways of importing packages
//! from the cache provider.
//!
//! ## Sub-modules:
//!
//! - `create`: Creates a package set.
//! - `list`: Lists package sets.
//! - `get`: Detailed representation, including integrations.
//! - `update`: Replaces a set's metadata.
//! - `sync`: Imports the set's packages, blocking or as a background job.
//! - `integration`: Attaches an integration to a set.

mod create;
mod get;
mod integration;
mod list;
mod sync;
mod update;

use actix_web::web::{get, patch, post, scope};
use actix_web::Scope;

/// The base path for all package-set API endpoints.
const API_PATH: &str = "/api/v1/package-sets";

/// Configures and returns the Actix web scope for the package set service.
///
/// # Registered Routes:
///
/// *   **`GET ""`** / **`POST ""`**:
///     - **Handler**: `list::process`, `create::process`
///     - **Description**: Lists (`?ordering=`) and creates package sets.
///
/// *   **`GET /{slug}`** / **`PATCH /{slug}`**:
///     - **Handler**: `get::process`, `update::process`
///     - **Description**: Detailed representation and metadata update.
///
/// *   **`POST /{slug}/sync`** (also `/{slug}/sync_gdrive`):
///     - **Handler**: `sync::process`
///     - **Description**: Imports every package the provider has for the set and returns
///       a `SyncReport`.
///
/// *   **`POST /{slug}/async_sync`** (also `/{slug}/async_sync_gdrive`):
///     - **Handler**: `sync::process_async`
///     - **Description**: The same import as a background job; answers `{"id": job_id}`
///       to poll at `/api/v1/jobs/{id}`.
///
/// *   **`POST /{slug}/integration`**:
///     - **Handler**: `integration::process`
///     - **Description**: Attaches an integration to the set.
///
/// The `*_gdrive` paths are the names older clients use.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{slug}", get().to(get::process))
        .route("/{slug}", patch().to(update::process))
        .route("/{slug}/sync", post().to(sync::process))
        .route("/{slug}/sync_gdrive", post().to(sync::process))
        .route("/{slug}/async_sync", post().to(sync::process_async))
        .route("/{slug}/async_sync_gdrive", post().to(sync::process_async))
        .route("/{slug}/integration", post().to(integration::process))
}
