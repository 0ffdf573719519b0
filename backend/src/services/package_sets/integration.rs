//! # Integration Service
//!
//! Backs `POST /api/v1/package-sets/{slug}/integration`, which attaches an external
//! integration (for example a Drive folder) to a package set. Only the record is stored
//! here; credential exchange happens elsewhere.

use crate::app::AppState;
use crate::auth::ActingUser;
use crate::error::{ApiError, ApiResult};
use crate::services::metadata_object;
use crate::store::{integrations, package_sets};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::integration::Integration;
use common::requests::CreateIntegrationRequest;

/// Actix web handler for `POST /api/v1/package-sets/{slug}/integration`.
///
/// # Arguments
/// * `slug` - The package set slug, from the URL path.
/// * `user` - The acting user, recorded as `created_by`.
/// * `payload` - `CreateIntegrationRequest` with `integration_type` and optional `metadata`.
///
/// # Returns
/// - `200 OK` with the created `Integration`.
/// - `400 Bad Request` if `integration_type` is blank or `metadata` is not an object.
/// - `404 Not Found` if no set has this slug.
pub(crate) async fn process(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    user: ActingUser,
    payload: web::Json<CreateIntegrationRequest>,
) -> impl Responder {
    match create_integration(&state, &slug, &user, payload.into_inner()) {
        Ok(integration) => HttpResponse::Ok().json(integration),
        Err(e) => e.error_response(),
    }
}

fn create_integration(
    state: &AppState,
    slug: &str,
    user: &ActingUser,
    req: CreateIntegrationRequest,
) -> ApiResult<Integration> {
    let integration_type = req.integration_type.trim();
    if integration_type.is_empty() {
        return Err(ApiError::validation("integration_type is required"));
    }
    let metadata = metadata_object(req.metadata)?;
    let conn = state.db.connect()?;
    let package_set = package_sets::get(&conn, slug)?;
    integrations::insert(&conn, &package_set, integration_type, &metadata, user.name())
}
