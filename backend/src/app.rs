use crate::config::AppConfig;
use crate::db::Database;
use crate::engine::PackageLocks;
use crate::services;
use crate::sources::local::LocalSource;
use crate::sources::publish::LocalPublisher;
use crate::sources::{CacheProvider, ContentResolver, PublishSink};
use actix_web::web;
use std::sync::Arc;

/// Shared application state, injected into handlers as `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub provider: Arc<dyn CacheProvider>,
    pub resolver: Arc<dyn ContentResolver>,
    pub publisher: Arc<dyn PublishSink>,
    pub locks: PackageLocks,
}

impl AppState {
    /// State wired to the folder-backed source and publisher from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let source = Arc::new(LocalSource::new(&config.source_root));
        AppState {
            db: Database::new(&config.database_path),
            provider: source.clone(),
            resolver: source,
            publisher: Arc::new(LocalPublisher::new(&config.publish_root)),
            locks: PackageLocks::new(),
        }
    }
}

/// Registers every API scope.
///
/// Actix does not fall through from a scope whose prefix matched, so the
/// nested scopes go before the scopes they are nested under.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(services::comments::configure_routes())
        .service(services::packages::configure_routes())
        .service(services::package_sets::configure_routes())
        .service(services::jobs::configure_routes());
}
