mod app;
mod auth;
mod config;
mod db;
mod engine;
mod error;
mod job_controller;
mod services;
mod sources;
mod store;
#[cfg(test)]
mod test_support;

use crate::app::AppState;
use crate::config::AppConfig;
use crate::job_controller::state::JobsState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let state = AppState::from_config(&config);
    state.db.migrate().map_err(|e| {
        error!("Could not prepare database {}: {}", state.db.path().display(), e);
        io::Error::other(e.to_string())
    })?;

    // Initialize job controller state
    let (jobs_state, rx) = JobsState::new();
    let updater_state = jobs_state.clone();
    tokio::spawn(async move {
        job_controller::state::start_job_updater(updater_state, rx).await;
    });

    info!(
        "Server running at {} (sources: {}, publishing to: {})",
        config.bind_url(),
        config.source_root.display(),
        config.publish_root.display()
    );

    let json_limit = config.json_limit_bytes;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(jobs_state.clone()))
            .configure(app::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
