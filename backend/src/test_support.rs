//! Fixtures shared by unit and HTTP tests.

use crate::app::{self, AppState};
use crate::auth::USER_HEADER;
use crate::db::Database;
use crate::engine::PackageLocks;
use crate::job_controller::state::{start_job_updater, JobsState};
use crate::sources::memory::MemorySource;
use crate::store::{package_sets, packages};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{web, App};
use chrono::Utc;
use common::model::package::{Package, PackageState, PackageWithCache};
use common::model::package_item::{ItemDataType, PackageItem};
use common::model::package_version::{PackageVersion, PackageVersionWithItems};
use rusqlite::Connection;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;

/// A migrated database in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    database: Database,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("kerckhoff.sqlite"));
        database.migrate().unwrap();
        TestDb {
            _dir: dir,
            database,
        }
    }

    pub fn connect(&self) -> Connection {
        self.database.connect().unwrap()
    }

    pub fn database(&self) -> Database {
        self.database.clone()
    }

    /// Creates `set_slug` if missing, then a new package `pkg_slug` in it.
    pub fn package(&self, conn: &Connection, set_slug: &str, pkg_slug: &str) -> PackageWithCache {
        let package_set = match package_sets::get(conn, set_slug) {
            Ok(existing) => existing,
            Err(_) => package_sets::insert(conn, set_slug, &json!({}), "editor").unwrap(),
        };
        packages::insert(conn, &package_set, pkg_slug, &json!({}), &BTreeSet::new(), "editor").unwrap()
    }
}

pub fn sample_package() -> Package {
    let now = Utc::now();
    Package {
        id: 1,
        slug: "story1".to_string(),
        package_set: "news".to_string(),
        metadata: json!({}),
        state: PackageState::Fresh,
        last_fetched_date: Some(now),
        created_by: "editor".to_string(),
        created_at: now,
        updated_at: now,
        tags: BTreeSet::new(),
        latest_version: None,
    }
}

pub fn sample_version(package_id: i64, id_num: i64) -> PackageVersionWithItems {
    let now = Utc::now();
    PackageVersionWithItems {
        version: PackageVersion {
            id: id_num,
            id_num,
            title: "Print".to_string(),
            package: package_id,
            created_by: "editor".to_string(),
            version_description: "first cut".to_string(),
            created_at: now,
            updated_at: now,
        },
        items: vec![PackageItem {
            id: 1,
            data_type: ItemDataType::Text,
            data: json!("Hello"),
            file_name: "headline".to_string(),
            mime_type: Some("text/plain".to_string()),
            tags: BTreeSet::new(),
            unavailable: false,
        }],
    }
}

/// Application state backed by a temporary database and a `MemorySource`
/// standing in for the provider, the resolver and the publish sink.
pub struct TestApp {
    _db: TestDb,
    pub source: Arc<MemorySource>,
    pub state: AppState,
    pub jobs: JobsState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = TestDb::new();
        let source = Arc::new(MemorySource::new());
        let state = AppState {
            db: db.database(),
            provider: source.clone(),
            resolver: source.clone(),
            publisher: source.clone(),
            locks: PackageLocks::new(),
        };
        let (jobs, rx) = JobsState::new();
        tokio::spawn(start_job_updater(jobs.clone(), rx));
        TestApp {
            _db: db,
            source,
            state,
            jobs,
        }
    }
}

/// Runs `req` through a fresh service over `app`'s state. Empty or non-JSON
/// bodies come back as `Value::Null`.
pub async fn send(app: &TestApp, req: TestRequest) -> (StatusCode, Value) {
    let service = test::init_service(
        App::new()
            .app_data(web::Data::new(app.state.clone()))
            .app_data(web::Data::new(app.jobs.clone()))
            .configure(app::configure),
    )
    .await;
    let resp = test::call_service(&service, req.to_request()).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub async fn api_get(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    send(app, TestRequest::get().uri(uri).insert_header((USER_HEADER, "editor"))).await
}

pub async fn api_post(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        TestRequest::post()
            .uri(uri)
            .insert_header((USER_HEADER, "editor"))
            .set_json(body),
    )
    .await
}

pub async fn api_patch(app: &TestApp, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        app,
        TestRequest::patch()
            .uri(uri)
            .insert_header((USER_HEADER, "editor"))
            .set_json(body),
    )
    .await
}
