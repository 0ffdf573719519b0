//! Import of every package a package set has at the source.

use crate::engine::cache::fetch_cache;
use crate::engine::locks::PackageLocks;
use crate::error::ApiResult;
use crate::sources::CacheProvider;
use crate::store::{packages, validate_slug};
use common::jobs::{SyncFailure, SyncReport};
use common::model::package_set::PackageSet;
use log::info;
use rusqlite::Connection;
use serde_json::json;
use std::collections::BTreeSet;

/// Creates missing packages and fetches every package's cache.
///
/// Blocking: takes the per-package locks with `blocking_acquire`. A failure
/// on one package is recorded in the report and does not stop the others.
/// `progress` receives the completed percentage after each package.
pub fn sync_package_set(
    conn: &Connection,
    package_set: &PackageSet,
    user: &str,
    provider: &dyn CacheProvider,
    locks: &PackageLocks,
    mut progress: impl FnMut(u32),
) -> ApiResult<SyncReport> {
    let slugs = provider.list_packages(&package_set.slug)?;
    let mut report = SyncReport::default();

    for (idx, slug) in slugs.iter().enumerate() {
        let outcome = packages::find(conn, package_set, slug).and_then(|existing| {
            let package = match existing {
                Some(package) => package,
                None => {
                    validate_slug(slug)?;
                    let created =
                        packages::insert(conn, package_set, slug, &json!({}), &BTreeSet::new(), user)?;
                    report.created.push(slug.clone());
                    created
                }
            };
            let _guard = locks.blocking_acquire(package.package.id);
            fetch_cache(conn, &package.package, provider)
        });

        match outcome {
            Ok(_) => report.refreshed.push(slug.clone()),
            Err(e) => report.failed.push(SyncFailure {
                slug: slug.clone(),
                error: e.to_string(),
            }),
        }
        progress(((idx + 1) * 100 / slugs.len()) as u32);
    }

    info!(
        "Synced package set '{}': {} created, {} refreshed, {} failed",
        package_set.slug,
        report.created.len(),
        report.refreshed.len(),
        report.failed.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::sources::memory::MemorySource;
    use crate::store::package_sets;
    use crate::test_support::TestDb;
    use common::model::package::{CachedItem, PackageState};

    #[test]
    fn creates_missing_and_refreshes_existing() {
        let db = TestDb::new();
        let conn = db.connect();
        let existing = db.package(&conn, "news", "story1");
        let set = package_sets::get(&conn, "news").unwrap();
        let source = MemorySource::new();
        source.set_items("news", "story1", vec![CachedItem::text("headline", "Hi")]);
        source.set_items("news", "story2", vec![CachedItem::text("body", "Text")]);

        let mut seen = Vec::new();
        let report =
            sync_package_set(&conn, &set, "bot", &source, &PackageLocks::new(), |p| seen.push(p)).unwrap();

        assert_eq!(report.created, ["story2"]);
        assert_eq!(report.refreshed, ["story1", "story2"]);
        assert!(report.failed.is_empty());
        assert_eq!(seen, [50, 100]);

        let story1 = packages::get_by_id(&conn, existing.package.id).unwrap();
        assert_eq!(story1.package.state, PackageState::Fresh);
        let story2 = packages::get(&conn, "news", "story2").unwrap();
        assert_eq!(story2.package.created_by, "bot");
        assert_eq!(story2.cached.len(), 1);
    }

    #[test]
    fn invalid_folder_names_are_reported() {
        let db = TestDb::new();
        let conn = db.connect();
        let set = package_sets::insert(&conn, "news", &json!({}), "editor").unwrap();
        let source = MemorySource::new();
        source.set_items("news", "bad name", vec![CachedItem::text("a", "b")]);
        source.set_items("news", "good", vec![CachedItem::text("a", "b")]);

        let report = sync_package_set(&conn, &set, "bot", &source, &PackageLocks::new(), |_| {}).unwrap();
        assert_eq!(report.created, ["good"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].slug, "bad name");
    }

    #[test]
    fn unknown_set_at_source_fails() {
        let db = TestDb::new();
        let conn = db.connect();
        let set = package_sets::insert(&conn, "news", &json!({}), "editor").unwrap();
        let err = sync_package_set(&conn, &set, "bot", &MemorySource::new(), &PackageLocks::new(), |_| {})
            .unwrap_err();
        assert!(matches!(err, ApiError::ExternalFailure(_)));
    }
}
