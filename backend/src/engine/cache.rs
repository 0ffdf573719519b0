use crate::engine::retrieve::version_with_items;
use crate::error::{ApiError, ApiResult};
use crate::sources::{CacheProvider, ContentResolver, PublishSink};
use crate::store::{packages, versions};
use chrono::Utc;
use common::model::package::{Package, PackageState, PackageWithCache};
use log::{info, warn};
use rusqlite::Connection;

/// Replaces the live cache of `package` with what the provider returns now.
///
/// On provider failure the package is moved to the `error` state and the
/// failure is returned; the previous cache is kept as it was.
pub fn fetch_cache(
    conn: &Connection,
    package: &Package,
    provider: &dyn CacheProvider,
) -> ApiResult<PackageWithCache> {
    match provider.fetch(&package.package_set, &package.slug) {
        Ok(items) => {
            packages::store_cache(conn, package.id, &items, Utc::now())?;
            info!(
                "Fetched {} items for {}/{}",
                items.len(),
                package.package_set,
                package.slug
            );
            packages::get_by_id(conn, package.id)
        }
        Err(e) => {
            warn!(
                "Fetch failed for {}/{}: {}",
                package.package_set, package.slug, e
            );
            packages::set_state(conn, package.id, PackageState::Error)?;
            Err(e.into())
        }
    }
}

/// Pushes the latest version of `package` to the publish sink.
///
/// A package without versions, or a sink failure, marks the package `error`.
pub fn publish(
    conn: &Connection,
    package: &Package,
    resolver: &dyn ContentResolver,
    sink: &dyn PublishSink,
) -> ApiResult<()> {
    let latest = match package.latest_version {
        Some(id_num) => versions::find_by_id_num(conn, package.id, id_num)?,
        None => None,
    };
    let Some(latest) = latest else {
        packages::set_state(conn, package.id, PackageState::Error)?;
        return Err(ApiError::ExternalFailure(format!(
            "package '{}' has no version to publish",
            package.slug
        )));
    };

    let version = version_with_items(conn, latest, resolver)?;
    if let Err(e) = sink.publish(package, &version) {
        warn!("Publish failed for {}/{}: {}", package.package_set, package.slug, e);
        packages::set_state(conn, package.id, PackageState::Error)?;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::snapshot::{create_version, VersionStub};
    use crate::sources::memory::MemorySource;
    use crate::test_support::TestDb;
    use common::model::package::CachedItem;

    #[test]
    fn fetch_replaces_cache_and_marks_fresh() {
        let db = TestDb::new();
        let conn = db.connect();
        let package = db.package(&conn, "news", "story1");
        let source = MemorySource::new();
        source.set_items("news", "story1", vec![CachedItem::text("headline", "Hi")]);

        let fetched = fetch_cache(&conn, &package.package, &source).unwrap();
        assert_eq!(fetched.package.state, PackageState::Fresh);
        assert_eq!(fetched.cached.len(), 1);
        assert!(fetched.package.last_fetched_date.is_some());
    }

    #[test]
    fn fetch_failure_records_error_state_and_keeps_cache() {
        let db = TestDb::new();
        let conn = db.connect();
        let package = db.package(&conn, "news", "story1");
        let source = MemorySource::new();
        source.set_items("news", "story1", vec![CachedItem::text("headline", "Hi")]);
        fetch_cache(&conn, &package.package, &source).unwrap();

        source.remove("news", "story1");
        let err = fetch_cache(&conn, &package.package, &source).unwrap_err();
        assert!(matches!(err, ApiError::ExternalFailure(_)));

        let reloaded = packages::get_by_id(&conn, package.package.id).unwrap();
        assert_eq!(reloaded.package.state, PackageState::Error);
        assert_eq!(reloaded.cached.len(), 1);
    }

    #[test]
    fn publish_sends_latest_version() {
        let db = TestDb::new();
        let mut conn = db.connect();
        let package = db.package(&conn, "news", "story1");
        let source = MemorySource::new();
        source.set_items("news", "story1", vec![CachedItem::text("headline", "Hi")]);
        fetch_cache(&conn, &package.package, &source).unwrap();
        let stub = VersionStub {
            title: "v1".to_string(),
            version_description: "first".to_string(),
        };
        for _ in 0..2 {
            create_version(&mut conn, package.package.id, "editor", &stub, &["headline".to_string()])
                .unwrap();
        }

        let package = packages::get_by_id(&conn, package.package.id).unwrap();
        publish(&conn, &package.package, &source, &source).unwrap();
        assert_eq!(source.published(), vec![("story1".to_string(), 2)]);
    }

    #[test]
    fn publish_failures_mark_error() {
        let db = TestDb::new();
        let conn = db.connect();
        let package = db.package(&conn, "news", "story1");
        let source = MemorySource::new();

        let err = publish(&conn, &package.package, &source, &source).unwrap_err();
        assert!(matches!(err, ApiError::ExternalFailure(_)));
        let reloaded = packages::get_by_id(&conn, package.package.id).unwrap();
        assert_eq!(reloaded.package.state, PackageState::Error);
    }

    #[test]
    fn rejected_publish_is_an_external_failure() {
        let db = TestDb::new();
        let mut conn = db.connect();
        let package = db.package(&conn, "news", "story1");
        let source = MemorySource::new();
        source.set_items("news", "story1", vec![CachedItem::text("headline", "Hi")]);
        fetch_cache(&conn, &package.package, &source).unwrap();
        let stub = VersionStub {
            title: "v1".to_string(),
            version_description: "first".to_string(),
        };
        create_version(&mut conn, package.package.id, "editor", &stub, &["headline".to_string()])
            .unwrap();
        source.reject_publish(true);

        let package = packages::get_by_id(&conn, package.package.id).unwrap();
        let err = publish(&conn, &package.package, &source, &source).unwrap_err();
        assert!(err.to_string().contains("sink offline"));
        assert!(source.published().is_empty());
    }
}
