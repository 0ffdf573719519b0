use crate::engine::refresh::refresh_all;
use crate::error::ApiResult;
use crate::sources::ContentResolver;
use crate::store::versions;
use common::model::package::PackageWithCache;
use common::model::package_version::{PackageVersion, PackageVersionWithItems};
use common::model::view::{PackageDetail, PackageView};
use rusqlite::Connection;

/// Version number meaning "no specific version requested".
pub const NO_VERSION: i64 = -1;

/// Result of looking up a version by number.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionLookup {
    /// No version was asked for (parameter absent or `-1`).
    Unrequested,
    Found(PackageVersion),
    /// A version was asked for but the value is not numeric or matches nothing.
    NotFound,
}

/// All versions of a package in ascending `id_num` order.
pub fn get_all_versions(conn: &Connection, package_id: i64) -> ApiResult<Vec<PackageVersion>> {
    versions::list(conn, package_id)
}

/// Looks up a version from the raw `?version=` value.
pub fn get_version(
    conn: &Connection,
    package_id: i64,
    version_number: Option<&str>,
) -> ApiResult<VersionLookup> {
    let Some(raw) = version_number else {
        return Ok(VersionLookup::Unrequested);
    };
    let Ok(id_num) = raw.trim().parse::<i64>() else {
        return Ok(VersionLookup::NotFound);
    };
    if id_num == NO_VERSION {
        return Ok(VersionLookup::Unrequested);
    }
    Ok(match versions::find_by_id_num(conn, package_id, id_num)? {
        Some(version) => VersionLookup::Found(version),
        None => VersionLookup::NotFound,
    })
}

/// A version with its items, refreshed for output.
pub fn version_with_items(
    conn: &Connection,
    version: PackageVersion,
    resolver: &dyn ContentResolver,
) -> ApiResult<PackageVersionWithItems> {
    let items = refresh_all(versions::items(conn, version.id)?, resolver);
    Ok(PackageVersionWithItems { version, items })
}

/// The live cache of a package, refreshed for output.
pub fn refreshed_package(package: PackageWithCache, resolver: &dyn ContentResolver) -> PackageWithCache {
    PackageWithCache {
        package: package.package,
        cached: refresh_all(package.cached, resolver),
    }
}

/// Builds the retrieve representation: the requested version when it exists,
/// otherwise the live cache.
pub fn package_view(
    conn: &Connection,
    package: PackageWithCache,
    lookup: VersionLookup,
    resolver: &dyn ContentResolver,
) -> ApiResult<PackageDetail> {
    let view = match lookup {
        VersionLookup::Found(version) => {
            PackageView::Historical(version_with_items(conn, version, resolver)?)
        }
        VersionLookup::Unrequested | VersionLookup::NotFound => {
            PackageView::Live(refresh_all(package.cached, resolver))
        }
    };
    Ok(PackageDetail {
        package: package.package,
        view,
    })
}
