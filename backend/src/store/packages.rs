use crate::error::{conflict_on_unique, ApiError, ApiResult};
use crate::store::{json_column, parsed_column, Ordering};
use chrono::{DateTime, Utc};
use common::model::package::{CachedItem, Package, PackageState, PackageWithCache};
use common::model::package_set::PackageSet;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;
use std::collections::BTreeSet;

pub const ORDERING_FIELDS: &[&str] = &["slug", "last_fetched_date", "created_at", "updated_at"];

const SELECT: &str = "SELECT p.id, p.slug, s.slug, p.metadata, p.state, p.last_fetched_date,
            p.created_by, p.created_at, p.updated_at, p.tags, v.id_num, p.cached
     FROM packages p
     JOIN package_sets s ON s.id = p.package_set_id
     LEFT JOIN package_versions v ON v.id = p.latest_version_id";

fn from_row(row: &Row<'_>) -> rusqlite::Result<PackageWithCache> {
    Ok(PackageWithCache {
        package: Package {
            id: row.get(0)?,
            slug: row.get(1)?,
            package_set: row.get(2)?,
            metadata: json_column(row, 3)?,
            state: parsed_column(row, 4)?,
            last_fetched_date: row.get(5)?,
            created_by: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
            tags: json_column(row, 9)?,
            latest_version: row.get(10)?,
        },
        cached: json_column(row, 11)?,
    })
}

fn not_found(package_set: &str, slug: &str) -> ApiError {
    ApiError::not_found(format!("package '{}' in package set '{}'", slug, package_set))
}

pub fn insert(
    conn: &Connection,
    package_set: &PackageSet,
    slug: &str,
    metadata: &Value,
    tags: &BTreeSet<String>,
    user: &str,
) -> ApiResult<PackageWithCache> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO packages (package_set_id, slug, metadata, state, tags, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        params![
            package_set.id,
            slug,
            serde_json::to_string(metadata)?,
            PackageState::Stale.as_str(),
            serde_json::to_string(tags)?,
            user,
            now
        ],
    )
    .map_err(|e| {
        conflict_on_unique(
            e,
            format!("package '{}' already exists in package set '{}'", slug, package_set.slug),
        )
    })?;
    get_by_id(conn, conn.last_insert_rowid())
}

pub fn list(
    conn: &Connection,
    package_set: &PackageSet,
    ordering: Ordering,
) -> ApiResult<Vec<PackageWithCache>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE p.package_set_id = ?1 {}",
        SELECT,
        ordering.sql("p")
    ))?;
    let packages = stmt
        .query_map(params![package_set.id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(packages)
}

pub fn get(conn: &Connection, package_set: &str, slug: &str) -> ApiResult<PackageWithCache> {
    conn.query_row(
        &format!("{} WHERE s.slug = ?1 AND p.slug = ?2", SELECT),
        params![package_set, slug],
        from_row,
    )
    .optional()?
    .ok_or_else(|| not_found(package_set, slug))
}

pub fn find(conn: &Connection, package_set: &PackageSet, slug: &str) -> ApiResult<Option<PackageWithCache>> {
    let package = conn
        .query_row(
            &format!("{} WHERE p.package_set_id = ?1 AND p.slug = ?2", SELECT),
            params![package_set.id, slug],
            from_row,
        )
        .optional()?;
    Ok(package)
}

pub fn get_by_id(conn: &Connection, id: i64) -> ApiResult<PackageWithCache> {
    conn.query_row(&format!("{} WHERE p.id = ?1", SELECT), params![id], from_row)
        .optional()?
        .ok_or_else(|| ApiError::not_found(format!("package #{}", id)))
}

pub fn update(
    conn: &Connection,
    id: i64,
    metadata: Option<&Value>,
    tags: Option<&BTreeSet<String>>,
) -> ApiResult<PackageWithCache> {
    let metadata = metadata.map(serde_json::to_string).transpose()?;
    let tags = tags.map(serde_json::to_string).transpose()?;
    conn.execute(
        "UPDATE packages
         SET metadata = COALESCE(?1, metadata), tags = COALESCE(?2, tags), updated_at = ?3
         WHERE id = ?4",
        params![metadata, tags, Utc::now(), id],
    )?;
    get_by_id(conn, id)
}

/// The live cache as stored right now.
pub fn read_cache(conn: &Connection, id: i64) -> ApiResult<Vec<CachedItem>> {
    conn.query_row("SELECT cached FROM packages WHERE id = ?1", params![id], |row| {
        json_column(row, 0)
    })
    .optional()?
    .ok_or_else(|| ApiError::not_found(format!("package #{}", id)))
}

/// Replaces the live cache after a successful fetch and marks the package fresh.
pub fn store_cache(
    conn: &Connection,
    id: i64,
    cached: &[CachedItem],
    fetched_at: DateTime<Utc>,
) -> ApiResult<()> {
    conn.execute(
        "UPDATE packages SET cached = ?1, state = ?2, last_fetched_date = ?3, updated_at = ?3
         WHERE id = ?4",
        params![
            serde_json::to_string(cached)?,
            PackageState::Fresh.as_str(),
            fetched_at,
            id
        ],
    )?;
    Ok(())
}

pub fn set_state(conn: &Connection, id: i64, state: PackageState) -> ApiResult<()> {
    conn.execute(
        "UPDATE packages SET state = ?1, updated_at = ?2 WHERE id = ?3",
        params![state.as_str(), Utc::now(), id],
    )?;
    Ok(())
}

pub fn set_latest_version(conn: &Connection, id: i64, version_id: i64) -> ApiResult<()> {
    conn.execute(
        "UPDATE packages SET latest_version_id = ?1 WHERE id = ?2",
        params![version_id, id],
    )?;
    Ok(())
}
