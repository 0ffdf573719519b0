use crate::error::{ApiError, ApiResult};
use crate::store::{json_column, parsed_column};
use chrono::Utc;
use common::model::package::CachedItem;
use common::model::package_item::PackageItem;
use common::model::package_version::PackageVersion;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str = "SELECT v.id, v.id_num, v.title, v.package_id, v.created_by,
            v.version_description, v.created_at, v.updated_at
     FROM package_versions v";

fn from_row(row: &Row<'_>) -> rusqlite::Result<PackageVersion> {
    Ok(PackageVersion {
        id: row.get(0)?,
        id_num: row.get(1)?,
        title: row.get(2)?,
        package: row.get(3)?,
        created_by: row.get(4)?,
        version_description: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<PackageItem> {
    Ok(PackageItem {
        id: row.get(0)?,
        data_type: parsed_column(row, 1)?,
        data: json_column(row, 2)?,
        file_name: row.get(3)?,
        mime_type: row.get(4)?,
        tags: json_column(row, 5)?,
        unavailable: false,
    })
}

/// The id_num the next version of `package_id` receives. Only meaningful
/// inside the write transaction that also inserts that version.
pub fn next_id_num(conn: &Connection, package_id: i64) -> ApiResult<i64> {
    let next = conn.query_row(
        "SELECT COALESCE(MAX(id_num), 0) + 1 FROM package_versions WHERE package_id = ?1",
        params![package_id],
        |row| row.get(0),
    )?;
    Ok(next)
}

pub fn insert(
    conn: &Connection,
    package_id: i64,
    id_num: i64,
    title: &str,
    version_description: &str,
    user: &str,
) -> ApiResult<PackageVersion> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO package_versions
             (package_id, id_num, title, version_description, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![package_id, id_num, title, version_description, user, now],
    )?;
    let id = conn.last_insert_rowid();
    let version = conn.query_row(&format!("{} WHERE v.id = ?1", SELECT), params![id], from_row)?;
    Ok(version)
}

/// Stores an independent copy of a cache entry under `version_id`.
pub fn insert_item(
    conn: &Connection,
    version_id: i64,
    position: usize,
    item: &CachedItem,
) -> ApiResult<()> {
    conn.execute(
        "INSERT INTO package_items (version_id, position, data_type, data, file_name, mime_type, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            version_id,
            position as i64,
            item.data_type.as_str(),
            serde_json::to_string(&item.data)?,
            item.file_name(),
            item.mime_type,
            serde_json::to_string(&item.tags)?
        ],
    )?;
    Ok(())
}

/// All versions of a package, ascending by id_num.
pub fn list(conn: &Connection, package_id: i64) -> ApiResult<Vec<PackageVersion>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE v.package_id = ?1 ORDER BY v.id_num ASC",
        SELECT
    ))?;
    let versions = stmt
        .query_map(params![package_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(versions)
}

pub fn find_by_id_num(
    conn: &Connection,
    package_id: i64,
    id_num: i64,
) -> ApiResult<Option<PackageVersion>> {
    let version = conn
        .query_row(
            &format!("{} WHERE v.package_id = ?1 AND v.id_num = ?2", SELECT),
            params![package_id, id_num],
            from_row,
        )
        .optional()?;
    Ok(version)
}

/// Items frozen into a version, in snapshot order.
pub fn items(conn: &Connection, version_id: i64) -> ApiResult<Vec<PackageItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, data_type, data, file_name, mime_type, tags
         FROM package_items WHERE version_id = ?1 ORDER BY position ASC",
    )?;
    let items = stmt
        .query_map(params![version_id], item_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

/// Edits the descriptive fields of a version; everything else is immutable.
pub fn update_descriptive(
    conn: &Connection,
    package_id: i64,
    id_num: i64,
    title: Option<&str>,
    version_description: Option<&str>,
) -> ApiResult<PackageVersion> {
    let changed = conn.execute(
        "UPDATE package_versions
         SET title = COALESCE(?1, title),
             version_description = COALESCE(?2, version_description),
             updated_at = ?3
         WHERE package_id = ?4 AND id_num = ?5",
        params![title, version_description, Utc::now(), package_id, id_num],
    )?;
    if changed == 0 {
        return Err(ApiError::not_found(format!("version {}", id_num)));
    }
    find_by_id_num(conn, package_id, id_num)?
        .ok_or_else(|| ApiError::not_found(format!("version {}", id_num)))
}
