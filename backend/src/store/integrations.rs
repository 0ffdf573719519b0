use crate::error::ApiResult;
use crate::store::json_column;
use chrono::Utc;
use common::model::integration::Integration;
use common::model::package_set::PackageSet;
use rusqlite::{params, Connection, Row};
use serde_json::Value;

const SELECT: &str = "SELECT i.id, s.slug, i.integration_type, i.metadata, i.created_by, i.created_at
     FROM integrations i JOIN package_sets s ON s.id = i.package_set_id";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Integration> {
    Ok(Integration {
        id: row.get(0)?,
        package_set: row.get(1)?,
        integration_type: row.get(2)?,
        metadata: json_column(row, 3)?,
        created_by: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn insert(
    conn: &Connection,
    package_set: &PackageSet,
    integration_type: &str,
    metadata: &Value,
    user: &str,
) -> ApiResult<Integration> {
    conn.execute(
        "INSERT INTO integrations (package_set_id, integration_type, metadata, created_by, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            package_set.id,
            integration_type,
            serde_json::to_string(metadata)?,
            user,
            Utc::now()
        ],
    )?;
    let id = conn.last_insert_rowid();
    let integration = conn.query_row(&format!("{} WHERE i.id = ?1", SELECT), params![id], from_row)?;
    Ok(integration)
}

pub fn list_for_set(conn: &Connection, package_set: &PackageSet) -> ApiResult<Vec<Integration>> {
    let mut stmt = conn.prepare(&format!("{} WHERE i.package_set_id = ?1 ORDER BY i.id", SELECT))?;
    let integrations = stmt
        .query_map(params![package_set.id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(integrations)
}
