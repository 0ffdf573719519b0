use crate::error::{conflict_on_unique, ApiError, ApiResult};
use crate::store::{json_column, Ordering};
use chrono::Utc;
use common::model::package_set::PackageSet;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::Value;

pub const ORDERING_FIELDS: &[&str] = &["slug", "created_at", "updated_at"];

const SELECT: &str =
    "SELECT s.id, s.slug, s.metadata, s.created_by, s.created_at, s.updated_at FROM package_sets s";

fn from_row(row: &Row<'_>) -> rusqlite::Result<PackageSet> {
    Ok(PackageSet {
        id: row.get(0)?,
        slug: row.get(1)?,
        metadata: json_column(row, 2)?,
        created_by: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub fn insert(conn: &Connection, slug: &str, metadata: &Value, user: &str) -> ApiResult<PackageSet> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO package_sets (slug, metadata, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![slug, serde_json::to_string(metadata)?, user, now],
    )
    .map_err(|e| conflict_on_unique(e, format!("package set '{}' already exists", slug)))?;
    get(conn, slug)
}

pub fn list(conn: &Connection, ordering: Ordering) -> ApiResult<Vec<PackageSet>> {
    let mut stmt = conn.prepare(&format!("{} {}", SELECT, ordering.sql("s")))?;
    let sets = stmt
        .query_map([], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sets)
}

pub fn get(conn: &Connection, slug: &str) -> ApiResult<PackageSet> {
    conn.query_row(&format!("{} WHERE s.slug = ?1", SELECT), params![slug], from_row)
        .optional()?
        .ok_or_else(|| ApiError::not_found(format!("package set '{}'", slug)))
}

pub fn update_metadata(conn: &Connection, slug: &str, metadata: &Value) -> ApiResult<PackageSet> {
    let changed = conn.execute(
        "UPDATE package_sets SET metadata = ?1, updated_at = ?2 WHERE slug = ?3",
        params![serde_json::to_string(metadata)?, Utc::now(), slug],
    )?;
    if changed == 0 {
        return Err(ApiError::not_found(format!("package set '{}'", slug)));
    }
    get(conn, slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;
    use serde_json::json;

    #[test]
    fn insert_then_get() {
        let db = TestDb::new();
        let conn = db.connect();
        let set = insert(&conn, "news", &json!({"desk": "metro"}), "editor").unwrap();
        assert_eq!(set.slug, "news");
        assert_eq!(set.created_by, "editor");
        assert_eq!(get(&conn, "news").unwrap(), set);
    }

    #[test]
    fn duplicate_slug_conflicts() {
        let db = TestDb::new();
        let conn = db.connect();
        insert(&conn, "news", &json!({}), "editor").unwrap();
        let err = insert(&conn, "news", &json!({}), "other").unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));
    }

    #[test]
    fn list_honours_ordering() {
        let db = TestDb::new();
        let conn = db.connect();
        for slug in ["b", "a", "c"] {
            insert(&conn, slug, &json!({}), "editor").unwrap();
        }
        let asc = list(&conn, Ordering::parse(None, ORDERING_FIELDS, "slug").unwrap()).unwrap();
        let slugs: Vec<_> = asc.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b", "c"]);

        let desc = list(&conn, Ordering::parse(Some("-slug"), ORDERING_FIELDS, "slug").unwrap()).unwrap();
        let slugs: Vec<_> = desc.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, ["c", "b", "a"]);
    }

    #[test]
    fn update_unknown_set_is_not_found() {
        let db = TestDb::new();
        let conn = db.connect();
        let err = update_metadata(&conn, "ghost", &json!({})).unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
