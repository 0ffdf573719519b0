use crate::error::{ApiError, ApiResult};
use chrono::Utc;
use common::model::comment::Comment;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str =
    "SELECT c.id, c.package_id, c.body, c.created_by, c.created_at, c.updated_at FROM comments c";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        package: row.get(1)?,
        body: row.get(2)?,
        created_by: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

pub fn list(conn: &Connection, package_id: i64) -> ApiResult<Vec<Comment>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE c.package_id = ?1 ORDER BY c.created_at ASC, c.id ASC",
        SELECT
    ))?;
    let comments = stmt
        .query_map(params![package_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(comments)
}

pub fn insert(conn: &Connection, package_id: i64, body: &str, user: &str) -> ApiResult<Comment> {
    conn.execute(
        "INSERT INTO comments (package_id, body, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![package_id, body, user, Utc::now()],
    )?;
    get(conn, package_id, conn.last_insert_rowid())
}

pub fn get(conn: &Connection, package_id: i64, id: i64) -> ApiResult<Comment> {
    conn.query_row(
        &format!("{} WHERE c.package_id = ?1 AND c.id = ?2", SELECT),
        params![package_id, id],
        from_row,
    )
    .optional()?
    .ok_or_else(|| ApiError::not_found(format!("comment #{}", id)))
}

pub fn update_body(conn: &Connection, package_id: i64, id: i64, body: &str) -> ApiResult<Comment> {
    conn.execute(
        "UPDATE comments SET body = ?1, updated_at = ?2 WHERE package_id = ?3 AND id = ?4",
        params![body, Utc::now(), package_id, id],
    )?;
    get(conn, package_id, id)
}

pub fn delete(conn: &Connection, package_id: i64, id: i64) -> ApiResult<()> {
    let removed = conn.execute(
        "DELETE FROM comments WHERE package_id = ?1 AND id = ?2",
        params![package_id, id],
    )?;
    if removed == 0 {
        return Err(ApiError::not_found(format!("comment #{}", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDb;

    #[test]
    fn comment_lifecycle() {
        let db = TestDb::new();
        let conn = db.connect();
        let package = db.package(&conn, "news", "story1");

        let first = insert(&conn, package.package.id, "Needs a photo", "editor").unwrap();
        let second = insert(&conn, package.package.id, "Added", "photo").unwrap();
        assert_eq!(list(&conn, package.package.id).unwrap(), vec![first.clone(), second]);

        let edited = update_body(&conn, package.package.id, first.id, "Needs two photos").unwrap();
        assert_eq!(edited.body, "Needs two photos");

        delete(&conn, package.package.id, first.id).unwrap();
        assert!(matches!(
            get(&conn, package.package.id, first.id),
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            delete(&conn, package.package.id, first.id),
            Err(ApiError::NotFound(_))
        ));
    }
}
