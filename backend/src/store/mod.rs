//! Row-level persistence for every resource.
//!
//! Functions take a `&Connection` (a `Transaction` derefs to one) so callers
//! decide the transaction boundaries.

pub mod comments;
pub mod integrations;
pub mod package_sets;
pub mod packages;
pub mod versions;

use crate::error::{ApiError, ApiResult};
use regex::Regex;
use rusqlite::types::Type;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use std::str::FromStr;
use std::sync::OnceLock;

/// Reads a JSON-encoded text column.
pub(crate) fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a text column holding the string form of an enum.
pub(crate) fn parsed_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: String| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Checks a URL slug (letters, digits, `-`, `_`, `.`, `&`).
pub fn validate_slug(slug: &str) -> ApiResult<()> {
    static SLUG_RE: OnceLock<Regex> = OnceLock::new();
    let re = SLUG_RE.get_or_init(|| {
        Regex::new(r"^[-a-zA-Z0-9_.&]+$").expect("slug pattern is a valid regex")
    });
    if re.is_match(slug) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "'{}' is not a valid slug (allowed: letters, digits, '-', '_', '.', '&')",
            slug
        )))
    }
}

/// A whitelisted `ORDER BY` clause parsed from `?ordering=`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ordering {
    column: &'static str,
    descending: bool,
}

impl Ordering {
    /// Parses `field` or `-field`; only names in `allowed` are accepted.
    pub fn parse(
        raw: Option<&str>,
        allowed: &[&'static str],
        default: &'static str,
    ) -> ApiResult<Self> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Self {
                column: default,
                descending: false,
            });
        };
        let (name, descending) = match raw.strip_prefix('-') {
            Some(name) => (name, true),
            None => (raw, false),
        };
        allowed
            .iter()
            .find(|&&column| column == name)
            .map(|&column| Self { column, descending })
            .ok_or_else(|| {
                ApiError::validation(format!(
                    "cannot order by '{}' (allowed: {})",
                    name,
                    allowed.join(", ")
                ))
            })
    }

    /// `ORDER BY` clause for a table aliased as `alias`; ties break on id.
    pub(crate) fn sql(&self, alias: &str) -> String {
        let dir = if self.descending { "DESC" } else { "ASC" };
        format!(
            "ORDER BY {alias}.{col} {dir}, {alias}.id {dir}",
            alias = alias,
            col = self.column,
            dir = dir
        )
    }
}
