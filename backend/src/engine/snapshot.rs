//! Version creation.
//!
//! A snapshot reads the live cache, checks the requested titles against it,
//! takes the next `id_num`, stores the version with independent copies of the
//! selected items and moves `latest_version`, all inside one `IMMEDIATE`
//! transaction. SQLite admits a single writer at a time, so two snapshots of
//! the same package can never observe the same maximum `id_num`, and the
//! `(package_id, id_num)` unique index rejects a duplicate should one slip
//! through. Any error drops the transaction, leaving nothing behind.

use crate::error::{ApiError, ApiResult};
use crate::store::{packages, versions};
use common::model::package::CachedItem;
use common::model::package_version::PackageVersion;
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use std::collections::{BTreeSet, HashSet};

/// The caller-supplied part of a new version.
#[derive(Debug, Clone)]
pub struct VersionStub {
    pub title: String,
    pub version_description: String,
}

impl VersionStub {
    fn validate(&self) -> ApiResult<()> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation("A version title is required."));
        }
        if self.version_description.trim().is_empty() {
            return Err(ApiError::validation("A version description is required."));
        }
        Ok(())
    }
}

fn empty_selection() -> ApiError {
    ApiError::validation("A version must include at least one item to be updated!")
}

/// Deduplicates `included` and checks every title exists in `cached`.
///
/// Titles compare by exact, case-sensitive equality. Missing titles are
/// reported sorted.
pub fn validate_selection(cached: &[CachedItem], included: &[String]) -> ApiResult<BTreeSet<String>> {
    let included: BTreeSet<String> = included.iter().cloned().collect();
    if included.is_empty() {
        return Err(empty_selection());
    }

    let cached_titles: HashSet<&str> = cached.iter().map(|item| item.title.as_str()).collect();
    let nonexistent: Vec<String> = included
        .iter()
        .filter(|title| !cached_titles.contains(title.as_str()))
        .cloned()
        .collect();

    if !nonexistent.is_empty() {
        return Err(ApiError::Validation {
            message: format!(
                "The following titles do not exist in cache, and cannot be included: {}.",
                nonexistent.join(", ")
            ),
            titles: nonexistent,
        });
    }
    Ok(included)
}

/// Freezes the selected cache items of `package_id` into a new version.
pub fn create_version(
    conn: &mut Connection,
    package_id: i64,
    user: &str,
    stub: &VersionStub,
    included: &[String],
) -> ApiResult<PackageVersion> {
    if included.is_empty() {
        return Err(empty_selection());
    }
    stub.validate()?;

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    // One read of the cache serves both validation and copying.
    let cached = packages::read_cache(&tx, package_id)?;
    let selection = validate_selection(&cached, included)?;

    let id_num = versions::next_id_num(&tx, package_id)?;
    let version = versions::insert(
        &tx,
        package_id,
        id_num,
        stub.title.trim(),
        stub.version_description.trim(),
        user,
    )?;

    // Cache order; a title present twice in the cache is copied once.
    let mut copied: HashSet<&str> = HashSet::new();
    for item in &cached {
        if selection.contains(&item.title) && copied.insert(item.title.as_str()) {
            versions::insert_item(&tx, version.id, copied.len() - 1, item)?;
        }
    }

    packages::set_latest_version(&tx, package_id, version.id)?;
    tx.commit()?;

    info!(
        "Created version {} of package #{} with {} items (by {})",
        version.id_num,
        package_id,
        copied.len(),
        user
    );
    Ok(version)
}
