//! The package versioning engine.
//!
//! - `snapshot`: validates a selection of cache titles and freezes it into a
//!   new numbered version, atomically.
//! - `retrieve`: version lookup and the live/historical package views.
//! - `refresh`: the refresh-on-read step every outbound item goes through.
//! - `cache`: fetching the live cache and publishing the latest version.
//! - `sync`: importing every package of a package set from the provider.
//! - `locks`: per-package serialisation of fetches and snapshots.

pub mod cache;
pub mod locks;
pub mod refresh;
pub mod retrieve;
pub mod snapshot;
pub mod sync;

pub use cache::{fetch_cache, publish};
pub use locks::PackageLocks;
pub use retrieve::{get_all_versions, get_version, package_view};
pub use snapshot::{create_version, VersionStub};
pub use sync::sync_package_set;
