use crate::sources::{PublishSink, SourceError};
use common::model::package::Package;
use common::model::package_version::PackageVersionWithItems;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Writes published packages to `<root>/<package set>/<package>.json`.
#[derive(Debug, Clone)]
pub struct LocalPublisher {
    root: PathBuf,
}

#[derive(Serialize)]
struct PublishedDocument<'a> {
    package: &'a Package,
    version: &'a PackageVersionWithItems,
}

impl LocalPublisher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, package: &Package) -> PathBuf {
        self.root
            .join(&package.package_set)
            .join(format!("{}.json", package.slug))
    }
}

impl PublishSink for LocalPublisher {
    fn publish(
        &self,
        package: &Package,
        version: &PackageVersionWithItems,
    ) -> Result<(), SourceError> {
        let target = self.document_path(package);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SourceError::io(parent, e))?;
        }
        let body = serde_json::to_vec_pretty(&PublishedDocument { package, version })?;

        // Write next to the target and rename so readers never see a partial file.
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, body).map_err(|e| SourceError::io(&staging, e))?;
        fs::rename(&staging, &target).map_err(|e| SourceError::io(&target, e))?;

        info!(
            "Published {}/{} version {} to {}",
            package.package_set,
            package.slug,
            version.version.id_num,
            target.display()
        );
        Ok(())
    }
}
