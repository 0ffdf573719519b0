//! Refresh-on-read for items.
//!
//! Image and file items carry a `{"src": ...}` pointer whose volatile facts
//! (`url`, `size`, `checksum`) are recomputed right before the item leaves the
//! service. A pointer that cannot be resolved does not fail the response: the
//! item comes back flagged `unavailable` with only its non-volatile payload.

use crate::sources::ContentResolver;
use common::model::package::CachedItem;
use common::model::package_item::{ItemDataType, PackageItem};
use log::warn;
use serde_json::{json, Value};

const VOLATILE_KEYS: [&str; 3] = ["url", "size", "checksum"];

pub trait Refresh: Sized {
    /// Recomputes derived fields. Idempotent; never changes identity.
    fn refresh(self, resolver: &dyn ContentResolver) -> Self;
}

/// Updates `data` in place and returns whether the content is available.
fn refresh_payload(
    label: &str,
    data_type: ItemDataType,
    data: &mut Value,
    resolver: &dyn ContentResolver,
) -> bool {
    if !data_type.is_pointer() {
        return true;
    }
    let Some(src) = data.get("src").and_then(Value::as_str).map(str::to_string) else {
        return true;
    };
    let Some(fields) = data.as_object_mut() else {
        return true;
    };

    match resolver.resolve(&src) {
        Ok(resolved) => {
            fields.insert("url".to_string(), json!(resolved.url));
            fields.insert("size".to_string(), json!(resolved.size));
            fields.insert("checksum".to_string(), json!(resolved.checksum));
            true
        }
        Err(e) => {
            warn!("Could not refresh item '{}' ({}): {}", label, src, e);
            for key in VOLATILE_KEYS {
                fields.remove(key);
            }
            false
        }
    }
}

impl Refresh for PackageItem {
    fn refresh(mut self, resolver: &dyn ContentResolver) -> Self {
        self.unavailable =
            !refresh_payload(&self.file_name, self.data_type, &mut self.data, resolver);
        self
    }
}

impl Refresh for CachedItem {
    fn refresh(mut self, resolver: &dyn ContentResolver) -> Self {
        self.unavailable = !refresh_payload(&self.title, self.data_type, &mut self.data, resolver);
        self
    }
}

pub fn refresh_all<T: Refresh>(items: Vec<T>, resolver: &dyn ContentResolver) -> Vec<T> {
    items
        .into_iter()
        .map(|item| item.refresh(resolver))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::memory::MemorySource;
    use std::collections::BTreeSet;

    fn image(src: &str) -> PackageItem {
        PackageItem {
            id: 1,
            data_type: ItemDataType::Image,
            data: json!({ "src": src, "caption": "Skyline" }),
            file_name: "photo.png".to_string(),
            mime_type: Some("image/png".to_string()),
            tags: BTreeSet::new(),
            unavailable: false,
        }
    }

    #[test]
    fn text_items_are_untouched() {
        let source = MemorySource::new();
        let item = CachedItem::text("headline", "Hello");
        assert_eq!(item.clone().refresh(&source), item);
    }

    #[test]
    fn pointer_items_gain_resolved_fields() {
        let source = MemorySource::new();
        source.set_content("news/story1/photo.png", b"png-bytes");

        let refreshed = image("news/story1/photo.png").refresh(&source);
        assert!(!refreshed.unavailable);
        assert_eq!(refreshed.data["size"], 9);
        assert_eq!(refreshed.data["url"], "memory://news/story1/photo.png");
        assert_eq!(refreshed.data["caption"], "Skyline");
        assert_eq!(refreshed.id, 1);
    }

    #[test]
    fn refresh_is_idempotent() {
        let source = MemorySource::new();
        source.set_content("a.png", b"x");
        let once = image("a.png").refresh(&source);
        let twice = once.clone().refresh(&source);
        assert_eq!(once, twice);
    }

    #[test]
    fn unreachable_content_is_flagged_not_fatal() {
        let source = MemorySource::new();
        source.set_content("gone.png", b"x");
        let resolved = image("gone.png").refresh(&source);
        assert!(resolved.data.get("url").is_some());

        let empty = MemorySource::new();
        let flagged = resolved.refresh(&empty);
        assert!(flagged.unavailable);
        assert!(flagged.data.get("url").is_none());
        assert_eq!(flagged.data["src"], "gone.png");
    }
}
