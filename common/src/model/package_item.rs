use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemDataType {
    /// Inline text body stored in `data`.
    #[default]
    Text,
    /// Image referenced through a `{"src": ...}` pointer in `data`.
    Image,
    /// Any other file referenced through a `{"src": ...}` pointer in `data`.
    File,
}

impl ItemDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemDataType::Text => "text",
            ItemDataType::Image => "image",
            ItemDataType::File => "file",
        }
    }

    /// Whether the payload is a pointer to external content rather than inline data.
    pub fn is_pointer(&self) -> bool {
        !matches!(self, ItemDataType::Text)
    }
}

impl fmt::Display for ItemDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemDataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ItemDataType::Text),
            "image" => Ok(ItemDataType::Image),
            "file" => Ok(ItemDataType::File),
            other => Err(format!("unknown item data type '{}'", other)),
        }
    }
}

/// A content item frozen into a package version.
///
/// Its lifecycle is independent of the live cache entry it was copied from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageItem {
    pub id: i64,
    pub data_type: ItemDataType,
    pub data: Value,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub tags: BTreeSet<String>,
    /// Set when the item's content could not be resolved on the last refresh.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unavailable: bool,
}
