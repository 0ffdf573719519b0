pub mod comment;
pub mod integration;
pub mod package;
pub mod package_item;
pub mod package_set;
pub mod package_version;
pub mod view;
