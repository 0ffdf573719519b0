//! Wire models shared between the Kerckhoff backend and its clients.
//!
//! - `model`: package sets, packages, versions, items, comments and the
//!   retrieval views built from them.
//! - `requests`: JSON bodies and query strings accepted by the API.
//! - `jobs`: status of background jobs such as the asynchronous sync.

pub mod jobs;
pub mod model;
pub mod requests;
