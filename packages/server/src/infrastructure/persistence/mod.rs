//! Snapshot persistence implementations.
//!
//! - `json_file`: one pretty-printed JSON file per document
//! - 将来的に: `sqlite` など

pub mod json_file;

pub use json_file::JsonFileSnapshotStore;
