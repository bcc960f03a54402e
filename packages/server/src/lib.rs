//! Staff activity tracker.
//!
//! Records staff chat messages and per-day connected time, persists them as
//! JSON documents and serves them through a token-protected read-only HTTP API.

pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
