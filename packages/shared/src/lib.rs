//! Utilities shared by the staffwatch binaries and library.

pub mod logger;
pub mod time;
