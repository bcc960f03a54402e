//! Data Transfer Objects (DTOs) for staffwatch.
//!
//! DTOs are organized by usage:
//! - `document`: shapes shared by the JSON files and the HTTP payloads
//! - `http`: HTTP-only response DTOs

pub mod conversion;
pub mod document;
pub mod http;
