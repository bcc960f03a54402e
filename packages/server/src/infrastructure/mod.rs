//! Infrastructure layer: concrete repository, persistence and presence
//! implementations plus the DTOs they exchange.

pub mod dto;
pub mod persistence;
pub mod presence;
pub mod repository;
