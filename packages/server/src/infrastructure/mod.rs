//! Infrastructure layer: DTOs and concrete implementations of the domain's
//! persistence and directory traits.

pub mod dto;
pub mod repository;
pub mod user_directory;
