//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod approval;
pub mod campaign;
pub mod pricing_config;
pub mod question;
pub mod reward;
pub mod snapshot;
pub mod user;
