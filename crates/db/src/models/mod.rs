//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the write operations that need them
//! - The joined read models the presentation layer consumes

pub mod history;
pub mod relationship;
pub mod track;
pub mod user;
