//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - `Deserialize` create/update DTOs where the API accepts them directly

pub mod client;
pub mod notification;
pub mod session;
pub mod user;
