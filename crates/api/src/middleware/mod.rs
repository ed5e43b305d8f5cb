//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- `admin` only.
//! - [`rbac::RequireManager`] -- `moderator` or `admin`.
//!
//! Per-client checks (visibility, section ownership) happen in the client
//! handlers once the record is loaded.

pub mod auth;
pub mod rbac;
