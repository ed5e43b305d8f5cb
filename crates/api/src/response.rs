//! Response envelope shared by all API handlers.
//!
//! Successful responses are `{ "data": ... }`; errors are produced by
//! [`crate::error::AppError`] as `{ "error", "code" }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: clients }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
