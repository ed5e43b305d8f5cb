//! In-app notification rows.

use agency_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// One of `agency_core::notification_types::VALID_NOTIFICATION_TYPES`.
    pub notification_type: String,
    pub message: String,
    pub related_client_id: Option<DbId>,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub notification_type: &'static str,
    pub message: String,
    pub related_client_id: Option<DbId>,
}
