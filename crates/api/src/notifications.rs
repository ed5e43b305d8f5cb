//! In-app notifications raised by client workflow changes.
//!
//! Delivery is best effort: a failed insert is logged and never fails the
//! request that triggered it.

use agency_core::notification_types::VALID_NOTIFICATION_TYPES;
use agency_core::types::DbId;
use agency_db::models::notification::CreateNotification;
use agency_db::repositories::NotificationRepo;
use agency_db::DbPool;

pub async fn notify(
    pool: &DbPool,
    user_id: DbId,
    notification_type: &'static str,
    message: String,
    related_client_id: Option<DbId>,
) {
    debug_assert!(
        VALID_NOTIFICATION_TYPES.contains(&notification_type),
        "unknown notification type {notification_type}"
    );
    let input = CreateNotification {
        user_id,
        notification_type,
        message,
        related_client_id,
    };
    match NotificationRepo::create(pool, &input).await {
        Ok(id) => tracing::debug!(
            notification_id = id,
            user_id,
            notification_type,
            "Notification created"
        ),
        Err(e) => tracing::warn!(
            error = %e,
            user_id,
            notification_type,
            "Failed to create notification"
        ),
    }
}
