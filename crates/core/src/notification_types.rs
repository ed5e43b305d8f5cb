//! Notification type identifiers stored in `notifications.notification_type`.

/// A client was assigned to the receiving PR user.
pub const CLIENT_ASSIGNED: &str = "client_assigned";

/// A client the receiving user registered was approved.
pub const AGREEMENT_APPROVED: &str = "agreement_approved";

/// A client the receiving user registered was marked as a bad client.
pub const CLIENT_REJECTED: &str = "client_rejected";

/// Creative work was assigned to the receiving user.
pub const CREATIVE_ASSIGNED: &str = "creative_assigned";

/// Content writing was assigned to the receiving user.
pub const WRITING_ASSIGNED: &str = "writing_assigned";

pub const VALID_NOTIFICATION_TYPES: &[&str] = &[
    CLIENT_ASSIGNED,
    AGREEMENT_APPROVED,
    CLIENT_REJECTED,
    CREATIVE_ASSIGNED,
    WRITING_ASSIGNED,
];
