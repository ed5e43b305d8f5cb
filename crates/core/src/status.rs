//! Client workflow status enums.
//!
//! Each enum is stored as its snake_case name in a TEXT column guarded by a
//! CHECK constraint. The string constants must match the migrations.

use serde::{Deserialize, Serialize};

macro_rules! define_text_status {
    (
        $(#[$meta:meta])*
        $name:ident, $valid:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        /// All valid stored values.
        pub const $valid: &[&str] = &[$( $text ),+];

        impl $name {
            /// Convert from the stored string value.
            pub fn from_str_value(s: &str) -> Result<Self, String> {
                match s {
                    $( $text => Ok(Self::$variant), )+
                    _ => Err(format!(
                        "Invalid {} '{s}'. Must be one of: {}",
                        $field,
                        $valid.join(", ")
                    )),
                }
            }

            /// Convert to the stored string value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_status! {
    /// Progress of the PR pipeline for a client.
    PrStatus, VALID_PR_STATUSES, "pr status" {
        Pending => "pending",
        InProgress => "in_progress",
        UnderReview => "under_review",
        Completed => "completed",
    }
}

define_text_status! {
    /// Handoff state of a client out of the PR pipeline.
    TransferStatus, VALID_TRANSFER_STATUSES, "transfer status" {
        Active => "active",
        BadClient => "bad_client",
        Approved => "approved",
        /// Legacy terminal state. Stored and rendered, never targeted.
        Converted => "converted",
    }
}

define_text_status! {
    /// Progress of a specialist task (research, creative, content).
    TaskStatus, VALID_TASK_STATUSES, "task status" {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

define_text_status! {
    /// State of a single PR appointment.
    AppointmentStatus, VALID_APPOINTMENT_STATUSES, "appointment status" {
        Scheduled => "scheduled",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl Default for PrStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl Default for TransferStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl TransferStatus {
    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Only `active` clients move, and only to `approved` or `bad_client`.
    pub fn can_transition_to(&self, next: TransferStatus) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Approved) | (Self::Active, Self::BadClient)
        )
    }
}

impl TaskStatus {
    /// Pending or in progress.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}
