//! Client record and its embedded sub-documents.
//!
//! This is the shape the policy engine reads. The database layer converts
//! its rows into [`Client`]; handlers serialize it straight to JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::status::{AppointmentStatus, PrStatus, TaskStatus, TransferStatus};
use crate::types::{DbId, Timestamp};

/// Maximum length of a client name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Accepted phone length range (characters, including separators).
pub const MIN_PHONE_LENGTH: usize = 7;
pub const MAX_PHONE_LENGTH: usize = 20;

/// Contact details captured at registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
}

/// Which specialist workflows the client asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequests {
    #[serde(default)]
    pub market_research: bool,
    #[serde(default)]
    pub content: bool,
    #[serde(default)]
    pub creative: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_video: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ads: Option<bool>,
}

/// A call booked by the PR owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub date: Timestamp,
    /// Display time as entered, e.g. `"14:00"`.
    #[serde(default)]
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One planned post in the content calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIdea {
    pub date: NaiveDate,
    pub idea: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_responsible_id: Option<DbId>,
}

/// Metadata for an uploaded market research file. The bytes live with the
/// file-storage provider; only the URL is kept here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchFile {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    pub uploaded_by: DbId,
    pub uploaded_at: Timestamp,
}

/// Contract terms recorded when a client is approved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalAgreement {
    pub approved: bool,
    pub agreed_price: f64,
    pub duration: String,
    pub start_date: NaiveDate,
    pub approved_by: DbId,
    pub approved_at: Timestamp,
    #[serde(default)]
    pub agreement_details: String,
}

/// The central workflow record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub registered_by: DbId,
    pub registered_at: Timestamp,
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub assigned_to_pr: Option<DbId>,
    #[serde(default)]
    pub pr_status: PrStatus,
    #[serde(default)]
    pub transfer_status: TransferStatus,
    #[serde(default)]
    pub service_requests: ServiceRequests,
    #[serde(default)]
    pub creative_status: TaskStatus,
    #[serde(default)]
    pub content_status: TaskStatus,
    #[serde(default)]
    pub research_status: TaskStatus,
    #[serde(default)]
    pub pr_appointments: Vec<Appointment>,
    #[serde(default)]
    pub content_calendar: Vec<ContentIdea>,
    #[serde(default)]
    pub market_research_files: Vec<ResearchFile>,
    #[serde(default)]
    pub research_summary: Option<String>,
    #[serde(default)]
    pub assigned_creative_id: Option<DbId>,
    #[serde(default)]
    pub writing_responsible_id: Option<DbId>,
    #[serde(default)]
    pub final_agreement: Option<FinalAgreement>,
}

impl Client {
    /// A freshly registered client: every workflow field at its initial value.
    pub fn new(id: DbId, name: &str, phone: &str, registered_by: DbId, at: Timestamp) -> Self {
        Self {
            id,
            name: name.to_string(),
            phone: phone.to_string(),
            registered_by,
            registered_at: at,
            basic_info: BasicInfo::default(),
            assigned_to_pr: None,
            pr_status: PrStatus::default(),
            transfer_status: TransferStatus::default(),
            service_requests: ServiceRequests::default(),
            creative_status: TaskStatus::default(),
            content_status: TaskStatus::default(),
            research_status: TaskStatus::default(),
            pr_appointments: Vec::new(),
            content_calendar: Vec::new(),
            market_research_files: Vec::new(),
            research_summary: None,
            assigned_creative_id: None,
            writing_responsible_id: None,
            final_agreement: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a client name: non-blank and bounded.
pub fn validate_client_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Client name must not be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Client name exceeds maximum length of {MAX_NAME_LENGTH}"
        ));
    }
    Ok(())
}

/// Validate a phone number: digits with optional `+`, spaces and dashes.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let len = phone.chars().count();
    if !(MIN_PHONE_LENGTH..=MAX_PHONE_LENGTH).contains(&len) {
        return Err(format!(
            "Phone must be between {MIN_PHONE_LENGTH} and {MAX_PHONE_LENGTH} characters"
        ));
    }
    let valid_chars = phone
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0));
    if !valid_chars || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(format!("Invalid phone number '{phone}'"));
    }
    Ok(())
}

/// Validate the optional contact email. Empty means "not provided".
pub fn validate_contact_email(email: &str) -> Result<(), String> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(format!("Invalid email address '{email}'"))
    }
}

/// Validate everything a moderator enters when registering a client.
pub fn validate_new_client(name: &str, phone: &str, info: &BasicInfo) -> Result<(), String> {
    validate_client_name(name)?;
    validate_phone(phone)?;
    validate_contact_email(&info.email)?;
    Ok(())
}

/// Validate an agreement price.
pub fn validate_agreed_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err("Agreed price must be a positive amount".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name("Acme Bakery").is_ok());
    }

    #[test]
    fn overlong_name_rejected() {
        let name = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = validate_client_name(&name).unwrap_err();
        assert!(err.contains("maximum length"));
    }

    #[test]
    fn phone_accepts_common_formats() {
        assert!(validate_phone("+966 55 123 4567").is_ok());
        assert!(validate_phone("055-123-4567").is_ok());
        assert!(validate_phone("0551234567").is_ok());
    }

    #[test]
    fn phone_rejects_letters_and_misplaced_plus() {
        assert!(validate_phone("055-CALL-NOW").is_err());
        assert!(validate_phone("055+1234567").is_err());
        assert!(validate_phone("+ - - - - -").is_err());
    }

    #[test]
    fn phone_length_bounds() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone(&"1".repeat(MAX_PHONE_LENGTH + 1)).is_err());
    }

    #[test]
    fn empty_email_is_allowed() {
        assert!(validate_contact_email("").is_ok());
    }

    #[test]
    fn malformed_email_rejected() {
        assert!(validate_contact_email("owner@acme.example").is_ok());
        assert!(validate_contact_email("not-an-email").is_err());
    }

    #[test]
    fn new_client_validation_stops_at_first_error() {
        let info = BasicInfo {
            email: "bad".to_string(),
            ..BasicInfo::default()
        };
        let err = validate_new_client("", "0551234567", &info).unwrap_err();
        assert!(err.contains("name"));
    }

    #[test]
    fn price_must_be_positive_and_finite() {
        assert!(validate_agreed_price(1500.0).is_ok());
        assert!(validate_agreed_price(0.0).is_err());
        assert!(validate_agreed_price(-10.0).is_err());
        assert!(validate_agreed_price(f64::NAN).is_err());
    }

    #[test]
    fn client_deserializes_with_missing_workflow_fields() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Acme",
            "registered_by": 1,
            "registered_at": "2026-01-05T09:00:00Z"
        });
        let client: Client = serde_json::from_value(json).unwrap();
        assert_eq!(client.transfer_status, TransferStatus::Active);
        assert_eq!(client.pr_status, PrStatus::Pending);
        assert!(client.pr_appointments.is_empty());
        assert!(!client.service_requests.content);
    }
}
