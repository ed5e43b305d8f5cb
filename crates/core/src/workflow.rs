//! Client lifecycle rules applied before a change is persisted.
//!
//! Every function here works on an in-memory [`Client`] and either applies
//! the change or returns the [`CoreError`] that explains why not. The
//! persistence layer re-checks the `transfer_status` precondition in its
//! UPDATE so concurrent writers cannot both win.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::client::{validate_agreed_price, Appointment, Client, ContentIdea, FinalAgreement};
use crate::error::CoreError;
use crate::sections::WorkflowSection;
use crate::status::{AppointmentStatus, PrStatus, TaskStatus, TransferStatus};
use crate::types::{DbId, Timestamp};

/// Maximum length of a single content idea.
pub const MAX_IDEA_LENGTH: usize = 2000;

/// Check that the transfer lifecycle allows `from -> to`.
pub fn validate_transfer_transition(
    from: TransferStatus,
    to: TransferStatus,
) -> Result<(), CoreError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(CoreError::InvalidTransition {
            field: "transfer_status",
            from: from.as_str(),
            to: to.as_str(),
        })
    }
}

/// Terms entered by the PR owner when closing a deal.
#[derive(Debug, Clone, Deserialize)]
pub struct AgreementInput {
    pub agreed_price: f64,
    pub duration: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub agreement_details: String,
}

/// Approve an active client: records the agreement, moves the transfer
/// status to `approved` and closes the PR pipeline.
pub fn approve_agreement(
    client: &mut Client,
    input: AgreementInput,
    approved_by: DbId,
    at: Timestamp,
) -> Result<(), CoreError> {
    validate_transfer_transition(client.transfer_status, TransferStatus::Approved)?;
    validate_agreed_price(input.agreed_price).map_err(CoreError::Validation)?;
    let duration = input.duration.trim();
    if duration.is_empty() {
        return Err(CoreError::Validation(
            "Agreement duration must not be empty".to_string(),
        ));
    }

    client.final_agreement = Some(FinalAgreement {
        approved: true,
        agreed_price: input.agreed_price,
        duration: duration.to_string(),
        start_date: input.start_date,
        approved_by,
        approved_at: at,
        agreement_details: input.agreement_details,
    });
    client.transfer_status = TransferStatus::Approved;
    client.pr_status = PrStatus::Completed;
    Ok(())
}

/// Mark an active client as a bad client. Terminal.
pub fn mark_bad_client(client: &mut Client) -> Result<(), CoreError> {
    validate_transfer_transition(client.transfer_status, TransferStatus::BadClient)?;
    client.transfer_status = TransferStatus::BadClient;
    Ok(())
}

/// Append a newly booked call. Only `scheduled` appointments can be booked.
pub fn add_appointment(client: &mut Client, appointment: Appointment) -> Result<(), CoreError> {
    if appointment.status != AppointmentStatus::Scheduled {
        return Err(CoreError::Validation(format!(
            "New appointments must be scheduled, got '{}'",
            appointment.status
        )));
    }
    client.pr_appointments.push(appointment);
    Ok(())
}

/// Resolve the appointment at `index`. A scheduled call can be completed or
/// cancelled; a resolved call stays as it is.
pub fn update_appointment_status(
    client: &mut Client,
    index: usize,
    status: AppointmentStatus,
) -> Result<(), CoreError> {
    let count = client.pr_appointments.len();
    let appointment = client.pr_appointments.get_mut(index).ok_or_else(|| {
        CoreError::Validation(format!(
            "Appointment index {index} out of range (client has {count})"
        ))
    })?;
    if appointment.status != AppointmentStatus::Scheduled || status == AppointmentStatus::Scheduled
    {
        return Err(CoreError::InvalidTransition {
            field: "appointment status",
            from: appointment.status.as_str(),
            to: status.as_str(),
        });
    }
    appointment.status = status;
    Ok(())
}

/// Insert `idea` keeping the calendar sorted by date. Ideas on the same date
/// keep their insertion order.
pub fn insert_content_idea(calendar: &mut Vec<ContentIdea>, idea: ContentIdea) {
    let pos = calendar.partition_point(|existing| existing.date <= idea.date);
    calendar.insert(pos, idea);
}

/// Validate the text of a content idea.
pub fn validate_content_idea(idea: &ContentIdea) -> Result<(), String> {
    let text = idea.idea.trim();
    if text.is_empty() {
        return Err("Content idea must not be empty".to_string());
    }
    if text.chars().count() > MAX_IDEA_LENGTH {
        return Err(format!(
            "Content idea exceeds maximum length of {MAX_IDEA_LENGTH}"
        ));
    }
    Ok(())
}

/// Set the specialist task status behind `section`.
///
/// The PR section has no task status. Content work cannot start before the
/// creative work is completed.
pub fn set_task_status(
    client: &mut Client,
    section: WorkflowSection,
    status: TaskStatus,
) -> Result<(), CoreError> {
    match section {
        WorkflowSection::Pr => Err(CoreError::Validation(
            "The PR section has no task status; update pr_status instead".to_string(),
        )),
        WorkflowSection::MarketResearch => {
            client.research_status = status;
            Ok(())
        }
        WorkflowSection::Creative => {
            client.creative_status = status;
            Ok(())
        }
        WorkflowSection::Content => {
            if status != TaskStatus::Pending && client.creative_status != TaskStatus::Completed {
                return Err(CoreError::Conflict(
                    "Content work waits for creative work to be completed".to_string(),
                ));
            }
            client.content_status = status;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn ts(day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 5, day, 9, 0, 0).unwrap()
    }

    fn client() -> Client {
        Client::new(1, "Acme", "0551234567", 2, ts(1))
    }

    fn terms() -> AgreementInput {
        AgreementInput {
            agreed_price: 12_000.0,
            duration: " 6 months ".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            agreement_details: "Monthly retainer".to_string(),
        }
    }

    fn idea(day: u32, text: &str) -> ContentIdea {
        ContentIdea {
            date: NaiveDate::from_ymd_opt(2026, 6, day).unwrap(),
            idea: text.to_string(),
            platform: None,
            writing_responsible_id: None,
        }
    }

    fn call(status: AppointmentStatus) -> Appointment {
        Appointment {
            date: ts(3),
            time: "11:30".to_string(),
            status,
            notes: None,
        }
    }

    #[test]
    fn approval_records_terms_and_closes_pr_pipeline() {
        let mut c = client();
        approve_agreement(&mut c, terms(), 9, ts(2)).unwrap();
        assert_eq!(c.transfer_status, TransferStatus::Approved);
        assert_eq!(c.pr_status, PrStatus::Completed);
        let agreement = c.final_agreement.unwrap();
        assert!(agreement.approved);
        assert_eq!(agreement.duration, "6 months");
        assert_eq!(agreement.approved_by, 9);
        assert_eq!(agreement.approved_at, ts(2));
    }

    #[test]
    fn approval_refused_once_client_left_active() {
        let mut c = client();
        c.transfer_status = TransferStatus::BadClient;
        let err = approve_agreement(&mut c, terms(), 9, ts(2)).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidTransition {
                from: "bad_client",
                to: "approved",
                ..
            }
        );
        assert!(c.final_agreement.is_none());
    }

    #[test]
    fn approval_validates_price_and_duration() {
        let mut c = client();
        let mut input = terms();
        input.agreed_price = 0.0;
        assert_matches!(
            approve_agreement(&mut c, input, 9, ts(2)),
            Err(CoreError::Validation(_))
        );

        let mut input = terms();
        input.duration = "   ".to_string();
        assert_matches!(
            approve_agreement(&mut c, input, 9, ts(2)),
            Err(CoreError::Validation(_))
        );
        assert_eq!(c.transfer_status, TransferStatus::Active);
    }

    #[test]
    fn bad_client_is_terminal() {
        let mut c = client();
        mark_bad_client(&mut c).unwrap();
        assert_eq!(c.transfer_status, TransferStatus::BadClient);
        assert_matches!(
            mark_bad_client(&mut c),
            Err(CoreError::InvalidTransition { .. })
        );
        assert_matches!(
            approve_agreement(&mut c, terms(), 9, ts(2)),
            Err(CoreError::InvalidTransition { .. })
        );
    }

    #[test]
    fn converted_clients_cannot_move() {
        let mut c = client();
        c.transfer_status = TransferStatus::Converted;
        assert!(mark_bad_client(&mut c).is_err());
        assert!(validate_transfer_transition(TransferStatus::Converted, TransferStatus::Active).is_err());
    }

    #[test]
    fn content_calendar_stays_sorted_and_stable() {
        let mut calendar = Vec::new();
        insert_content_idea(&mut calendar, idea(10, "launch teaser"));
        insert_content_idea(&mut calendar, idea(3, "behind the scenes"));
        insert_content_idea(&mut calendar, idea(10, "launch recap"));
        insert_content_idea(&mut calendar, idea(7, "customer quote"));
        let texts: Vec<_> = calendar.iter().map(|i| i.idea.as_str()).collect();
        assert_eq!(
            texts,
            vec!["behind the scenes", "customer quote", "launch teaser", "launch recap"]
        );
    }

    #[test]
    fn blank_idea_rejected() {
        assert!(validate_content_idea(&idea(1, "  ")).is_err());
        assert!(validate_content_idea(&idea(1, "Reel")).is_ok());
        let long = "x".repeat(MAX_IDEA_LENGTH + 1);
        assert!(validate_content_idea(&idea(1, &long)).is_err());
    }

    #[test]
    fn only_scheduled_calls_can_be_booked() {
        let mut c = client();
        add_appointment(&mut c, call(AppointmentStatus::Scheduled)).unwrap();
        assert!(add_appointment(&mut c, call(AppointmentStatus::Completed)).is_err());
        assert_eq!(c.pr_appointments.len(), 1);
    }

    #[test]
    fn resolved_calls_stay_resolved() {
        let mut c = client();
        add_appointment(&mut c, call(AppointmentStatus::Scheduled)).unwrap();
        update_appointment_status(&mut c, 0, AppointmentStatus::Completed).unwrap();
        assert_eq!(c.pr_appointments[0].status, AppointmentStatus::Completed);
        assert_matches!(
            update_appointment_status(&mut c, 0, AppointmentStatus::Cancelled),
            Err(CoreError::InvalidTransition { .. })
        );
        assert_matches!(
            update_appointment_status(&mut c, 5, AppointmentStatus::Cancelled),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn content_task_waits_for_creative() {
        let mut c = client();
        assert_matches!(
            set_task_status(&mut c, WorkflowSection::Content, TaskStatus::InProgress),
            Err(CoreError::Conflict(_))
        );
        set_task_status(&mut c, WorkflowSection::Creative, TaskStatus::Completed).unwrap();
        set_task_status(&mut c, WorkflowSection::Content, TaskStatus::InProgress).unwrap();
        assert_eq!(c.content_status, TaskStatus::InProgress);
    }

    #[test]
    fn pr_section_has_no_task_status() {
        let mut c = client();
        assert_matches!(
            set_task_status(&mut c, WorkflowSection::Pr, TaskStatus::Completed),
            Err(CoreError::Validation(_))
        );
    }
}
