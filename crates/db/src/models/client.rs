//! Client row model and its conversion into the domain record.

use agency_core::client::{
    Appointment, BasicInfo, Client, ContentIdea, FinalAgreement, ResearchFile, ServiceRequests,
};
use agency_core::error::CoreError;
use agency_core::status::{PrStatus, TaskStatus, TransferStatus};
use agency_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `clients` table.
///
/// Status columns arrive as text and embedded documents as JSONB; convert
/// with `Client::try_from` before handing the record to the policy engine.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub registered_by: DbId,
    pub registered_at: Timestamp,
    pub basic_info: Json<BasicInfo>,
    pub assigned_to_pr: Option<DbId>,
    pub pr_status: String,
    pub transfer_status: String,
    pub service_requests: Json<ServiceRequests>,
    pub creative_status: String,
    pub content_status: String,
    pub research_status: String,
    pub pr_appointments: Json<Vec<Appointment>>,
    pub content_calendar: Json<Vec<ContentIdea>>,
    pub market_research_files: Json<Vec<ResearchFile>>,
    pub research_summary: Option<String>,
    pub assigned_creative_id: Option<DbId>,
    pub writing_responsible_id: Option<DbId>,
    pub final_agreement: Option<Json<FinalAgreement>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new client.
#[derive(Debug, Clone)]
pub struct CreateClient {
    pub name: String,
    pub phone: String,
    pub registered_by: DbId,
    pub basic_info: BasicInfo,
    pub service_requests: ServiceRequests,
}

fn stored<T>(
    column: &str,
    id: DbId,
    value: &str,
    parse: fn(&str) -> Result<T, String>,
) -> Result<T, CoreError> {
    parse(value).map_err(|e| CoreError::Internal(format!("client {id} column {column}: {e}")))
}

impl TryFrom<ClientRow> for Client {
    type Error = CoreError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Ok(Client {
            id,
            name: row.name,
            phone: row.phone,
            registered_by: row.registered_by,
            registered_at: row.registered_at,
            basic_info: row.basic_info.0,
            assigned_to_pr: row.assigned_to_pr,
            pr_status: stored("pr_status", id, &row.pr_status, PrStatus::from_str_value)?,
            transfer_status: stored(
                "transfer_status",
                id,
                &row.transfer_status,
                TransferStatus::from_str_value,
            )?,
            service_requests: row.service_requests.0,
            creative_status: stored(
                "creative_status",
                id,
                &row.creative_status,
                TaskStatus::from_str_value,
            )?,
            content_status: stored(
                "content_status",
                id,
                &row.content_status,
                TaskStatus::from_str_value,
            )?,
            research_status: stored(
                "research_status",
                id,
                &row.research_status,
                TaskStatus::from_str_value,
            )?,
            pr_appointments: row.pr_appointments.0,
            content_calendar: row.content_calendar.0,
            market_research_files: row.market_research_files.0,
            research_summary: row.research_summary,
            assigned_creative_id: row.assigned_creative_id,
            writing_responsible_id: row.writing_responsible_id,
            final_agreement: row.final_agreement.map(|j| j.0),
        })
    }
}

/// Convert a batch of rows, failing on the first corrupt one.
pub fn rows_into_clients(rows: Vec<ClientRow>) -> Result<Vec<Client>, CoreError> {
    rows.into_iter().map(Client::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row() -> ClientRow {
        let at = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
        ClientRow {
            id: 11,
            name: "Acme".to_string(),
            phone: "0551234567".to_string(),
            registered_by: 2,
            registered_at: at,
            basic_info: Json(BasicInfo::default()),
            assigned_to_pr: Some(4),
            pr_status: "under_review".to_string(),
            transfer_status: "approved".to_string(),
            service_requests: Json(ServiceRequests {
                creative: true,
                ..ServiceRequests::default()
            }),
            creative_status: "completed".to_string(),
            content_status: "pending".to_string(),
            research_status: "in_progress".to_string(),
            pr_appointments: Json(Vec::new()),
            content_calendar: Json(Vec::new()),
            market_research_files: Json(Vec::new()),
            research_summary: None,
            assigned_creative_id: Some(6),
            writing_responsible_id: None,
            final_agreement: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn row_converts_status_columns() {
        let client = Client::try_from(row()).unwrap();
        assert_eq!(client.pr_status, PrStatus::UnderReview);
        assert_eq!(client.transfer_status, TransferStatus::Approved);
        assert_eq!(client.creative_status, TaskStatus::Completed);
        assert_eq!(client.research_status, TaskStatus::InProgress);
        assert!(client.service_requests.creative);
        assert_eq!(client.assigned_creative_id, Some(6));
    }

    #[test]
    fn unknown_stored_status_is_internal_error() {
        let mut bad = row();
        bad.transfer_status = "archived".to_string();
        match Client::try_from(bad) {
            Err(CoreError::Internal(msg)) => {
                assert!(msg.contains("client 11"));
                assert!(msg.contains("transfer_status"));
            }
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn batch_conversion_stops_at_corrupt_row() {
        let mut bad = row();
        bad.id = 12;
        bad.content_status = "blocked".to_string();
        assert!(rows_into_clients(vec![row(), bad]).is_err());
        assert_eq!(rows_into_clients(vec![row()]).unwrap().len(), 1);
    }
}
