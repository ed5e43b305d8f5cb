//! Repository for the `clients` table.
//!
//! Writes that depend on the current workflow state carry that state in
//! their WHERE clause and return `None` when it no longer holds. Updates to
//! the appointment list and the content calendar are guarded by the row's
//! `updated_at` as read by the caller.

use agency_core::client::{
    Appointment, ContentIdea, FinalAgreement, ResearchFile, ServiceRequests,
};
use agency_core::sections::WorkflowSection;
use agency_core::status::{PrStatus, TaskStatus, TransferStatus};
use agency_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::client::{ClientRow, CreateClient};

const COLUMNS: &str = "id, name, phone, registered_by, registered_at, basic_info, \
                        assigned_to_pr, pr_status, transfer_status, service_requests, \
                        creative_status, content_status, research_status, pr_appointments, \
                        content_calendar, market_research_files, research_summary, \
                        assigned_creative_id, writing_responsible_id, final_agreement, \
                        created_at, updated_at";

/// Column holding the task status behind a workflow section.
fn task_status_column(section: WorkflowSection) -> Option<&'static str> {
    match section {
        WorkflowSection::Pr => None,
        WorkflowSection::MarketResearch => Some("research_status"),
        WorkflowSection::Creative => Some("creative_status"),
        WorkflowSection::Content => Some("content_status"),
    }
}

pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<ClientRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, phone, registered_by, basic_info, service_requests)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(input.name.trim())
            .bind(&input.phone)
            .bind(input.registered_by)
            .bind(Json(&input.basic_info))
            .bind(Json(&input.service_requests))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every client in registration order. The policy engine narrows this
    /// per caller.
    pub async fn list(pool: &PgPool) -> Result<Vec<ClientRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY registered_at, id");
        sqlx::query_as::<_, ClientRow>(&query).fetch_all(pool).await
    }

    /// Clients assigned to one PR user, in registration order.
    pub async fn list_for_pr(pool: &PgPool, pr_user_id: DbId) -> Result<Vec<ClientRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients WHERE assigned_to_pr = $1 ORDER BY registered_at, id"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(pr_user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn assign_pr(
        pool: &PgPool,
        id: DbId,
        pr_user_id: DbId,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET assigned_to_pr = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(pr_user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update_pr_status(
        pool: &PgPool,
        id: DbId,
        status: PrStatus,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query =
            format!("UPDATE clients SET pr_status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn update_service_requests(
        pool: &PgPool,
        id: DbId,
        requests: &ServiceRequests,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET service_requests = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(Json(requests))
            .fetch_optional(pool)
            .await
    }

    /// Replace the appointment list if the row is still at `read_at`.
    pub async fn set_appointments(
        pool: &PgPool,
        id: DbId,
        appointments: &[Appointment],
        read_at: Timestamp,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET pr_appointments = $2
             WHERE id = $1 AND updated_at = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(Json(appointments))
            .bind(read_at)
            .fetch_optional(pool)
            .await
    }

    /// Move `transfer_status` from `from` to `to`. `None` when the client is
    /// missing or no longer at `from`.
    pub async fn set_transfer_status(
        pool: &PgPool,
        id: DbId,
        from: TransferStatus,
        to: TransferStatus,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET transfer_status = $3
             WHERE id = $1 AND transfer_status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Record the agreement of an active client, approve it and close its
    /// PR pipeline in one statement.
    pub async fn save_agreement(
        pool: &PgPool,
        id: DbId,
        agreement: &FinalAgreement,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                final_agreement = $2,
                transfer_status = $3,
                pr_status = $4
             WHERE id = $1 AND transfer_status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(Json(agreement))
            .bind(TransferStatus::Approved.as_str())
            .bind(PrStatus::Completed.as_str())
            .bind(TransferStatus::Active.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Append one file's metadata to `market_research_files`.
    pub async fn add_research_file(
        pool: &PgPool,
        id: DbId,
        file: &ResearchFile,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET market_research_files = market_research_files || $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(Json(std::slice::from_ref(file)))
            .fetch_optional(pool)
            .await
    }

    pub async fn update_research_summary(
        pool: &PgPool,
        id: DbId,
        summary: Option<&str>,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET research_summary = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(summary)
            .fetch_optional(pool)
            .await
    }

    /// Replace the content calendar if the row is still at `read_at`.
    pub async fn set_content_calendar(
        pool: &PgPool,
        id: DbId,
        calendar: &[ContentIdea],
        read_at: Timestamp,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET content_calendar = $2
             WHERE id = $1 AND updated_at = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(Json(calendar))
            .bind(read_at)
            .fetch_optional(pool)
            .await
    }

    pub async fn assign_creative(
        pool: &PgPool,
        id: DbId,
        creative_user_id: Option<DbId>,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET assigned_creative_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(creative_user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn assign_writing_responsible(
        pool: &PgPool,
        id: DbId,
        content_user_id: Option<DbId>,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET writing_responsible_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(content_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the task status behind `section`.
    ///
    /// The PR section has no task status and never matches a row. Content
    /// work past `pending` also requires completed creative work.
    pub async fn update_task_status(
        pool: &PgPool,
        id: DbId,
        section: WorkflowSection,
        status: TaskStatus,
    ) -> Result<Option<ClientRow>, sqlx::Error> {
        let Some(column) = task_status_column(section) else {
            return Ok(None);
        };
        let guard = if section == WorkflowSection::Content {
            "AND ($2 = 'pending' OR creative_status = 'completed')"
        } else {
            ""
        };
        let query = format!(
            "UPDATE clients SET {column} = $2
             WHERE id = $1 {guard}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }
}
