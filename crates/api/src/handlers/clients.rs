//! Handlers for the `/clients` resource.
//!
//! Every handler loads the snapshot or record it needs, applies the
//! policy engine from `agency_core` for the caller's role, and only then
//! persists. Single-record routes refuse clients outside the caller's
//! working set with 403; section edits additionally require
//! [`can_edit_section`], and cross-section actions [`can_perform`].

use agency_core::client::{
    validate_new_client, Appointment, BasicInfo, Client, ContentIdea, ResearchFile,
    ServiceRequests,
};
use agency_core::error::CoreError;
use agency_core::navigation::{default_tab_for_role, ClientTab};
use agency_core::notification_types::{
    AGREEMENT_APPROVED, CLIENT_ASSIGNED, CLIENT_REJECTED, CREATIVE_ASSIGNED, WRITING_ASSIGNED,
};
use agency_core::roles::Role;
use agency_core::sections::{
    allowed_actions, can_edit_section, can_perform, editable_sections, visible_sections,
    ClientAction, WorkflowSection,
};
use agency_core::status::{AppointmentStatus, PrStatus, TaskStatus, TransferStatus};
use agency_core::types::{DbId, Timestamp};
use agency_core::visibility::{filter_clients, is_client_visible, ClientQuery};
use agency_core::workflow::{
    add_appointment, approve_agreement, insert_content_idea, mark_bad_client, set_task_status,
    update_appointment_status, validate_content_idea, AgreementInput,
};
use agency_db::models::client::{rows_into_clients, ClientRow, CreateClient};
use agency_db::models::user::User;
use agency_db::repositories::{ClientRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::notifications::notify;
use crate::query::ClientListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub service_requests: ServiceRequests,
}

/// A client with the sections the caller may see and edit.
#[derive(Debug, Serialize)]
pub struct ClientDetail {
    pub client: Client,
    pub visible_sections: BTreeSet<WorkflowSection>,
    pub editable_sections: BTreeSet<WorkflowSection>,
    pub allowed_actions: BTreeSet<ClientAction>,
}

#[derive(Debug, Deserialize)]
pub struct AssignPrRequest {
    pub pr_user_id: DbId,
}

#[derive(Debug, Deserialize)]
pub struct PrStatusRequest {
    pub status: PrStatus,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentStatusRequest {
    pub status: AppointmentStatus,
}

#[derive(Debug, Deserialize)]
pub struct ResearchFileRequest {
    pub name: String,
    pub url: String,
    pub content_type: Option<String>,
    pub size_bytes: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ResearchSummaryRequest {
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssigneeRequest {
    /// `null` clears the assignment.
    pub user_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
    pub section: WorkflowSection,
    pub status: TaskStatus,
}

type ClientResponse = Json<DataResponse<Client>>;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The client snapshot the caller's role can draw from. PR users only ever
/// see their own assignments, so only those rows are loaded.
pub(crate) async fn load_working_set(state: &AppState, auth: &AuthUser) -> AppResult<Vec<Client>> {
    let rows = match auth.role() {
        Some(Role::Pr) => ClientRepo::list_for_pr(&state.pool, auth.user_id).await?,
        _ => ClientRepo::list(&state.pool).await?,
    };
    Ok(rows_into_clients(rows)?)
}

/// Load one client the caller may access, with the `updated_at` it was read at.
async fn load_client(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<(Timestamp, Client)> {
    let row = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    let read_at = row.updated_at;
    let client = Client::try_from(row)?;
    if !is_client_visible(&client, auth.role(), auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Client is outside your working set".into(),
        )));
    }
    Ok((read_at, client))
}

fn require_section(client: &Client, auth: &AuthUser, section: WorkflowSection) -> AppResult<()> {
    if can_edit_section(client, auth.role(), section) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "You cannot edit the {} section of this client",
            section.as_str()
        ))))
    }
}

fn require_action(client: &Client, auth: &AuthUser, action: ClientAction) -> AppResult<()> {
    if can_perform(client, auth.role(), action) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(format!(
            "Only editors of the {} section can do this",
            action.section().as_str()
        ))))
    }
}

/// Convert the result of a guarded UPDATE. `None` means the state the
/// caller acted on changed underneath it.
fn persisted(row: Option<ClientRow>, what: &str) -> AppResult<Client> {
    let row = row.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Client changed while {what}; reload and try again"
        )))
    })?;
    Ok(Client::try_from(row)?)
}

async fn require_staff(state: &AppState, user_id: DbId, role: Role) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    if !user.is_active || user.parsed_role() != Some(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "User {user_id} is not an active {role} user"
        ))));
    }
    Ok(user)
}

fn ok(client: Client) -> AppResult<ClientResponse> {
    Ok(Json(DataResponse { data: client }))
}

// ---------------------------------------------------------------------------
// Listing and registration
// ---------------------------------------------------------------------------

/// GET /api/v1/clients?tab=&search=
///
/// Without `tab`, the role's default tab applies. An unrecognised `tab`
/// falls into the role's catch-all branch.
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ClientListParams>,
) -> AppResult<Json<DataResponse<Vec<Client>>>> {
    let role = auth.role();
    let tab = match params.tab.as_deref() {
        None => Some(default_tab_for_role(role)),
        Some(raw) => ClientTab::parse(raw),
    };
    let snapshot = load_working_set(&state, &auth).await?;
    let query = ClientQuery {
        role,
        user_id: auth.user_id,
        tab,
        search: &params.search,
    };
    let visible: Vec<Client> = filter_clients(&snapshot, &query)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(
        user_id = auth.user_id,
        tab = tab.map(|t| t.as_str()),
        total = snapshot.len(),
        visible = visible.len(),
        "Filtered client list"
    );
    Ok(Json(DataResponse { data: visible }))
}

/// POST /api/v1/clients
pub async fn create_client(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    Json(input): Json<CreateClientRequest>,
) -> AppResult<(StatusCode, ClientResponse)> {
    validate_new_client(&input.name, &input.phone, &input.basic_info)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let row = ClientRepo::create(
        &state.pool,
        &CreateClient {
            name: input.name,
            phone: input.phone.trim().to_string(),
            registered_by: manager.user_id,
            basic_info: input.basic_info,
            service_requests: input.service_requests,
        },
    )
    .await?;
    let client = Client::try_from(row)?;

    tracing::info!(client_id = client.id, registered_by = manager.user_id, "Client registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ClientDetail>>> {
    let (_, client) = load_client(&state, &auth, id).await?;
    let role = auth.role();
    let detail = ClientDetail {
        visible_sections: visible_sections(&client, role),
        editable_sections: editable_sections(&client, role),
        allowed_actions: allowed_actions(&client, role),
        client,
    };
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// PR section
// ---------------------------------------------------------------------------

/// PUT /api/v1/clients/{id}/assign-pr
pub async fn assign_pr(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<AssignPrRequest>,
) -> AppResult<ClientResponse> {
    require_staff(&state, input.pr_user_id, Role::Pr).await?;
    let row = ClientRepo::assign_pr(&state.pool, id, input.pr_user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    let client = Client::try_from(row)?;

    tracing::info!(client_id = id, pr_user_id = input.pr_user_id, by = manager.user_id, "PR assigned");
    notify(
        &state.pool,
        input.pr_user_id,
        CLIENT_ASSIGNED,
        format!("Client '{}' was assigned to you", client.name),
        Some(id),
    )
    .await;
    ok(client)
}

/// PUT /api/v1/clients/{id}/pr-status
pub async fn update_pr_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<PrStatusRequest>,
) -> AppResult<ClientResponse> {
    let (_, client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::Pr)?;
    let row = ClientRepo::update_pr_status(&state.pool, id, input.status).await?;
    ok(persisted(row, "updating the PR status")?)
}

/// PUT /api/v1/clients/{id}/service-requests
pub async fn update_service_requests(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ServiceRequests>,
) -> AppResult<ClientResponse> {
    let (_, client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::Pr)?;
    let row = ClientRepo::update_service_requests(&state.pool, id, &input).await?;
    ok(persisted(row, "updating service requests")?)
}

/// POST /api/v1/clients/{id}/appointments
pub async fn add_client_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<Appointment>,
) -> AppResult<(StatusCode, ClientResponse)> {
    let (read_at, mut client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::Pr)?;
    add_appointment(&mut client, input)?;
    let row =
        ClientRepo::set_appointments(&state.pool, id, &client.pr_appointments, read_at).await?;
    Ok((StatusCode::CREATED, ok(persisted(row, "booking the call")?)?))
}

/// PUT /api/v1/clients/{id}/appointments/{index}
pub async fn update_client_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, index)): Path<(DbId, usize)>,
    Json(input): Json<AppointmentStatusRequest>,
) -> AppResult<ClientResponse> {
    let (read_at, mut client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::Pr)?;
    update_appointment_status(&mut client, index, input.status)?;
    let row =
        ClientRepo::set_appointments(&state.pool, id, &client.pr_appointments, read_at).await?;
    ok(persisted(row, "updating the call")?)
}

/// POST /api/v1/clients/{id}/agreement
///
/// Approves the client. The registering moderator is notified.
pub async fn approve_client(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AgreementInput>,
) -> AppResult<ClientResponse> {
    let (_, mut client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::Pr)?;
    approve_agreement(&mut client, input, auth.user_id, Utc::now())?;

    let Some(agreement) = client.final_agreement.as_ref() else {
        return Err(AppError::InternalError(
            "Approved client has no agreement".into(),
        ));
    };
    let row = ClientRepo::save_agreement(&state.pool, id, agreement).await?;
    let approved = persisted(row, "approving")?;

    tracing::info!(client_id = id, approved_by = auth.user_id, "Client approved");
    notify(
        &state.pool,
        approved.registered_by,
        AGREEMENT_APPROVED,
        format!("Client '{}' was approved", approved.name),
        Some(id),
    )
    .await;
    ok(approved)
}

/// POST /api/v1/clients/{id}/bad-client
pub async fn mark_client_bad(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<ClientResponse> {
    let (_, mut client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::Pr)?;
    let from = client.transfer_status;
    mark_bad_client(&mut client)?;
    let row =
        ClientRepo::set_transfer_status(&state.pool, id, from, TransferStatus::BadClient).await?;
    let rejected = persisted(row, "marking it as a bad client")?;

    tracing::info!(client_id = id, by = auth.user_id, "Client marked as bad client");
    notify(
        &state.pool,
        rejected.registered_by,
        CLIENT_REJECTED,
        format!("Client '{}' was marked as a bad client", rejected.name),
        Some(id),
    )
    .await;
    ok(rejected)
}

// ---------------------------------------------------------------------------
// Specialist sections
// ---------------------------------------------------------------------------

/// POST /api/v1/clients/{id}/research-files
///
/// Records metadata for a file already uploaded to storage.
pub async fn add_research_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ResearchFileRequest>,
) -> AppResult<(StatusCode, ClientResponse)> {
    let (_, client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::MarketResearch)?;
    if input.name.trim().is_empty() || input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Research file needs a name and a URL".into(),
        )));
    }
    if input.size_bytes.is_some_and(|s| s < 0) {
        return Err(AppError::Core(CoreError::Validation(
            "File size must not be negative".into(),
        )));
    }

    let file = ResearchFile {
        name: input.name.trim().to_string(),
        url: input.url.trim().to_string(),
        content_type: input.content_type,
        size_bytes: input.size_bytes,
        uploaded_by: auth.user_id,
        uploaded_at: Utc::now(),
    };
    let row = ClientRepo::add_research_file(&state.pool, id, &file).await?;
    Ok((StatusCode::CREATED, ok(persisted(row, "adding the file")?)?))
}

/// PUT /api/v1/clients/{id}/research-summary
pub async fn update_research_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ResearchSummaryRequest>,
) -> AppResult<ClientResponse> {
    let (_, client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, WorkflowSection::MarketResearch)?;
    let summary = input
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let row = ClientRepo::update_research_summary(&state.pool, id, summary).await?;
    ok(persisted(row, "saving the summary")?)
}

/// POST /api/v1/clients/{id}/content-calendar
pub async fn add_content_idea(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ContentIdea>,
) -> AppResult<(StatusCode, ClientResponse)> {
    let (read_at, mut client) = load_client(&state, &auth, id).await?;
    require_action(&client, &auth, ClientAction::PlanContent)?;
    validate_content_idea(&input).map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    insert_content_idea(&mut client.content_calendar, input);
    let row =
        ClientRepo::set_content_calendar(&state.pool, id, &client.content_calendar, read_at)
            .await?;
    Ok((StatusCode::CREATED, ok(persisted(row, "adding the idea")?)?))
}

/// PUT /api/v1/clients/{id}/assign-creative
pub async fn assign_creative(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AssigneeRequest>,
) -> AppResult<ClientResponse> {
    let (_, client) = load_client(&state, &auth, id).await?;
    require_action(&client, &auth, ClientAction::AssignCreative)?;
    if let Some(user_id) = input.user_id {
        require_staff(&state, user_id, Role::Creative).await?;
    }
    let row = ClientRepo::assign_creative(&state.pool, id, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    let client = Client::try_from(row)?;

    tracing::info!(client_id = id, creative_id = ?input.user_id, by = auth.user_id, "Creative assigned");
    if let Some(user_id) = input.user_id {
        notify(
            &state.pool,
            user_id,
            CREATIVE_ASSIGNED,
            format!("Creative work for '{}' was assigned to you", client.name),
            Some(id),
        )
        .await;
    }
    ok(client)
}

/// PUT /api/v1/clients/{id}/writing-responsible
pub async fn assign_writing_responsible(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AssigneeRequest>,
) -> AppResult<ClientResponse> {
    let (_, client) = load_client(&state, &auth, id).await?;
    require_action(&client, &auth, ClientAction::AssignWriter)?;
    if let Some(user_id) = input.user_id {
        require_staff(&state, user_id, Role::Content).await?;
    }
    let row = ClientRepo::assign_writing_responsible(&state.pool, id, input.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id,
        }))?;
    let client = Client::try_from(row)?;

    tracing::info!(client_id = id, writer_id = ?input.user_id, by = auth.user_id, "Writer assigned");
    if let Some(user_id) = input.user_id {
        notify(
            &state.pool,
            user_id,
            WRITING_ASSIGNED,
            format!("Content writing for '{}' was assigned to you", client.name),
            Some(id),
        )
        .await;
    }
    ok(client)
}

/// PUT /api/v1/clients/{id}/task-status
pub async fn update_task_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TaskStatusRequest>,
) -> AppResult<ClientResponse> {
    let (_, mut client) = load_client(&state, &auth, id).await?;
    require_section(&client, &auth, input.section)?;
    set_task_status(&mut client, input.section, input.status)?;
    let row = ClientRepo::update_task_status(&state.pool, id, input.section, input.status).await?;
    ok(persisted(row, "updating the task status")?)
}
