//! Route definitions for the `/clients` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// Registration and PR assignment take `RequireManager`. Everything else,
/// including creative and writer assignment, checks visibility and section
/// ownership against the loaded client.
///
/// ```text
/// GET  /                              -> list_clients
/// POST /                              -> create_client
/// GET  /{id}                          -> get_client
/// PUT  /{id}/assign-pr                -> assign_pr
/// PUT  /{id}/pr-status                -> update_pr_status
/// PUT  /{id}/service-requests         -> update_service_requests
/// POST /{id}/appointments             -> add_client_appointment
/// PUT  /{id}/appointments/{index}     -> update_client_appointment
/// POST /{id}/agreement                -> approve_client
/// POST /{id}/bad-client               -> mark_client_bad
/// POST /{id}/research-files           -> add_research_file
/// PUT  /{id}/research-summary         -> update_research_summary
/// POST /{id}/content-calendar         -> add_content_idea
/// PUT  /{id}/assign-creative          -> assign_creative
/// PUT  /{id}/writing-responsible      -> assign_writing_responsible
/// PUT  /{id}/task-status              -> update_task_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route("/{id}", get(clients::get_client))
        .route("/{id}/assign-pr", put(clients::assign_pr))
        .route("/{id}/pr-status", put(clients::update_pr_status))
        .route(
            "/{id}/service-requests",
            put(clients::update_service_requests),
        )
        .route("/{id}/appointments", post(clients::add_client_appointment))
        .route(
            "/{id}/appointments/{index}",
            put(clients::update_client_appointment),
        )
        .route("/{id}/agreement", post(clients::approve_client))
        .route("/{id}/bad-client", post(clients::mark_client_bad))
        .route("/{id}/research-files", post(clients::add_research_file))
        .route(
            "/{id}/research-summary",
            put(clients::update_research_summary),
        )
        .route("/{id}/content-calendar", post(clients::add_content_idea))
        .route("/{id}/assign-creative", put(clients::assign_creative))
        .route(
            "/{id}/writing-responsible",
            put(clients::assign_writing_responsible),
        )
        .route("/{id}/task-status", put(clients::update_task_status))
}
