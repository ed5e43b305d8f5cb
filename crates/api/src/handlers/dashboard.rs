//! Handler for `GET /dashboard/stats`.

use agency_core::stats::{stats_for, StatCard};
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::clients::load_working_set;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// The caller's four dashboard cards, computed over the current snapshot.
pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<StatCard>>>> {
    let clients = load_working_set(&state, &auth).await?;
    let cards = stats_for(auth.role(), auth.user_id, &clients);
    Ok(Json(DataResponse { data: cards }))
}
