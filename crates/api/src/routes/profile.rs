use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Self-service profile and the staff picker, merged at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(profile::get_me).put(profile::update_me))
        .route("/users", get(profile::list_by_role))
}
