use axum::routing::get;
use axum::Router;

use crate::handlers::navigation;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/navigation", get(navigation::get_navigation))
}
