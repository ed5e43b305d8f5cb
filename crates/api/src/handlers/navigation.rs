//! Handler for `GET /navigation`.

use agency_core::navigation::{
    default_tab_for_role, links_for_role, tabs_for_role, ClientTab, NavLink, TabDescriptor,
};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub links: &'static [NavLink],
    pub tabs: &'static [TabDescriptor],
    pub default_tab: ClientTab,
}

/// GET /api/v1/navigation
///
/// Sidebar links and client-list tabs for the caller's role. No database
/// access.
pub async fn get_navigation(auth: AuthUser) -> AppResult<Json<DataResponse<NavigationResponse>>> {
    let role = auth.role();
    Ok(Json(DataResponse {
        data: NavigationResponse {
            links: links_for_role(role),
            tabs: tabs_for_role(role),
            default_tab: default_tab_for_role(role),
        },
    }))
}
