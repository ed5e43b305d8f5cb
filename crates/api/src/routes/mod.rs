pub mod admin;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod navigation;
pub mod notification;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                 login (public)
/// /auth/refresh                               refresh (public)
/// /auth/logout                                logout (requires auth)
///
/// /admin/users                                list, create (admin only)
/// /admin/users/{id}                           get, update, deactivate
/// /admin/users/{id}/reset-password            reset password
///
/// /me                                         own profile (get, update)
/// /users?role=                                staff picker (moderator/admin)
///
/// /navigation                                 sidebar links and client tabs
/// /dashboard/stats                            four role-specific stat cards
///
/// /clients                                    list (tab, search), register
/// /clients/{id}                               detail with section gates
/// /clients/{id}/assign-pr                     assign PR (moderator/admin)
/// /clients/{id}/pr-status                     PR pipeline status
/// /clients/{id}/service-requests              requested services
/// /clients/{id}/appointments                  book a call
/// /clients/{id}/appointments/{index}          complete or cancel a call
/// /clients/{id}/agreement                     approve with final agreement
/// /clients/{id}/bad-client                    reject as bad client
/// /clients/{id}/research-files                attach research file metadata
/// /clients/{id}/research-summary              research summary
/// /clients/{id}/content-calendar              add a content idea
/// /clients/{id}/assign-creative               creative assignee
/// /clients/{id}/writing-responsible           content writer
/// /clients/{id}/task-status                   specialist task status
///
/// /notifications                              list (unread_only, paging)
/// /notifications/{id}/read                    mark one read
/// /notifications/read-all                     mark all read
/// /notifications/unread-count                 unread badge count
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .merge(profile::router())
        .merge(navigation::router())
        .nest("/dashboard", dashboard::router())
        .nest("/clients", clients::router())
        .nest("/notifications", notification::router())
}
