//! Client visibility filter.
//!
//! Narrows a client snapshot to what a role sees on a given tab, then
//! refines by free-text search. The filter never reorders its input and
//! never fails: an unknown role passes the snapshot through, an unknown tab
//! takes the role's "any other tab" branch.

use chrono::{DateTime, Local, TimeZone};

use crate::client::Client;
use crate::navigation::ClientTab;
use crate::roles::Role;
use crate::status::{AppointmentStatus, PrStatus, TaskStatus, TransferStatus};
use crate::types::{DbId, Timestamp};

/// Everything the filter needs to know about the request.
#[derive(Debug, Clone, Copy)]
pub struct ClientQuery<'a> {
    pub role: Option<Role>,
    pub user_id: DbId,
    pub tab: Option<ClientTab>,
    pub search: &'a str,
}

/// Filter with "today" taken from the local wall clock.
pub fn filter_clients<'c>(clients: &'c [Client], query: &ClientQuery<'_>) -> Vec<&'c Client> {
    filter_clients_at(clients, query, &Local::now())
}

/// Filter with an explicit "now". The calendar day of `now` in its own time
/// zone is what `today-calls` matches against.
pub fn filter_clients_at<'c, Tz: TimeZone>(
    clients: &'c [Client],
    query: &ClientQuery<'_>,
    now: &DateTime<Tz>,
) -> Vec<&'c Client> {
    let needle = query.search.to_lowercase();
    clients
        .iter()
        .filter(|c| matches_role_tab(c, query.role, query.user_id, query.tab, now))
        .filter(|c| needle.is_empty() || matches_search(c, &needle, query.search))
        .collect()
}

/// Whether a client belongs to a role's working set at all, ignoring tabs.
///
/// Used to authorise access to a single client record. Unknown roles see
/// nothing here: single-record access is never granted by default.
pub fn is_client_visible(client: &Client, role: Option<Role>, user_id: DbId) -> bool {
    match role {
        None => false,
        Some(Role::Admin) | Some(Role::Moderator) => true,
        Some(Role::Pr) => client.assigned_to_pr == Some(user_id),
        Some(r) => matches_specialist(client, r),
    }
}

// ---------------------------------------------------------------------------
// Step 1: role/tab partition
// ---------------------------------------------------------------------------

fn matches_role_tab<Tz: TimeZone>(
    client: &Client,
    role: Option<Role>,
    user_id: DbId,
    tab: Option<ClientTab>,
    now: &DateTime<Tz>,
) -> bool {
    match role {
        None => true,
        Some(Role::Admin) => match tab {
            Some(ClientTab::Active) => client.transfer_status == TransferStatus::Active,
            Some(ClientTab::Approved) => client.transfer_status == TransferStatus::Approved,
            _ => true,
        },
        Some(Role::Moderator) => match tab {
            Some(ClientTab::MyClients) => client.registered_by == user_id,
            _ => true,
        },
        Some(Role::Pr) => {
            if client.assigned_to_pr != Some(user_id) {
                return false;
            }
            match tab {
                Some(ClientTab::Approved) => client.transfer_status == TransferStatus::Approved,
                Some(ClientTab::BadClients) => client.transfer_status == TransferStatus::BadClient,
                Some(ClientTab::TodayCalls) => has_scheduled_call_on_day(client, now),
                Some(ClientTab::NotStarted) => client.pr_status == PrStatus::Pending,
                _ => true,
            }
        }
        Some(r) => matches_specialist(client, r),
    }
}

/// Specialist predicate: requested service and an approved transfer. Content
/// additionally waits for creative work to finish.
fn matches_specialist(client: &Client, role: Role) -> bool {
    let approved = client.transfer_status == TransferStatus::Approved;
    let requests = &client.service_requests;
    match role {
        Role::MarketResearcher => requests.market_research && approved,
        Role::Creative => requests.creative && approved,
        Role::Content => {
            requests.content && client.creative_status == TaskStatus::Completed && approved
        }
        Role::Admin | Role::Moderator | Role::Pr => false,
    }
}

/// At least one scheduled appointment on the same calendar day as `now`.
pub fn has_scheduled_call_on_day<Tz: TimeZone>(client: &Client, now: &DateTime<Tz>) -> bool {
    client
        .pr_appointments
        .iter()
        .any(|a| a.status == AppointmentStatus::Scheduled && is_same_day(&a.date, now))
}

/// Whether `ts` falls on the calendar day of `now`, in `now`'s time zone.
pub fn is_same_day<Tz: TimeZone>(ts: &Timestamp, now: &DateTime<Tz>) -> bool {
    ts.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

// ---------------------------------------------------------------------------
// Step 2: search refinement
// ---------------------------------------------------------------------------

/// `needle` is the lowercased term; `raw` is the term as typed, used for the
/// phone field which holds digits only.
fn matches_search(client: &Client, needle: &str, raw: &str) -> bool {
    client.name.to_lowercase().contains(needle)
        || client.phone.contains(raw)
        || client.basic_info.email.to_lowercase().contains(needle)
}
