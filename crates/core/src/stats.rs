//! Dashboard statistics per role.
//!
//! Every role gets exactly four cards. Counts are computed from the client
//! snapshot; "today" is the calendar day of the supplied `now`.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use crate::client::Client;
use crate::navigation::ClientTab;
use crate::roles::Role;
use crate::status::{AppointmentStatus, PrStatus, TaskStatus, TransferStatus};
use crate::types::DbId;
use crate::visibility::{filter_clients_at, is_same_day, ClientQuery};

/// Display value of the average-completion-time card. Not derived from data.
pub const AVERAGE_COMPLETION_PLACEHOLDER: &str = "n/a";

/// Number of cards every role receives.
pub const STAT_CARD_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum StatValue {
    Count(usize),
    /// A fixed display string standing in for a metric that is not computed.
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub label: &'static str,
    pub value: StatValue,
}

fn count(label: &'static str, n: usize) -> StatCard {
    StatCard {
        label,
        value: StatValue::Count(n),
    }
}

/// Statistics with "today" taken from the local wall clock.
pub fn stats_for(role: Option<Role>, user_id: DbId, clients: &[Client]) -> Vec<StatCard> {
    stats_for_at(role, user_id, clients, &Local::now())
}

pub fn stats_for_at<Tz: TimeZone>(
    role: Option<Role>,
    user_id: DbId,
    clients: &[Client],
    now: &DateTime<Tz>,
) -> Vec<StatCard> {
    match role {
        Some(Role::Moderator) => moderator_stats(user_id, clients, now),
        Some(Role::Pr) => pr_stats(user_id, clients, now),
        _ => task_stats(role, user_id, clients, now),
    }
}

fn moderator_stats<Tz: TimeZone>(
    user_id: DbId,
    clients: &[Client],
    now: &DateTime<Tz>,
) -> Vec<StatCard> {
    let owned: Vec<&Client> = clients
        .iter()
        .filter(|c| c.registered_by == user_id)
        .collect();

    let today = owned
        .iter()
        .filter(|c| is_same_day(&c.registered_at, now))
        .count();
    let active = owned
        .iter()
        .filter(|c| c.transfer_status == TransferStatus::Active)
        .count();
    let pending_review = owned
        .iter()
        .filter(|c| matches!(c.pr_status, PrStatus::Pending | PrStatus::UnderReview))
        .count();

    vec![
        count("Registered Today", today),
        count("Active Clients", active),
        count("Pending Review", pending_review),
        count("Total Clients", owned.len()),
    ]
}

fn pr_stats<Tz: TimeZone>(user_id: DbId, clients: &[Client], now: &DateTime<Tz>) -> Vec<StatCard> {
    let owned: Vec<&Client> = clients
        .iter()
        .filter(|c| c.assigned_to_pr == Some(user_id))
        .collect();

    let calls_today = owned
        .iter()
        .flat_map(|c| c.pr_appointments.iter())
        .filter(|a| a.status == AppointmentStatus::Scheduled && is_same_day(&a.date, now))
        .count();
    let in_progress = owned
        .iter()
        .filter(|c| c.pr_status == PrStatus::InProgress)
        .count();
    let approved = owned
        .iter()
        .filter(|c| c.transfer_status == TransferStatus::Approved)
        .count();

    vec![
        count("Today's Calls", calls_today),
        count("In Progress", in_progress),
        count("Approved", approved),
        count("Total Clients", owned.len()),
    ]
}

/// The status column a specialist role works on. Roles without one only
/// contribute to the total.
fn task_status_for(role: Option<Role>, client: &Client) -> Option<TaskStatus> {
    match role? {
        Role::MarketResearcher => Some(client.research_status),
        Role::Creative => Some(client.creative_status),
        Role::Content => Some(client.content_status),
        Role::Admin | Role::Moderator | Role::Pr => None,
    }
}

fn task_stats<Tz: TimeZone>(
    role: Option<Role>,
    user_id: DbId,
    clients: &[Client],
    now: &DateTime<Tz>,
) -> Vec<StatCard> {
    let query = ClientQuery {
        role,
        user_id,
        tab: Some(ClientTab::MyTasks),
        search: "",
    };
    let assigned = filter_clients_at(clients, &query, now);

    let open = assigned
        .iter()
        .filter(|c| task_status_for(role, c).is_some_and(|s| s.is_open()))
        .count();
    let completed = assigned
        .iter()
        .filter(|c| task_status_for(role, c) == Some(TaskStatus::Completed))
        .count();

    vec![
        count("Open Tasks", open),
        count("Completed Tasks", completed),
        count("Total Assigned", assigned.len()),
        StatCard {
            label: "Avg. Completion Time",
            value: StatValue::Placeholder(AVERAGE_COMPLETION_PLACEHOLDER),
        },
    ]
}
