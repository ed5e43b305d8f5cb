//! Workflow-section gating for the client detail view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::roles::Role;
use crate::status::TaskStatus;

/// A block of the client detail page owned by one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowSection {
    Pr,
    MarketResearch,
    Creative,
    Content,
}

impl WorkflowSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pr => "pr",
            Self::MarketResearch => "market_research",
            Self::Creative => "creative",
            Self::Content => "content",
        }
    }

    /// The role whose staff do the section's work.
    pub fn owner(&self) -> Role {
        match self {
            Self::Pr => Role::Pr,
            Self::MarketResearch => Role::MarketResearcher,
            Self::Creative => Role::Creative,
            Self::Content => Role::Content,
        }
    }
}

/// Sections rendered for `role` on this client.
pub fn visible_sections(client: &Client, role: Option<Role>) -> BTreeSet<WorkflowSection> {
    let mut sections = BTreeSet::new();
    let Some(role) = role else {
        return sections;
    };
    let requests = &client.service_requests;

    if matches!(role, Role::Pr | Role::Moderator) {
        sections.insert(WorkflowSection::Pr);
    }

    // Creative staff read the research only alongside requested creative
    // work; a research-only client shows them nothing.
    let reads_research = match role {
        Role::MarketResearcher | Role::Moderator | Role::Content => true,
        Role::Creative => requests.creative,
        Role::Admin | Role::Pr => false,
    };
    if requests.market_research && reads_research {
        sections.insert(WorkflowSection::MarketResearch);
    }

    if requests.creative && matches!(role, Role::Creative | Role::Moderator | Role::Content) {
        sections.insert(WorkflowSection::Creative);
    }

    if requests.content
        && client.creative_status == TaskStatus::Completed
        && matches!(role, Role::Content | Role::Moderator)
    {
        sections.insert(WorkflowSection::Content);
    }

    sections
}

/// Whether `role` may change data inside `section` of this client.
///
/// The section must be visible, and the role must either own it or be a
/// moderator.
pub fn can_edit_section(client: &Client, role: Option<Role>, section: WorkflowSection) -> bool {
    let Some(r) = role else {
        return false;
    };
    (r == section.owner() || r == Role::Moderator)
        && visible_sections(client, role).contains(&section)
}

/// Sections the role may edit, a subset of [`visible_sections`].
pub fn editable_sections(client: &Client, role: Option<Role>) -> BTreeSet<WorkflowSection> {
    visible_sections(client, role)
        .into_iter()
        .filter(|s| can_edit_section(client, role, *s))
        .collect()
}

/// Client changes that cross section lines. Each team picks the assignee
/// of the team downstream of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAction {
    /// Choose the creative. Done from the PR section.
    AssignCreative,
    /// Choose who writes the content. Done from the creative section.
    AssignWriter,
    /// Add an idea to the content calendar. Done from the creative section.
    PlanContent,
}

impl ClientAction {
    pub const ALL: [ClientAction; 3] = [
        ClientAction::AssignCreative,
        ClientAction::AssignWriter,
        ClientAction::PlanContent,
    ];

    /// The section whose editors perform the action.
    pub fn section(&self) -> WorkflowSection {
        match self {
            Self::AssignCreative => WorkflowSection::Pr,
            Self::AssignWriter | Self::PlanContent => WorkflowSection::Creative,
        }
    }
}

/// Whether `role` may perform `action` on this client.
///
/// Moderators may do everything and admins may make assignments. Anyone
/// else must be able to edit the action's section. Whether the caller may
/// see the client at all is checked separately.
pub fn can_perform(client: &Client, role: Option<Role>, action: ClientAction) -> bool {
    match role {
        Some(Role::Moderator) => true,
        Some(Role::Admin) => action != ClientAction::PlanContent,
        _ => can_edit_section(client, role, action.section()),
    }
}

/// The actions `role` may perform on this client, in declaration order.
pub fn allowed_actions(client: &Client, role: Option<Role>) -> BTreeSet<ClientAction> {
    ClientAction::ALL
        .into_iter()
        .filter(|a| can_perform(client, role, *a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ServiceRequests;
    use chrono::{TimeZone, Utc};

    fn client_with(requests: ServiceRequests, creative: TaskStatus) -> Client {
        let mut c = Client::new(
            1,
            "Acme",
            "0551234567",
            1,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        );
        c.service_requests = requests;
        c.creative_status = creative;
        c
    }

    fn everything() -> ServiceRequests {
        ServiceRequests {
            market_research: true,
            content: true,
            creative: true,
            ai_video: Some(true),
            ads: None,
        }
    }

    #[test]
    fn creative_role_sees_nothing_when_only_research_requested() {
        let c = client_with(
            ServiceRequests {
                market_research: true,
                creative: false,
                content: false,
                ai_video: None,
                ads: None,
            },
            TaskStatus::Pending,
        );
        assert!(visible_sections(&c, Some(Role::Creative)).is_empty());
        assert_eq!(
            visible_sections(&c, Some(Role::MarketResearcher))
                .into_iter()
                .collect::<Vec<_>>(),
            vec![WorkflowSection::MarketResearch]
        );
    }

    #[test]
    fn creative_reads_research_alongside_requested_creative_work() {
        let c = client_with(
            ServiceRequests {
                market_research: true,
                creative: true,
                ..ServiceRequests::default()
            },
            TaskStatus::Pending,
        );
        let sections = visible_sections(&c, Some(Role::Creative));
        assert_eq!(
            sections.into_iter().collect::<Vec<_>>(),
            vec![WorkflowSection::MarketResearch, WorkflowSection::Creative]
        );
    }

    #[test]
    fn content_staff_read_research_whenever_it_was_requested() {
        let c = client_with(
            ServiceRequests {
                market_research: true,
                ..ServiceRequests::default()
            },
            TaskStatus::Pending,
        );
        assert_eq!(
            visible_sections(&c, Some(Role::Content))
                .into_iter()
                .collect::<Vec<_>>(),
            vec![WorkflowSection::MarketResearch]
        );
        assert!(!can_edit_section(&c, Some(Role::Content), WorkflowSection::MarketResearch));
    }

    #[test]
    fn no_requests_means_no_specialist_sections() {
        let c = client_with(ServiceRequests::default(), TaskStatus::Completed);
        for role in [Role::MarketResearcher, Role::Creative, Role::Content] {
            assert!(visible_sections(&c, Some(role)).is_empty(), "{role}");
        }
    }

    #[test]
    fn moderator_sees_every_requested_section() {
        let c = client_with(everything(), TaskStatus::Completed);
        let sections = visible_sections(&c, Some(Role::Moderator));
        assert_eq!(sections.len(), 4);
    }

    #[test]
    fn pr_section_only_for_pr_and_moderator() {
        let c = client_with(everything(), TaskStatus::Completed);
        for role in [Role::Admin, Role::MarketResearcher, Role::Creative, Role::Content] {
            assert!(!visible_sections(&c, Some(role)).contains(&WorkflowSection::Pr));
        }
        assert!(visible_sections(&c, Some(Role::Pr)).contains(&WorkflowSection::Pr));
    }

    #[test]
    fn pr_role_sees_only_pr_section() {
        let c = client_with(everything(), TaskStatus::Completed);
        let sections = visible_sections(&c, Some(Role::Pr));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn content_section_waits_for_creative() {
        let pending = client_with(everything(), TaskStatus::InProgress);
        assert!(!visible_sections(&pending, Some(Role::Content)).contains(&WorkflowSection::Content));
        let done = client_with(everything(), TaskStatus::Completed);
        assert!(visible_sections(&done, Some(Role::Content)).contains(&WorkflowSection::Content));
    }

    #[test]
    fn missing_role_sees_nothing() {
        let c = client_with(everything(), TaskStatus::Completed);
        assert!(visible_sections(&c, None).is_empty());
        assert!(editable_sections(&c, None).is_empty());
    }

    #[test]
    fn content_staff_read_creative_but_cannot_edit_it() {
        let c = client_with(everything(), TaskStatus::Completed);
        assert!(visible_sections(&c, Some(Role::Content)).contains(&WorkflowSection::Creative));
        assert!(!can_edit_section(&c, Some(Role::Content), WorkflowSection::Creative));
        assert!(can_edit_section(&c, Some(Role::Content), WorkflowSection::Content));
    }

    #[test]
    fn moderator_edits_everything_visible() {
        let c = client_with(everything(), TaskStatus::Completed);
        assert_eq!(
            editable_sections(&c, Some(Role::Moderator)),
            visible_sections(&c, Some(Role::Moderator))
        );
    }

    #[test]
    fn admin_edits_no_workflow_section() {
        let c = client_with(everything(), TaskStatus::Completed);
        assert!(editable_sections(&c, Some(Role::Admin)).is_empty());
    }

    #[test]
    fn pr_assigns_the_creative_and_nothing_else() {
        let c = client_with(everything(), TaskStatus::Pending);
        assert!(can_perform(&c, Some(Role::Pr), ClientAction::AssignCreative));
        assert!(!can_perform(&c, Some(Role::Pr), ClientAction::AssignWriter));
        assert!(!can_perform(&c, Some(Role::Pr), ClientAction::PlanContent));
    }

    #[test]
    fn creative_assigns_writer_and_plans_content_before_and_after_completion() {
        for status in [TaskStatus::InProgress, TaskStatus::Completed] {
            let c = client_with(everything(), status);
            assert!(can_perform(&c, Some(Role::Creative), ClientAction::AssignWriter));
            assert!(can_perform(&c, Some(Role::Creative), ClientAction::PlanContent));
            assert!(!can_perform(&c, Some(Role::Creative), ClientAction::AssignCreative));
        }
    }

    #[test]
    fn creative_needs_requested_creative_work() {
        let c = client_with(
            ServiceRequests {
                content: true,
                ..ServiceRequests::default()
            },
            TaskStatus::Pending,
        );
        assert!(!can_perform(&c, Some(Role::Creative), ClientAction::PlanContent));
        assert!(!can_perform(&c, Some(Role::Creative), ClientAction::AssignWriter));
    }

    #[test]
    fn moderator_performs_every_action_and_admin_only_assigns() {
        let c = client_with(ServiceRequests::default(), TaskStatus::Pending);
        assert_eq!(
            allowed_actions(&c, Some(Role::Moderator)).len(),
            ClientAction::ALL.len()
        );
        assert_eq!(
            allowed_actions(&c, Some(Role::Admin))
                .into_iter()
                .collect::<Vec<_>>(),
            vec![ClientAction::AssignCreative, ClientAction::AssignWriter]
        );
    }

    #[test]
    fn other_specialists_and_missing_role_perform_nothing() {
        let c = client_with(everything(), TaskStatus::Completed);
        for role in [Some(Role::MarketResearcher), Some(Role::Content), None] {
            assert!(allowed_actions(&c, role).is_empty(), "{role:?}");
        }
    }
}
