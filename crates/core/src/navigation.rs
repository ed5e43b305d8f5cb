//! Role-scoped navigation links and client-list tabs.
//!
//! Both tables are static. An absent role (or a role with no entries) gets
//! an empty link list, which callers render as "nothing".

use serde::Serialize;

use crate::roles::Role;

// ---------------------------------------------------------------------------
// Navigation links
// ---------------------------------------------------------------------------

/// One sidebar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub path: &'static str,
    pub label: &'static str,
    /// Icon identifier understood by the frontend icon set.
    pub icon: &'static str,
}

const fn link(path: &'static str, label: &'static str, icon: &'static str) -> NavLink {
    NavLink { path, label, icon }
}

const MODERATOR_LINKS: &[NavLink] = &[
    link("/dashboard", "Dashboard", "layout-dashboard"),
    link("/clients", "Clients", "users"),
    link("/clients/new", "Register Client", "user-plus"),
    link("/notifications", "Notifications", "bell"),
    link("/profile", "Profile", "user"),
];

const PR_LINKS: &[NavLink] = &[
    link("/dashboard", "Dashboard", "layout-dashboard"),
    link("/clients", "My Clients", "users"),
    link("/appointments", "Appointments", "calendar"),
    link("/notifications", "Notifications", "bell"),
    link("/profile", "Profile", "user"),
];

const MARKET_RESEARCHER_LINKS: &[NavLink] = &[
    link("/dashboard", "Dashboard", "layout-dashboard"),
    link("/clients", "Research Tasks", "search"),
    link("/notifications", "Notifications", "bell"),
    link("/profile", "Profile", "user"),
];

const CREATIVE_LINKS: &[NavLink] = &[
    link("/dashboard", "Dashboard", "layout-dashboard"),
    link("/clients", "Creative Tasks", "palette"),
    link("/notifications", "Notifications", "bell"),
    link("/profile", "Profile", "user"),
];

const CONTENT_LINKS: &[NavLink] = &[
    link("/dashboard", "Dashboard", "layout-dashboard"),
    link("/clients", "Content Tasks", "file-text"),
    link("/notifications", "Notifications", "bell"),
    link("/profile", "Profile", "user"),
];

/// Sidebar entries for a role, in display order.
///
/// `admin` has no dedicated entries; user management is reached directly.
pub fn links_for_role(role: Option<Role>) -> &'static [NavLink] {
    match role {
        Some(Role::Moderator) => MODERATOR_LINKS,
        Some(Role::Pr) => PR_LINKS,
        Some(Role::MarketResearcher) => MARKET_RESEARCHER_LINKS,
        Some(Role::Creative) => CREATIVE_LINKS,
        Some(Role::Content) => CONTENT_LINKS,
        Some(Role::Admin) | None => &[],
    }
}

// ---------------------------------------------------------------------------
// Client-list tabs
// ---------------------------------------------------------------------------

/// A named sub-view of the client list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientTab {
    MyClients,
    All,
    Active,
    Approved,
    BadClients,
    TodayCalls,
    NotStarted,
    MyTasks,
}

impl ClientTab {
    /// Parse a tab value from a query string. Unknown values yield `None`,
    /// which the filter treats as "any other tab".
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "my-clients" => Some(Self::MyClients),
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "approved" => Some(Self::Approved),
            "bad-clients" => Some(Self::BadClients),
            "today-calls" => Some(Self::TodayCalls),
            "not-started" => Some(Self::NotStarted),
            "my-tasks" => Some(Self::MyTasks),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MyClients => "my-clients",
            Self::All => "all",
            Self::Active => "active",
            Self::Approved => "approved",
            Self::BadClients => "bad-clients",
            Self::TodayCalls => "today-calls",
            Self::NotStarted => "not-started",
            Self::MyTasks => "my-tasks",
        }
    }
}

/// Tab descriptor rendered above the client list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabDescriptor {
    pub value: ClientTab,
    pub label: &'static str,
}

const fn tab(value: ClientTab, label: &'static str) -> TabDescriptor {
    TabDescriptor { value, label }
}

const MODERATOR_TABS: &[TabDescriptor] = &[
    tab(ClientTab::MyClients, "My Clients"),
    tab(ClientTab::All, "All Clients"),
];

const PR_TABS: &[TabDescriptor] = &[
    tab(ClientTab::MyClients, "My Clients"),
    tab(ClientTab::Approved, "Approved"),
    tab(ClientTab::BadClients, "Bad Clients"),
    tab(ClientTab::TodayCalls, "Today's Calls"),
    tab(ClientTab::NotStarted, "Not Started"),
];

const DEFAULT_TABS: &[TabDescriptor] = &[tab(ClientTab::MyTasks, "My Tasks")];

/// Tabs for a role, in display order. Never empty.
///
/// `admin` has no case of its own and gets the default single tab.
pub fn tabs_for_role(role: Option<Role>) -> &'static [TabDescriptor] {
    match role {
        Some(Role::Moderator) => MODERATOR_TABS,
        Some(Role::Pr) => PR_TABS,
        _ => DEFAULT_TABS,
    }
}

/// The tab selected when the caller did not request one.
pub fn default_tab_for_role(role: Option<Role>) -> ClientTab {
    tabs_for_role(role)[0].value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moderator_first_tab_is_my_clients() {
        assert_eq!(
            tabs_for_role(Some(Role::Moderator))[0].value,
            ClientTab::MyClients
        );
        assert_eq!(tabs_for_role(Some(Role::Moderator)).len(), 2);
    }

    #[test]
    fn pr_has_five_tabs_in_order() {
        let values: Vec<_> = tabs_for_role(Some(Role::Pr))
            .iter()
            .map(|t| t.value.as_str())
            .collect();
        assert_eq!(
            values,
            vec!["my-clients", "approved", "bad-clients", "today-calls", "not-started"]
        );
    }

    #[test]
    fn specialists_get_single_my_tasks_tab() {
        for role in [Role::Creative, Role::Content, Role::MarketResearcher] {
            let tabs = tabs_for_role(Some(role));
            assert_eq!(tabs.len(), 1);
            assert_eq!(tabs[0].value.as_str(), "my-tasks");
        }
    }

    #[test]
    fn admin_falls_back_to_default_tab() {
        assert_eq!(default_tab_for_role(Some(Role::Admin)), ClientTab::MyTasks);
        assert_eq!(default_tab_for_role(None), ClientTab::MyTasks);
    }

    #[test]
    fn admin_and_missing_role_have_no_links() {
        assert!(links_for_role(Some(Role::Admin)).is_empty());
        assert!(links_for_role(None).is_empty());
    }

    #[test]
    fn every_working_role_links_to_clients() {
        for role in [
            Role::Moderator,
            Role::Pr,
            Role::MarketResearcher,
            Role::Creative,
            Role::Content,
        ] {
            let links = links_for_role(Some(role));
            assert!(links.iter().any(|l| l.path == "/clients"), "{role}");
            assert_eq!(links[0].path, "/dashboard");
        }
    }

    #[test]
    fn only_moderator_can_reach_registration() {
        for role in [Role::Pr, Role::Creative, Role::Content, Role::MarketResearcher] {
            assert!(!links_for_role(Some(role))
                .iter()
                .any(|l| l.path == "/clients/new"));
        }
    }

    #[test]
    fn tab_values_round_trip() {
        for t in [
            ClientTab::MyClients,
            ClientTab::All,
            ClientTab::Active,
            ClientTab::Approved,
            ClientTab::BadClients,
            ClientTab::TodayCalls,
            ClientTab::NotStarted,
            ClientTab::MyTasks,
        ] {
            assert_eq!(ClientTab::parse(t.as_str()), Some(t));
        }
        assert_eq!(ClientTab::parse("archived"), None);
    }

    #[test]
    fn tab_serializes_as_kebab_case() {
        let json = serde_json::to_value(tabs_for_role(Some(Role::Pr))[3]).unwrap();
        assert_eq!(json["value"], "today-calls");
        assert_eq!(json["label"], "Today's Calls");
    }
}
