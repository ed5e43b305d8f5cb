//! Agency roles.
//!
//! The role set is closed. Stored and transmitted as the snake_case names
//! below; these must match the CHECK constraint on `users.role`.

use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_PR: &str = "pr";
pub const ROLE_MARKET_RESEARCHER: &str = "market_researcher";
pub const ROLE_CREATIVE: &str = "creative";
pub const ROLE_CONTENT: &str = "content";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[
    ROLE_ADMIN,
    ROLE_MODERATOR,
    ROLE_PR,
    ROLE_MARKET_RESEARCHER,
    ROLE_CREATIVE,
    ROLE_CONTENT,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Moderator,
    Pr,
    MarketResearcher,
    Creative,
    Content,
}

impl Role {
    /// Convert from a stored role name.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_MODERATOR => Ok(Self::Moderator),
            ROLE_PR => Ok(Self::Pr),
            ROLE_MARKET_RESEARCHER => Ok(Self::MarketResearcher),
            ROLE_CREATIVE => Ok(Self::Creative),
            ROLE_CONTENT => Ok(Self::Content),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Lenient parse for request context: anything unrecognised is "no role".
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_str_value(s).ok()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Moderator => ROLE_MODERATOR,
            Self::Pr => ROLE_PR,
            Self::MarketResearcher => ROLE_MARKET_RESEARCHER,
            Self::Creative => ROLE_CREATIVE,
            Self::Content => ROLE_CONTENT,
        }
    }

    /// Roles that register clients and oversee every workflow.
    pub fn is_staff_manager(&self) -> bool {
        matches!(self, Self::Admin | Self::Moderator)
    }

    /// Specialist roles that work client tasks after approval.
    pub fn is_specialist(&self) -> bool {
        matches!(
            self,
            Self::MarketResearcher | Self::Creative | Self::Content
        )
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    Role::from_str_value(role).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_role_parses() {
        for name in VALID_ROLES {
            let role = Role::from_str_value(name).unwrap();
            assert_eq!(role.as_str(), *name);
        }
    }

    #[test]
    fn unknown_role_rejected() {
        let result = Role::from_str_value("superuser");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid role"));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(Role::parse("Admin").is_none());
        assert!(Role::parse("PR").is_none());
    }

    #[test]
    fn empty_role_is_no_role() {
        assert_eq!(Role::parse(""), None);
        assert!(validate_role("").is_err());
    }

    #[test]
    fn serde_uses_snake_case_names() {
        let json = serde_json::to_string(&Role::MarketResearcher).unwrap();
        assert_eq!(json, "\"market_researcher\"");
        let role: Role = serde_json::from_str("\"content\"").unwrap();
        assert_eq!(role, Role::Content);
    }

    #[test]
    fn manager_and_specialist_groups_are_disjoint() {
        for name in VALID_ROLES {
            let role = Role::parse(name).unwrap();
            assert!(!(role.is_staff_manager() && role.is_specialist()));
        }
        assert!(!Role::Pr.is_staff_manager());
        assert!(!Role::Pr.is_specialist());
    }
}
