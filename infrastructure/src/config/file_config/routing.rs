//! Routing configuration from TOML (`[routing]` section)

use super::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_MESSAGE_LIMIT: u32 = 2;

/// Raw routing configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    /// Questions a user may send per calendar month
    pub message_limit: u32,
    /// Chat ids of the active consultants, in rotation order
    pub consultants: Vec<i64>,
    /// Chat id allowed to run `/stats`
    pub owner_id: Option<i64>,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        Self {
            message_limit: DEFAULT_MESSAGE_LIMIT,
            consultants: Vec::new(),
            owner_id: None,
        }
    }
}

impl FileRoutingConfig {
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.consultants.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyRoster,
                "routing.consultants: at least one consultant id is required",
            ));
        }

        let mut seen = HashSet::new();
        for id in &self.consultants {
            if !seen.insert(*id) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateConsultant { id: *id },
                    format!("routing.consultants: {id} is listed more than once"),
                ));
            }
        }

        if self.message_limit == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMessageLimit,
                "routing.message_limit: must be at least 1",
            ));
        }

        if let Some(owner) = self.owner_id {
            if self.consultants.contains(&owner) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::OwnerIsConsultant { id: owner },
                    format!("routing.owner_id: {owner} is also a consultant"),
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_consultant_reported_once() {
        let config = FileRoutingConfig {
            consultants: vec![1, 2, 1],
            ..Default::default()
        };
        let issues = config.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::DuplicateConsultant { id: 1 });
    }

    #[test]
    fn test_owner_on_roster_is_warning() {
        let config = FileRoutingConfig {
            consultants: vec![5],
            owner_id: Some(5),
            ..Default::default()
        };
        let issues = config.issues();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
