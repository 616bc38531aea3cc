//! Consultant domain entities

use crate::core::error::DomainError;
use crate::core::ids::ConsultantId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A consultant and their running counters (Entity)
///
/// Counters only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultant {
    pub id: ConsultantId,
    pub display_name: Option<String>,
    pub display_handle: Option<String>,
    pub assigned_count: u64,
    pub answered_count: u64,
}

impl Consultant {
    pub fn new(id: ConsultantId) -> Self {
        Self {
            id,
            display_name: None,
            display_handle: None,
            assigned_count: 0,
            answered_count: 0,
        }
    }

    /// Best label for reports: `@handle`, then the name, then `None`.
    pub fn label(&self) -> Option<String> {
        match (&self.display_handle, &self.display_name) {
            (Some(handle), _) if !handle.is_empty() => Some(format!("@{handle}")),
            (_, Some(name)) if !name.is_empty() => Some(name.clone()),
            _ => None,
        }
    }
}

/// The ordered list of active consultants (Value Object)
///
/// Never empty and free of duplicates. Built once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultantRoster {
    ids: Vec<ConsultantId>,
}

impl ConsultantRoster {
    pub fn new(ids: Vec<ConsultantId>) -> Result<Self, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::NoConsultants);
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(*id) {
                return Err(DomainError::DuplicateConsultant(id.get()));
            }
        }
        Ok(Self { ids })
    }

    pub fn ids(&self) -> &[ConsultantId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ConsultantId) -> bool {
        self.ids.contains(&id)
    }

    pub(crate) fn at(&self, index: usize) -> ConsultantId {
        self.ids[index % self.ids.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<ConsultantId> {
        raw.iter().copied().map(ConsultantId::new).collect()
    }

    #[test]
    fn test_empty_roster_is_config_error() {
        assert_eq!(
            ConsultantRoster::new(vec![]),
            Err(DomainError::NoConsultants)
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        assert_eq!(
            ConsultantRoster::new(ids(&[1, 2, 1])),
            Err(DomainError::DuplicateConsultant(1))
        );
    }

    #[test]
    fn test_contains_and_order() {
        let roster = ConsultantRoster::new(ids(&[30, 10, 20])).unwrap();
        assert_eq!(roster.len(), 3);
        assert!(roster.contains(ConsultantId::new(10)));
        assert!(!roster.contains(ConsultantId::new(40)));
        assert_eq!(roster.at(0), ConsultantId::new(30));
        assert_eq!(roster.at(4), ConsultantId::new(10));
    }

    #[test]
    fn test_label_prefers_handle() {
        let mut c = Consultant::new(ConsultantId::new(1));
        assert_eq!(c.label(), None);
        c.display_name = Some("Dr. Karimi".into());
        assert_eq!(c.label().as_deref(), Some("Dr. Karimi"));
        c.display_handle = Some("karimi".into());
        assert_eq!(c.label().as_deref(), Some("@karimi"));
    }
}
