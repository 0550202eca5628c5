use serde::{Deserialize, Serialize};

use crate::models::catalog::{DEFAULT_RANK, DEFAULT_UNIT};

/// One personnel entry from the roster table.
///
/// The two derived fields are computed once at construction and never
/// change afterwards: `short_name` is the informal first-plus-last-token
/// name, `search_label` is the string selection widgets match against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub full_name: String,
    pub identifier: String,
    pub short_name: String,
    pub search_label: String,
}

impl PersonnelRecord {
    pub fn new(full_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let identifier = identifier.into();
        let short_name = derive_short_name(&full_name);
        let search_label = format!("{} (ID: {})", full_name, identifier);
        Self {
            full_name,
            identifier,
            short_name,
            search_label,
        }
    }
}

/// First and last whitespace token joined by a space; names with a single
/// token come back unchanged.
fn derive_short_name(full_name: &str) -> String {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match parts.as_slice() {
        [first, .., last] => format!("{} {}", first, last),
        _ => full_name.to_string(),
    }
}

/// A roster entry attached to a specific duty.
///
/// Rank and unit start from the selection defaults and are editable until
/// the report is generated; the underlying record is not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedPerson {
    pub rank: String,
    pub unit: String,
    pub record: PersonnelRecord,
}

impl AssignedPerson {
    /// Newly selected personnel receive the default rank and unit.
    pub fn from_record(record: PersonnelRecord) -> Self {
        Self {
            rank: DEFAULT_RANK.to_string(),
            unit: DEFAULT_UNIT.to_string(),
            record,
        }
    }

    pub fn with_rank(mut self, rank: impl Into<String>) -> Self {
        self.rank = rank.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// The designated responsible for the duty, distinct from the assigned
/// personnel list. Carried as `Option<CommanderInfo>` at the report
/// boundary; absence renders as empty fields, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommanderInfo {
    pub name: String,
    pub rank: String,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_first_and_last_token() {
        let record = PersonnelRecord::new("José Maria da Silva Santos", "123456");
        assert_eq!(record.short_name, "José Santos");
    }

    #[test]
    fn test_short_name_two_tokens() {
        let record = PersonnelRecord::new("Ana Souza", "2");
        assert_eq!(record.short_name, "Ana Souza");
    }

    #[test]
    fn test_short_name_single_token_unchanged() {
        let record = PersonnelRecord::new("Madonna", "3");
        assert_eq!(record.short_name, "Madonna");
    }

    #[test]
    fn test_short_name_empty_name_unchanged() {
        let record = PersonnelRecord::new("", "4");
        assert_eq!(record.short_name, "");
    }

    #[test]
    fn test_search_label_format() {
        let record = PersonnelRecord::new("Ana Souza", "987654");
        assert_eq!(record.search_label, "Ana Souza (ID: 987654)");
    }

    #[test]
    fn test_assignment_defaults() {
        let assigned = AssignedPerson::from_record(PersonnelRecord::new("Ana Souza", "1"));
        assert_eq!(assigned.rank, DEFAULT_RANK);
        assert_eq!(assigned.unit, DEFAULT_UNIT);
    }

    #[test]
    fn test_assignment_overrides() {
        let assigned = AssignedPerson::from_record(PersonnelRecord::new("Ana Souza", "1"))
            .with_rank("3º SGT BM")
            .with_unit("1º GBM");
        assert_eq!(assigned.rank, "3º SGT BM");
        assert_eq!(assigned.unit, "1º GBM");
    }
}
