//! Dining table status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a dining table
///
/// Only `Available` tables accept guest logins. `Hidden` tables are kept
/// out of guest-facing listings but remain visible to staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Reserved,
    Hidden,
}

impl TableStatus {
    /// Canonical database representation
    pub const fn as_db(&self) -> &'static str {
        match self {
            TableStatus::Available => "AVAILABLE",
            TableStatus::Reserved => "RESERVED",
            TableStatus::Hidden => "HIDDEN",
        }
    }

    /// Parse the canonical database representation
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(TableStatus::Available),
            "RESERVED" => Some(TableStatus::Reserved),
            "HIDDEN" => Some(TableStatus::Hidden),
            _ => None,
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_roundtrip() {
        for status in [
            TableStatus::Available,
            TableStatus::Reserved,
            TableStatus::Hidden,
        ] {
            assert_eq!(TableStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(TableStatus::from_db("OCCUPIED"), None);
    }

    #[test]
    fn test_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&TableStatus::Reserved).unwrap(),
            "\"RESERVED\""
        );
        let status: TableStatus = serde_json::from_str("\"AVAILABLE\"").unwrap();
        assert_eq!(status, TableStatus::Available);
    }
}
