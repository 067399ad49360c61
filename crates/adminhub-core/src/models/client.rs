//! Client data model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle state of a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ClientStatus {
    /// Client is active
    #[default]
    Active,
    /// Client is no longer active
    Inactive,
    /// Client is awaiting onboarding
    Pending,
}

impl ClientStatus {
    /// Every status, in menu order
    pub const ALL: [ClientStatus; 3] = [Self::Active, Self::Inactive, Self::Pending];

    /// Display text, also used as the sort key
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }

    /// Next status in menu order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Pending,
            Self::Pending => Self::Active,
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Pending" => Ok(Self::Pending),
            other => Err(Error::validation(format!("unknown client status '{other}'"))),
        }
    }
}

/// A client record in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Unique identifier within the roster
    pub id: u64,

    /// Client name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Lifecycle status
    pub status: ClientStatus,

    /// Date the client joined
    pub join_date: NaiveDate,
}

/// Payload of the add-client form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub status: ClientStatus,
}

impl NewClient {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            status: ClientStatus::default(),
        }
    }

    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = status;
        self
    }

    /// Both name and email are required
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("Name is required"));
        }
        if self.email.is_empty() {
            return Err(Error::validation("Email is required"));
        }
        Ok(())
    }

    /// Turn the payload into a record with the given id and join date
    pub fn into_record(self, id: u64, join_date: NaiveDate) -> ClientRecord {
        ClientRecord {
            id,
            name: self.name,
            email: self.email,
            status: self.status,
            join_date,
        }
    }
}

/// The roster every session starts with
pub fn seed_clients() -> Vec<ClientRecord> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

    vec![
        ClientRecord {
            id: 1,
            name: "Acme Corporation".to_string(),
            email: "contact@acme.com".to_string(),
            status: ClientStatus::Active,
            join_date: date(2024, 1, 15),
        },
        ClientRecord {
            id: 2,
            name: "TechStart Inc".to_string(),
            email: "hello@techstart.com".to_string(),
            status: ClientStatus::Active,
            join_date: date(2024, 2, 20),
        },
        ClientRecord {
            id: 3,
            name: "Global Solutions".to_string(),
            email: "info@globalsolutions.com".to_string(),
            status: ClientStatus::Pending,
            join_date: date(2024, 3, 10),
        },
        ClientRecord {
            id: 4,
            name: "Innovation Labs".to_string(),
            email: "team@innovationlabs.com".to_string(),
            status: ClientStatus::Inactive,
            join_date: date(2024, 1, 5),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Active", ClientStatus::Active)]
    #[case("Inactive", ClientStatus::Inactive)]
    #[case("Pending", ClientStatus::Pending)]
    fn test_status_parse(#[case] raw: &str, #[case] expected: ClientStatus) {
        assert_eq!(raw.parse::<ClientStatus>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn test_status_parse_is_case_sensitive() {
        assert!("active".parse::<ClientStatus>().is_err());
    }

    #[test]
    fn test_new_client_requires_name_and_email() {
        assert!(NewClient::new("", "a@b.com").validate().is_err());
        assert!(NewClient::new("Acme", "").validate().is_err());
        assert!(NewClient::new("Acme", "a@b.com").validate().is_ok());
    }

    #[test]
    fn test_record_serializes_camel_case_date() {
        let record = seed_clients().remove(0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["joinDate"], "2024-01-15");
        assert_eq!(json["status"], "Active");
    }
}
