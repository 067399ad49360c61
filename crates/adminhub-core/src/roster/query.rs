//! Search, status filter and sort over the roster
//!
//! The projection is recomputed from scratch on every call. That is fine for
//! a hand-maintained client list; a large roster would want an index.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{ClientRecord, ClientStatus};

/// Column the projection is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Name,
    Email,
    Status,
    JoinDate,
}

impl SortField {
    /// Columns in display order
    pub const ALL: [SortField; 4] = [Self::Name, Self::Email, Self::Status, Self::JoinDate];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Status => "Status",
            Self::JoinDate => "Join Date",
        }
    }

    /// Compare two records on this column, ascending.
    ///
    /// Text columns use plain byte-wise ordering, so upper case sorts before
    /// lower case.
    pub fn compare(self, a: &ClientRecord, b: &ClientRecord) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Email => a.email.cmp(&b.email),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::JoinDate => a.join_date.cmp(&b.join_date),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "status" => Ok(Self::Status),
            "joinDate" | "join_date" | "join-date" => Ok(Self::JoinDate),
            other => Err(Error::validation(format!("unknown sort field '{other}'"))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Status filter: everything, or one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ClientStatus),
}

impl StatusFilter {
    /// Filter options in menu order
    pub const OPTIONS: [StatusFilter; 4] = [
        Self::All,
        Self::Only(ClientStatus::Active),
        Self::Only(ClientStatus::Inactive),
        Self::Only(ClientStatus::Pending),
    ];

    pub fn matches(self, status: ClientStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }

    /// Next option in menu order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(ClientStatus::Active),
            Self::Only(ClientStatus::Pending) => Self::All,
            Self::Only(status) => Self::Only(status.next()),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

/// View parameters of the client table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    /// Free text matched against name and email, case-insensitively
    pub search: String,
    pub status_filter: StatusFilter,
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
}

impl RosterQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    pub fn with_sort(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_field = field;
        self.sort_direction = direction;
        self
    }

    /// Header click: the active column flips direction, a new column starts
    /// ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if field == self.sort_field {
            self.sort_direction = self.sort_direction.flip();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Whether a record passes the search and status filter
    pub fn matches(&self, record: &ClientRecord) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = record.name.to_lowercase().contains(&needle)
            || record.email.to_lowercase().contains(&needle);

        matches_search && self.status_filter.matches(record.status)
    }

    /// Build the projection: matching records in display order.
    ///
    /// Equal keys keep their roster order.
    pub fn project<'a, I>(&self, records: I) -> Vec<ClientRecord>
    where
        I: IntoIterator<Item = &'a ClientRecord>,
    {
        let mut rows: Vec<ClientRecord> = records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        rows.sort_by(|a, b| self.sort_direction.apply(self.sort_field.compare(a, b)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed_clients;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn client(id: u64, name: &str, email: &str, status: ClientStatus, day: u32) -> ClientRecord {
        ClientRecord {
            id,
            name: name.to_string(),
            email: email.to_string(),
            status,
            join_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        }
    }

    fn names(rows: &[ClientRecord]) -> Vec<&str> {
        rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_default_query_shows_everything_by_name() {
        let rows = RosterQuery::new().project(&seed_clients());
        assert_eq!(
            names(&rows),
            ["Acme Corporation", "Global Solutions", "Innovation Labs", "TechStart Inc"]
        );
    }

    #[test]
    fn test_name_sort_is_case_sensitive() {
        let records = vec![
            client(1, "Bob", "b@x.com", ClientStatus::Active, 1),
            client(2, "alice", "a@x.com", ClientStatus::Active, 2),
            client(3, "Carol", "c@x.com", ClientStatus::Active, 3),
        ];

        let rows = RosterQuery::new().project(&records);
        assert_eq!(names(&rows), ["Bob", "Carol", "alice"]);
    }

    #[test]
    fn test_search_matches_name_or_email_ignoring_case() {
        let records = seed_clients();

        let by_name = RosterQuery::new().with_search("TECH").project(&records);
        assert_eq!(names(&by_name), ["TechStart Inc"]);

        let by_email = RosterQuery::new().with_search("innovationlabs.com").project(&records);
        assert_eq!(names(&by_email), ["Innovation Labs"]);
    }

    #[test]
    fn test_search_and_status_combine() {
        let records = seed_clients();
        let query = RosterQuery::new()
            .with_search(".com")
            .with_status(StatusFilter::Only(ClientStatus::Active));

        assert_eq!(names(&query.project(&records)), ["Acme Corporation", "TechStart Inc"]);
    }

    #[test]
    fn test_no_match_is_empty_projection() {
        let rows = RosterQuery::new().with_search("zzz").project(&seed_clients());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_join_date_sort_uses_calendar_order() {
        let query = RosterQuery::new().with_sort(SortField::JoinDate, SortDirection::Desc);
        let rows = query.project(&seed_clients());
        assert_eq!(
            names(&rows),
            ["Global Solutions", "TechStart Inc", "Acme Corporation", "Innovation Labs"]
        );
    }

    #[test]
    fn test_status_sort_by_text() {
        let query = RosterQuery::new().with_sort(SortField::Status, SortDirection::Asc);
        let statuses: Vec<ClientStatus> =
            query.project(&seed_clients()).iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            [
                ClientStatus::Active,
                ClientStatus::Active,
                ClientStatus::Inactive,
                ClientStatus::Pending,
            ]
        );
    }

    #[test]
    fn test_equal_keys_keep_roster_order() {
        let records = vec![
            client(1, "Same", "z@x.com", ClientStatus::Active, 1),
            client(2, "Same", "a@x.com", ClientStatus::Active, 2),
        ];
        let ids: Vec<u64> = RosterQuery::new().project(&records).iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_toggle_sort_cycle() {
        let mut query = RosterQuery::new();

        query.toggle_sort(SortField::Email);
        assert_eq!(query.sort_field, SortField::Email);
        assert_eq!(query.sort_direction, SortDirection::Asc);

        query.toggle_sort(SortField::Email);
        assert_eq!(query.sort_direction, SortDirection::Desc);

        query.toggle_sort(SortField::Email);
        assert_eq!(query.sort_direction, SortDirection::Asc);

        query.toggle_sort(SortField::Email);
        query.toggle_sort(SortField::Status);
        assert_eq!(query.sort_field, SortField::Status);
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_projection_does_not_touch_source() {
        let records = seed_clients();
        let before = records.clone();
        let _ = RosterQuery::new()
            .with_sort(SortField::JoinDate, SortDirection::Desc)
            .project(&records);
        assert_eq!(records, before);
    }

    #[rstest]
    #[case("all", StatusFilter::All)]
    #[case("Active", StatusFilter::Only(ClientStatus::Active))]
    #[case("Inactive", StatusFilter::Only(ClientStatus::Inactive))]
    #[case("Pending", StatusFilter::Only(ClientStatus::Pending))]
    fn test_status_filter_parse(#[case] raw: &str, #[case] expected: StatusFilter) {
        assert_eq!(raw.parse::<StatusFilter>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test]
    fn test_status_filter_cycles_through_options() {
        let mut filter = StatusFilter::All;
        let mut seen = Vec::new();
        for _ in 0..StatusFilter::OPTIONS.len() {
            seen.push(filter);
            filter = filter.next();
        }
        assert_eq!(seen, StatusFilter::OPTIONS);
        assert_eq!(filter, StatusFilter::All);
    }

    fn arb_status() -> impl Strategy<Value = ClientStatus> {
        prop::sample::select(ClientStatus::ALL.to_vec())
    }

    fn arb_records() -> impl Strategy<Value = Vec<ClientRecord>> {
        let row = ("[A-Za-z ]{1,12}", "[a-z]{1,8}@[a-z]{1,6}\\.com", arb_status(), 1_u32..28);
        prop::collection::vec(row, 0..12)
            .prop_map(|rows| {
                rows.into_iter()
                    .zip(1..)
                    .map(|((name, email, status, day), id)| client(id, &name, &email, status, day))
                    .collect()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn substring_of_name_or_email_is_found(
            records in arb_records(),
            pick in any::<prop::sample::Index>(),
            use_email in any::<bool>(),
            start in 0_usize..4,
            len in 1_usize..4,
        ) {
            prop_assume!(!records.is_empty());
            let target = &records[pick.index(records.len())];
            let source = if use_email { &target.email } else { &target.name };
            let chars: Vec<char> = source.chars().collect();
            let start = start.min(chars.len() - 1);
            let end = (start + len).min(chars.len());
            let term: String = chars[start..end].iter().collect::<String>().to_uppercase();

            let rows = RosterQuery::new().with_search(term).project(&records);
            prop_assert!(rows.iter().any(|r| r.id == target.id));
        }

        #[test]
        fn status_filter_only_yields_that_status(records in arb_records(), status in arb_status()) {
            let rows = RosterQuery::new()
                .with_status(StatusFilter::Only(status))
                .project(&records);
            prop_assert!(rows.iter().all(|r| r.status == status));
            prop_assert_eq!(rows.len(), records.iter().filter(|r| r.status == status).count());
        }

        #[test]
        fn descending_reverses_ascending_on_distinct_keys(records in arb_records()) {
            let mut seen = std::collections::HashSet::new();
            let distinct: Vec<ClientRecord> = records
                .into_iter()
                .filter(|r| seen.insert(r.email.clone()))
                .collect();

            let asc = RosterQuery::new()
                .with_sort(SortField::Email, SortDirection::Asc)
                .project(&distinct);
            let mut desc = RosterQuery::new()
                .with_sort(SortField::Email, SortDirection::Desc)
                .project(&distinct);
            desc.reverse();
            prop_assert_eq!(asc, desc);
        }
    }
}
