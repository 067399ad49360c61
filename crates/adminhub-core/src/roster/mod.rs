//! Client roster: the in-memory record store and its table view
//!
//! Records are kept in insertion order. Display order is decided entirely by
//! [`RosterQuery`].

mod form;
mod query;

pub use form::{ClientForm, FormField};
pub use query::{RosterQuery, SortDirection, SortField, StatusFilter};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{seed_clients, ClientRecord, NewClient};

/// Hands out client ids.
///
/// Ids only ever grow and are never reused, even after the record holding
/// the highest id is deleted or the roster is emptied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Start after the highest id in `records`, or at 1 for an empty set
    pub fn after<'a>(records: impl IntoIterator<Item = &'a ClientRecord>) -> Self {
        let next = records.into_iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        Self { next }
    }

    /// Peek at the id the next allocation returns
    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// In-memory client collection
#[derive(Debug, Clone)]
pub struct Roster {
    clients: Vec<ClientRecord>,
    ids: IdAllocator,
}

impl Default for Roster {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Roster {
    /// Create a roster holding `clients`
    pub fn new(clients: Vec<ClientRecord>) -> Self {
        let ids = IdAllocator::after(&clients);
        Self { clients, ids }
    }

    /// Roster with the demo clients every session starts with
    pub fn seeded() -> Self {
        Self::new(seed_clients())
    }

    /// Records in insertion order
    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&ClientRecord> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// Add a client with an explicit join date.
    ///
    /// Rejected payloads leave the roster untouched and do not consume an id.
    pub fn add_on(&mut self, client: NewClient, join_date: NaiveDate) -> Result<&ClientRecord> {
        client.validate()?;

        let id = self.ids.allocate();
        let record = client.into_record(id, join_date);
        info!(client_id = id, name = %record.name, status = %record.status, "Client added");

        self.clients.push(record);
        Ok(&self.clients[self.clients.len() - 1])
    }

    /// Remove the client with `id`, if present
    pub fn remove(&mut self, id: u64) -> Option<ClientRecord> {
        match self.clients.iter().position(|c| c.id == id) {
            Some(idx) => {
                let removed = self.clients.remove(idx);
                info!(client_id = id, name = %removed.name, "Client removed");
                Some(removed)
            }
            None => {
                debug!(client_id = id, "Remove ignored, no such client");
                None
            }
        }
    }

    /// Current projection for `query`
    pub fn project(&self, query: &RosterQuery) -> Vec<ClientRecord> {
        query.project(&self.clients)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClientStatus;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_add_assigns_next_id_and_date() {
        let mut roster = Roster::seeded();
        let nova = NewClient::new("Nova Ltd", "hi@nova.io").with_status(ClientStatus::Pending);
        let added = roster.add_on(nova, day(3)).unwrap().clone();

        assert_eq!(added.id, 5);
        assert_eq!(added.join_date, day(3));
        assert_eq!(added.status, ClientStatus::Pending);
        assert_eq!(roster.clients().last(), Some(&added));
    }

    #[test]
    fn test_add_with_empty_name_is_rejected() {
        let mut roster = Roster::seeded();
        let before = roster.clients().to_vec();

        let err = roster.add_on(NewClient::new("", "x@y.com"), day(1)).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(roster.clients(), before.as_slice());
        assert_eq!(roster.ids.peek(), 5);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut roster = Roster::seeded();
        let before = roster.clients().to_vec();

        assert!(roster.remove(99).is_none());
        assert_eq!(roster.clients(), before.as_slice());
    }

    #[test]
    fn test_remove_present_id() {
        let mut roster = Roster::seeded();
        let removed = roster.remove(2).unwrap();
        assert_eq!(removed.name, "TechStart Inc");
        assert!(roster.get(2).is_none());
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_ids_are_not_reused_after_emptying() {
        let mut roster = Roster::seeded();
        for id in 1..=4 {
            roster.remove(id);
        }
        assert!(roster.is_empty());

        let added = roster.add_on(NewClient::new("Fresh", "f@x.com"), day(1)).unwrap();
        assert_eq!(added.id, 5);
    }

    #[test]
    fn test_empty_roster_starts_at_one() {
        let mut roster = Roster::new(Vec::new());
        let added = roster.add_on(NewClient::new("First", "f@x.com"), day(1)).unwrap();
        assert_eq!(added.id, 1);
    }

    #[test]
    fn test_removing_highest_id_does_not_lower_next() {
        let mut roster = Roster::seeded();
        roster.remove(4);
        let added = roster.add_on(NewClient::new("Next", "n@x.com"), day(1)).unwrap();
        assert_eq!(added.id, 5);
    }
}
