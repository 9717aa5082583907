//! Local Mirror Store
//!
//! Ordered in-memory copy of a remote collection, keyed by id. Mutations are
//! applied only as the echo of a backend call that already succeeded.
//!
//! Every entry carries a version that changes whenever its content changes.
//! A mutation takes a [`MutationTicket`] before its remote call and commits
//! with it afterwards: at most one ticket per id may be outstanding, and a
//! commit whose target changed or vanished in the meantime is rejected, so
//! a late echo can never overwrite a newer state or resurrect a deleted record.

use super::record::ListRecord;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    /// Another mutation on the same id is still in flight, or the record
    /// changed since the ticket was taken
    #[error("record '{0}' changed while the request was in flight")]
    Stale(String),
}

/// Permission to mutate one id, taken before the remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    id: Option<String>,
    version: Option<u64>,
}

impl MutationTicket {
    /// Ticket for a record that does not exist yet
    pub fn for_create() -> Self {
        Self {
            id: None,
            version: None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// What to apply once the backend confirmed the mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MirrorOp<T> {
    Upsert(T),
    SetActive(bool),
    Remove,
}

#[derive(Debug, Clone)]
pub struct MirrorStore<T> {
    records: Vec<T>,
    versions: HashMap<String, u64>,
    in_flight: HashSet<String>,
    next_version: u64,
}

impl<T> Default for MirrorStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            versions: HashMap::new(),
            in_flight: HashSet::new(),
            next_version: 1,
        }
    }
}

impl<T: ListRecord> MirrorStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.position(id).map(|idx| &self.records[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn is_in_flight(&self, id: &str) -> bool {
        self.in_flight.contains(id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    fn bump(&mut self, id: &str) {
        let version = self.next_version;
        self.next_version += 1;
        self.versions.insert(id.to_string(), version);
    }

    /// Replaces the whole collection after a `list` call.
    ///
    /// Duplicate ids collapse into the first position with the last value.
    /// Unchanged records keep their version, so in-flight tickets on them
    /// stay valid.
    pub fn replace_all(&mut self, incoming: Vec<T>) {
        let mut records: Vec<T> = Vec::with_capacity(incoming.len());
        let mut index: HashMap<String, usize> = HashMap::new();
        for record in incoming {
            match index.get(record.id()) {
                Some(&idx) => records[idx] = record,
                None => {
                    index.insert(record.id().to_string(), records.len());
                    records.push(record);
                }
            }
        }

        let previous = std::mem::take(&mut self.records);
        let mut old_versions = std::mem::take(&mut self.versions);
        for record in &records {
            let unchanged = previous
                .iter()
                .find(|p| p.id() == record.id())
                .is_some_and(|p| p == record);
            match old_versions.remove(record.id()) {
                Some(version) if unchanged => {
                    self.versions.insert(record.id().to_string(), version);
                }
                _ => self.bump(record.id()),
            }
        }
        self.records = records;
    }

    /// Inserts when the id is absent, otherwise replaces in place
    pub fn upsert(&mut self, record: T) {
        let id = record.id().to_string();
        match self.position(&id) {
            Some(idx) => {
                if self.records[idx] != record {
                    self.records[idx] = record;
                    self.bump(&id);
                }
            }
            None => {
                self.records.push(record);
                self.bump(&id);
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let idx = self.position(id)?;
        self.versions.remove(id);
        Some(self.records.remove(idx))
    }

    /// Applies a partial change in place; `false` when the id is absent
    pub fn patch(&mut self, id: &str, change: impl FnOnce(&mut T)) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let before = self.records[idx].clone();
        change(&mut self.records[idx]);
        // The id is immutable once assigned
        if self.records[idx].id() != id {
            self.records[idx] = before;
            return false;
        }
        if self.records[idx] != before {
            self.bump(id);
        }
        true
    }

    /// Claims `id` for one mutation
    pub fn begin(&mut self, id: &str) -> Result<MutationTicket, MirrorError> {
        if self.in_flight.contains(id) {
            return Err(MirrorError::Stale(id.to_string()));
        }
        let version = self.versions.get(id).copied();
        self.in_flight.insert(id.to_string());
        Ok(MutationTicket {
            id: Some(id.to_string()),
            version,
        })
    }

    /// Gives the claim back without touching the record (remote call failed)
    pub fn release(&mut self, ticket: MutationTicket) {
        if let Some(id) = ticket.id {
            self.in_flight.remove(&id);
        }
    }

    /// Applies `op` if the record is still the one the ticket was taken on
    pub fn commit(&mut self, ticket: MutationTicket, op: MirrorOp<T>) -> Result<(), MirrorError> {
        let MutationTicket { id, version } = ticket;
        let Some(id) = id else {
            // Creates have no prior state to conflict with
            if let MirrorOp::Upsert(record) = op {
                self.upsert(record);
            }
            return Ok(());
        };
        self.in_flight.remove(&id);

        let current = self.versions.get(&id).copied();
        if version.is_none() || current != version {
            return Err(MirrorError::Stale(id));
        }

        match op {
            MirrorOp::Upsert(record) => {
                if record.id() != id {
                    return Err(MirrorError::Stale(id));
                }
                self.upsert(record);
            }
            MirrorOp::SetActive(active) => {
                self.patch(&id, |r| r.set_active(active));
            }
            MirrorOp::Remove => {
                self.remove(&id);
            }
        }
        Ok(())
    }

    /// Drops the entry after the backend reported it missing.
    ///
    /// Always allowed: a 404 is authoritative no matter what changed locally.
    pub fn reconcile_missing(&mut self, ticket: MutationTicket) -> Option<T> {
        let id = ticket.id?;
        self.in_flight.remove(&id);
        self.remove(&id)
    }
}
