use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{errors::ServiceError, models::ReagentRecord};

/// How the store hands out identifiers for new records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// `record count + 1`. Only unique while nothing is ever removed and
    /// every record went through `next_id`.
    #[default]
    CountPlusOne,
    /// Store-owned counter, one past the highest id ever inserted.
    Monotonic,
}

/// Ordered, append-only collection of reagent records.
#[derive(Debug, Clone, Default)]
pub struct ReagentStore {
    records: Vec<ReagentRecord>,
    policy: IdPolicy,
    high_water: u64,
}

impl ReagentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: IdPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    /// Identifier the next ingested record should carry.
    pub fn next_id(&self) -> u64 {
        match self.policy {
            IdPolicy::CountPlusOne => self.records.len() as u64 + 1,
            IdPolicy::Monotonic => self.high_water + 1,
        }
    }

    /// Appends without deduplication. The record keeps whatever id it carries.
    pub fn add(&mut self, record: ReagentRecord) {
        self.high_water = self.high_water.max(record.id);
        debug!(id = record.id, name = %record.name, "reagent appended");
        self.records.push(record);
    }

    /// Like [`add`](Self::add), but refuses a record whose id is already taken.
    pub fn try_add(&mut self, record: ReagentRecord) -> Result<(), ServiceError> {
        if self.contains(record.id) {
            return Err(ServiceError::Conflict(format!(
                "reagent id {} is already in use",
                record.id
            )));
        }
        self.add(record);
        Ok(())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&ReagentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records whose name or manufacturer contains `search_term`, ignoring case,
    /// in insertion order. An empty term matches everything.
    pub fn filter<'a>(&'a self, search_term: &str) -> impl Iterator<Item = &'a ReagentRecord> + 'a {
        let needle = search_term.to_lowercase();
        debug!(search_term, total = self.records.len(), "filtering reagents");
        self.records
            .iter()
            .filter(move |record| record.matches_lowercase(&needle))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReagentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<ReagentRecord> for ReagentStore {
    fn extend<T: IntoIterator<Item = ReagentRecord>>(&mut self, iter: T) {
        for record in iter {
            self.add(record);
        }
    }
}
