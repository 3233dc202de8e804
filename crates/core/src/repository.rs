//! Repository abstraction over the record collections.
//!
//! [`DeskService`](crate::DeskService) only talks to [`Repository`], so a real
//! store can replace [`InMemoryRepository`] without touching the rules.

use std::sync::RwLock;

use crate::entity::{Appointment, Collector, Debt, Student};
use crate::error::{DeskError, Result};

/// A stored record addressable by string id.
pub trait Record: Clone + Send + Sync {
    fn id(&self) -> &str;

    /// Singular name used in log and error messages.
    fn kind() -> &'static str;
}

impl Record for Student {
    fn id(&self) -> &str {
        &self.id
    }
    fn kind() -> &'static str {
        "student"
    }
}

impl Record for Debt {
    fn id(&self) -> &str {
        &self.id
    }
    fn kind() -> &'static str {
        "debt"
    }
}

impl Record for Collector {
    fn id(&self) -> &str {
        &self.id
    }
    fn kind() -> &'static str {
        "collector"
    }
}

impl Record for Appointment {
    fn id(&self) -> &str {
        &self.id
    }
    fn kind() -> &'static str {
        "appointment"
    }
}

pub trait Repository<T: Record>: Send + Sync {
    fn get(&self, id: &str) -> Option<T>;

    /// First record matching `predicate`, in storage order.
    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T>;

    /// All records in storage order.
    fn list(&self) -> Vec<T>;

    /// Fails if a record with the same id exists.
    fn insert(&self, record: T) -> Result<T>;

    /// Replace the record with the same id. Returns `None` if absent.
    fn update(&self, record: T) -> Option<T>;

    /// Remove by id, returning the removed record.
    fn delete(&self, id: &str) -> Option<T>;

    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.list().into_iter().filter(|r| predicate(r)).collect()
    }
}

/// Vec-backed repository. Insertion order is preserved, which is what
/// first-fit collector selection iterates over.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self { records: RwLock::new(Vec::new()) }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self { records: RwLock::new(records) }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<T>> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<T>> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: &str) -> Option<T> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    fn find(&self, predicate: &dyn Fn(&T) -> bool) -> Option<T> {
        self.read().iter().find(|r| predicate(r)).cloned()
    }

    fn list(&self) -> Vec<T> {
        self.read().clone()
    }

    fn insert(&self, record: T) -> Result<T> {
        let mut guard = self.write();
        if guard.iter().any(|r| r.id() == record.id()) {
            return Err(DeskError::Validation(format!(
                "{} with id '{}' already exists",
                T::kind(),
                record.id()
            )));
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: T) -> Option<T> {
        let mut guard = self.write();
        let slot = guard.iter_mut().find(|r| r.id() == record.id())?;
        *slot = record.clone();
        Some(record)
    }

    fn delete(&self, id: &str) -> Option<T> {
        let mut guard = self.write();
        let index = guard.iter().position(|r| r.id() == id)?;
        Some(guard.remove(index))
    }
}
