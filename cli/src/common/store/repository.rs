//! # Memory Repository (`common::store::repository`)
//!
//! File: cli/src/common/store/repository.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `MemoryRepository<T>` keeps records in a `BTreeMap` behind a `RwLock`.
//! Ids are handed out sequentially, starting after the highest seeded id.
//! A poisoned lock is reported as [`StoreError::Poisoned`], never a panic.
//!
use super::{Record, RecordId, Repository, StoreError};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error};

#[derive(Debug)]
struct Inner<T> {
    records: BTreeMap<RecordId, T>,
    next_id: RecordId,
}

/// Process-local repository. Contents vanish when the process exits.
#[derive(Debug)]
pub struct MemoryRepository<T> {
    name: &'static str,
    inner: RwLock<Inner<T>>,
}

impl<T: Record> MemoryRepository<T> {
    /// An empty repository whose first id is 1.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: RwLock::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// A repository pre-filled with `records`, keyed by their own ids.
    /// The next assigned id is one past the highest seeded id.
    pub fn seeded(name: &'static str, records: impl IntoIterator<Item = T>) -> Self {
        let records: BTreeMap<RecordId, T> = records.into_iter().map(|r| (r.id(), r)).collect();
        let next_id = records
            .keys()
            .next_back()
            .map_or(1, |max| max.saturating_add(1));
        debug!("Seeded {} repository with {} records", name, records.len());
        Self {
            name,
            inner: RwLock::new(Inner { records, next_id }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<T>>, StoreError> {
        self.inner.read().map_err(|_| {
            error!("{} repository lock poisoned", self.name);
            StoreError::Poisoned(self.name)
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<T>>, StoreError> {
        self.inner.write().map_err(|_| {
            error!("{} repository lock poisoned", self.name);
            StoreError::Poisoned(self.name)
        })
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.read()?.records.values().cloned().collect())
    }

    fn get(&self, id: RecordId) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    fn create(&self, record: T) -> Result<T, StoreError> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id = id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted(self.name))?;
        let stored = record.with_id(id);
        inner.records.insert(id, stored.clone());
        debug!("Created {} record {}", self.name, id);
        Ok(stored)
    }

    fn update(&self, id: RecordId, record: T) -> Result<Option<T>, StoreError> {
        let mut inner = self.write()?;
        match inner.records.get_mut(&id) {
            Some(slot) => {
                *slot = record.with_id(id);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let removed = self.write()?.records.remove(&id).is_some();
        if removed {
            debug!("Deleted {} record {}", self.name, id);
        }
        Ok(removed)
    }
}
