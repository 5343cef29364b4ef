//! The write contract between the import pipeline and the persistent store.
//!
//! There is exactly one side-effecting operation in the core: a batch upsert
//! keyed on `(agent_id, date, hour)` where an existing row is fully replaced
//! by the incoming one — never merged or summed. Aggregation never updates
//! incrementally; it reads a full snapshot at call time.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{CallKey, CallRecord};

/// A store rejection. The message is surfaced to the caller verbatim; the
/// whole batch is considered failed and no partial-write assumption is made.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// Persistent home of [`CallRecord`]s.
///
/// Implementations must give `upsert` per-key replace semantics. Records are
/// never mutated field-by-field and never deleted individually — only
/// overwritten by key or wiped wholesale via `clear_all`.
pub trait CallRecordStore {
    /// Batch write: insert new keys, fully replace existing ones.
    fn upsert(&mut self, records: &[CallRecord]) -> Result<(), StoreError>;

    /// Full snapshot of the current record set, in a stable
    /// implementation-defined order.
    fn snapshot(&self) -> Result<Vec<CallRecord>, StoreError>;

    /// Bulk clear. The only deletion operation the core knows about.
    fn clear_all(&mut self) -> Result<(), StoreError>;
}

/// In-memory store: the reference implementation of the upsert semantics,
/// used by tests and by hosts that keep the working set resident.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<CallRecord>,
    index: HashMap<CallKey, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CallRecordStore for MemoryStore {
    fn upsert(&mut self, records: &[CallRecord]) -> Result<(), StoreError> {
        for record in records {
            let key = CallKey::from(record);
            match self.index.get(&key).copied() {
                Some(pos) => self.records[pos] = record.clone(),
                None => {
                    self.index.insert(key, self.records.len());
                    self.records.push(record.clone());
                }
            }
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<CallRecord>, StoreError> {
        Ok(self.records.clone())
    }

    fn clear_all(&mut self) -> Result<(), StoreError> {
        self.records.clear();
        self.index.clear();
        Ok(())
    }
}
