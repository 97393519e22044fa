use std::sync::{Arc, PoisonError, RwLock};

use crate::models::holding::HoldingTable;

/// Owner of the single authoritative `HoldingTable`.
///
/// Readers get an `Arc` to an immutable snapshot; writers swap the whole
/// `Arc` under the write lock. A reader therefore sees either the old table
/// or the new one, never a mix. The lock only guards the pointer swap, so
/// it is held for a few instructions at most.
#[derive(Debug, Default)]
pub struct HoldingStore {
    current: RwLock<Arc<HoldingTable>>,
}

impl HoldingStore {
    /// A store holding the empty start-of-process table.
    pub fn new() -> Self {
        Self::with_table(HoldingTable::empty())
    }

    pub fn with_table(table: HoldingTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// The current snapshot. Later replacements do not affect it.
    pub fn snapshot(&self) -> Arc<HoldingTable> {
        // A panicking writer cannot leave a half-built table behind (the
        // swap is a single assignment), so a poisoned lock is still consistent.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the whole table, returning the one it displaced.
    pub fn replace(&self, table: HoldingTable) -> Arc<HoldingTable> {
        let next = Arc::new(table);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
