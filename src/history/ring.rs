use super::HistoryEntry;
use crate::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 10;

/// Bounded log of recent predictions. Appends evict the oldest entry once
/// `capacity` is reached; reads come back most-recent first.
pub struct HistoryRing {
    capacity: usize,
    entries: Mutex<VecDeque<HistoryEntry>>,
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn append(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.lock()?;
        Self::push_bounded(&mut entries, entry, self.capacity);
        Ok(())
    }

    /// Appends and snapshots under one lock, so the returned history always
    /// contains `entry` at the front.
    pub fn record(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.lock()?;
        Self::push_bounded(&mut entries, entry, self.capacity);
        Ok(entries.iter().cloned().collect())
    }

    pub fn snapshot(&self) -> Result<Vec<HistoryEntry>> {
        let entries = self.lock()?;
        Ok(entries.iter().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn push_bounded(entries: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, capacity: usize) {
        entries.push_front(entry);
        while entries.len() > capacity {
            if let Some(evicted) = entries.pop_back() {
                debug!("Evicted history entry {}", evicted.id);
            }
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<HistoryEntry>>> {
        self.entries
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
    }
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
