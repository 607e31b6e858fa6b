//! In-memory submission store using DashMap

use super::{Result, SubmissionStore};
use async_trait::async_trait;
use chrono::Utc;
use contact_types::{sort_newest_first, ContactEntry, RawContactForm};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// Process-local store; contents are lost on restart
pub struct MemoryStore {
    entries: DashMap<i64, ContactEntry>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn append(&self, raw: RawContactForm) -> Result<ContactEntry> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let entry = ContactEntry::new(id, raw.normalize(), Utc::now());

        self.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<ContactEntry>> {
        let mut entries: Vec<ContactEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        sort_newest_first(&mut entries);

        Ok(entries)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
