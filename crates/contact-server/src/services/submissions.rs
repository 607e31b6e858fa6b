//! Submission service: the request-facing operations over a store

use crate::storage::{StorageError, SubmissionStore};
use contact_types::{ContactEntry, RawContactForm};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Persist one new submission
    pub async fn submit_contact(&self, raw: RawContactForm) -> Result<ContactEntry, StorageError> {
        match self.store.append(raw).await {
            Ok(entry) => {
                info!(
                    "Stored contact submission: id={}, mailing_list={}",
                    entry.id, entry.contact.mailing_list
                );
                Ok(entry)
            }
            Err(e) => {
                error!("Failed to store contact submission: {}", e);
                Err(e)
            }
        }
    }

    pub async fn list_for_admin(&self) -> Result<Vec<ContactEntry>, StorageError> {
        let entries = self.store.list().await?;
        debug!("Admin listing: {} entries", entries.len());
        Ok(entries)
    }

    pub async fn list_as_json(&self) -> Result<Vec<ContactEntry>, StorageError> {
        let entries = self.store.list().await?;
        debug!("JSON listing: {} entries", entries.len());
        Ok(entries)
    }
}
