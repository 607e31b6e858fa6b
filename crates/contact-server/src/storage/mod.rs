//! Storage layer
//!
//! Two interchangeable submission stores behind one trait:
//! DashMap (in-memory) and SQLite (embedded, file-backed).

pub mod db;
pub mod memory;

pub use db::SqliteStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use contact_types::{ContactEntry, RawContactForm};
use thiserror::Error;

/// Failure of a persistence-backed store
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Stored timestamp out of range: {0}")]
    InvalidTimestamp(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Append-only store of contact form submissions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Normalize, timestamp and persist a submission.
    ///
    /// On error nothing is stored.
    async fn append(&self, raw: RawContactForm) -> Result<ContactEntry>;

    /// Fresh snapshot of every entry, newest first
    async fn list(&self) -> Result<Vec<ContactEntry>>;

    /// Short backend name for diagnostics
    fn backend(&self) -> &'static str;
}
