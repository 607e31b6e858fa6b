//! SQLite submission store (embedded, no external dependencies)

use super::{Result, StorageError, SubmissionStore};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use contact_types::{ContactEntry, MailFormat, NewContact, RawContactForm};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tracing::debug!("Creating parent directory: {}", parent.display());
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        tracing::info!("SQLite connection established, running migrations...");
        Self::with_pool(pool).await
    }

    /// Private database living as long as the pool's single connection
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        Self::run_migrations(&pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                job_title TEXT NOT NULL DEFAULT '',
                company TEXT NOT NULL DEFAULT '',
                email TEXT NOT NULL DEFAULT '',
                mailing_list INTEGER NOT NULL DEFAULT 0,
                format TEXT NOT NULL DEFAULT 'html',
                linkedin TEXT NOT NULL DEFAULT '',
                meet TEXT NOT NULL DEFAULT '',
                other TEXT NOT NULL DEFAULT '',
                message TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn append(&self, raw: RawContactForm) -> Result<ContactEntry> {
        let contact = raw.normalize();
        // Stored at millisecond precision, so truncate before handing it back
        let created_at = millis_to_datetime(Utc::now().timestamp_millis())?;

        let result = sqlx::query(
            r#"
            INSERT INTO contacts (first_name, last_name, job_title, company, email,
                                  mailing_list, format, linkedin, meet, other, message,
                                  created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.job_title)
        .bind(&contact.company)
        .bind(&contact.email)
        .bind(contact.mailing_list)
        .bind(contact.format.as_str())
        .bind(&contact.linkedin)
        .bind(&contact.meet)
        .bind(&contact.other)
        .bind(&contact.message)
        .bind(created_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(ContactEntry::new(
            result.last_insert_rowid(),
            contact,
            created_at,
        ))
    }

    async fn list(&self) -> Result<Vec<ContactEntry>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, job_title, company, email,
                   mailing_list, format, linkedin, meet, other, message, created_at
            FROM contacts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ContactEntry::try_from).collect()
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    first_name: String,
    last_name: String,
    job_title: String,
    company: String,
    email: String,
    mailing_list: bool,
    format: String,
    linkedin: String,
    meet: String,
    other: String,
    message: String,
    created_at: i64,
}

impl TryFrom<ContactRow> for ContactEntry {
    type Error = StorageError;

    fn try_from(r: ContactRow) -> Result<Self> {
        let created_at = millis_to_datetime(r.created_at)?;
        let contact = NewContact {
            first_name: r.first_name,
            last_name: r.last_name,
            job_title: r.job_title,
            company: r.company,
            email: r.email,
            mailing_list: r.mailing_list,
            format: MailFormat::from_raw(Some(&r.format)),
            linkedin: r.linkedin,
            meet: r.meet,
            other: r.other,
            message: r.message,
        };

        Ok(ContactEntry::new(r.id, contact, created_at))
    }
}

fn millis_to_datetime(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(StorageError::InvalidTimestamp(millis))
}
