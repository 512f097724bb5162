//! SQLite-backed quota and article store
//!
//! Quota deduction is a single conditional `UPDATE`, so concurrent requests
//! (including requests from other processes sharing the file) can never drive
//! a balance below zero.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use shared::{ArticleRecord, NewArticle, PostStatus, StoreAccount, StoreId, SubscriptionPlan};
use crate::error::{StoreError, StoreResult};
use crate::traits::{ArticleStore, QuotaStore};
use crate::types::DeductOutcome;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS store_accounts (
    store_id TEXT PRIMARY KEY,
    tokens_remaining INTEGER NOT NULL CHECK (tokens_remaining >= 0),
    subscription_plan TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    store_id TEXT NOT NULL,
    title TEXT NOT NULL,
    meta_description TEXT NOT NULL,
    content TEXT NOT NULL,
    image_url TEXT,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_articles_store ON articles(store_id, created_at);
";

const ARTICLE_COLUMNS: &str =
    "id, store_id, title, meta_description, content, image_url, status, created_at, updated_at";

/// Raw article row before validation
type ArticleRow = (String, String, String, String, String, Option<String>, String, String, String);

/// SQLite store; clones share one connection
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))?;
        Self::initialize(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| StoreError::Unavailable {
                message: "connection lock poisoned".to_string(),
            })?;
            f(&guard)
        })
        .await?
    }
}

fn ensure_account(conn: &Connection, store_id: &StoreId) -> StoreResult<()> {
    let defaults = StoreAccount::with_defaults(store_id.clone());
    conn.execute(
        "INSERT OR IGNORE INTO store_accounts (store_id, tokens_remaining, subscription_plan) VALUES (?1, ?2, ?3)",
        params![store_id.as_str(), defaults.tokens_remaining, defaults.subscription_plan.to_string()],
    )?;
    Ok(())
}

fn read_account(conn: &Connection, store_id: &StoreId) -> StoreResult<StoreAccount> {
    let (tokens_remaining, plan): (u32, String) = conn.query_row(
        "SELECT tokens_remaining, subscription_plan FROM store_accounts WHERE store_id = ?1",
        params![store_id.as_str()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(StoreAccount::new(store_id.clone(), tokens_remaining, SubscriptionPlan::from_label_or_free(&plan)))
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::CorruptRecord { message: format!("bad timestamp {raw:?}: {e}") })
}

fn read_article_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ArticleRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn into_record(row: ArticleRow) -> StoreResult<ArticleRecord> {
    let (id, store_id, title, meta_description, content, image_url, status, created_at, updated_at) = row;
    let corrupt = |message: String| StoreError::CorruptRecord { message };

    Ok(ArticleRecord {
        id: Uuid::parse_str(&id).map_err(|e| corrupt(format!("bad article id {id:?}: {e}")))?,
        store_id: StoreId::new(store_id).map_err(|e| corrupt(e.to_string()))?,
        title,
        meta_description,
        content,
        image_url,
        status: status.parse::<PostStatus>().map_err(|e| corrupt(e.to_string()))?,
        created_at: parse_time(&created_at)?,
        updated_at: parse_time(&updated_at)?,
    })
}

fn fetch_article(conn: &Connection, store_id: &StoreId, id: Uuid) -> StoreResult<Option<ArticleRecord>> {
    let row = conn
        .query_row(
            &format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?1 AND store_id = ?2"),
            params![id.to_string(), store_id.as_str()],
            read_article_row,
        )
        .optional()?;
    row.map(into_record).transpose()
}

#[async_trait]
impl QuotaStore for SqliteStore {
    async fn load_account(&self, store_id: &StoreId) -> StoreResult<StoreAccount> {
        let store_id = store_id.clone();
        self.with_conn(move |conn| {
            ensure_account(conn, &store_id)?;
            read_account(conn, &store_id)
        })
        .await
    }

    async fn put_account(&self, account: StoreAccount) -> StoreResult<()> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO store_accounts (store_id, tokens_remaining, subscription_plan) VALUES (?1, ?2, ?3)
                 ON CONFLICT(store_id) DO UPDATE SET
                    tokens_remaining = excluded.tokens_remaining,
                    subscription_plan = excluded.subscription_plan",
                params![
                    account.store_id.as_str(),
                    account.tokens_remaining,
                    account.subscription_plan.to_string()
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn try_deduct(&self, store_id: &StoreId, amount: u32) -> StoreResult<DeductOutcome> {
        let store_id = store_id.clone();
        self.with_conn(move |conn| {
            ensure_account(conn, &store_id)?;
            let changed = conn.execute(
                "UPDATE store_accounts SET tokens_remaining = tokens_remaining - ?1
                 WHERE store_id = ?2 AND tokens_remaining >= ?1",
                params![amount, store_id.as_str()],
            )?;
            let tokens_remaining = read_account(conn, &store_id)?.tokens_remaining;
            Ok(if changed == 1 {
                DeductOutcome::Applied { tokens_remaining }
            } else {
                DeductOutcome::Rejected { tokens_remaining }
            })
        })
        .await
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    async fn create_article(&self, article: NewArticle) -> StoreResult<ArticleRecord> {
        let record = ArticleRecord::create(article, Utc::now());
        self.with_conn(move |conn| {
            conn.execute(
                &format!("INSERT INTO articles ({ARTICLE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
                params![
                    record.id.to_string(),
                    record.store_id.as_str(),
                    record.title,
                    record.meta_description,
                    record.content,
                    record.image_url,
                    record.status.to_string(),
                    format_time(&record.created_at),
                    format_time(&record.updated_at),
                ],
            )?;
            Ok(record)
        })
        .await
    }

    async fn list_articles(&self, store_id: &StoreId) -> StoreResult<Vec<ArticleRecord>> {
        let store_id = store_id.clone();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ARTICLE_COLUMNS} FROM articles WHERE store_id = ?1 ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt
                .query_map(params![store_id.as_str()], read_article_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows.into_iter().map(into_record).collect()
        })
        .await
    }

    async fn update_status(&self, store_id: &StoreId, id: Uuid, status: PostStatus) -> StoreResult<ArticleRecord> {
        let store_id = store_id.clone();
        self.with_conn(move |conn| {
            let current = fetch_article(conn, &store_id, id)?.ok_or(StoreError::ArticleNotFound { id })?;
            if !current.status.can_transition_to(status) {
                return Err(StoreError::InvalidTransition { id, from: current.status, to: status });
            }
            conn.execute(
                "UPDATE articles SET status = ?1, updated_at = ?2 WHERE id = ?3 AND store_id = ?4",
                params![status.to_string(), format_time(&Utc::now()), id.to_string(), store_id.as_str()],
            )?;
            fetch_article(conn, &store_id, id)?.ok_or(StoreError::ArticleNotFound { id })
        })
        .await
    }
}
