//! [`SqliteStore`], the SQLite implementation of [`StateStore`].

use std::{
  collections::{HashMap, HashSet},
  path::Path,
};

use rusqlite::OptionalExtension as _;

use marquee_core::store::StateStore;

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Marquee state store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema ready");
    Ok(())
  }

  /// Run a single write statement with owned parameters.
  async fn execute<const N: usize>(
    &self,
    sql: &'static str,
    params: [String; N],
  ) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(sql, rusqlite::params_from_iter(params.iter()))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── StateStore impl ─────────────────────────────────────────────────────────

impl StateStore for SqliteStore {
  type Error = Error;

  // ── Scalars ───────────────────────────────────────────────────────────────

  async fn get(&self, key: &str) -> Result<Option<String>> {
    let key = key.to_owned();
    let value = self
      .conn
      .call(move |conn| {
        let value: Option<String> = conn
          .query_row(
            "SELECT value FROM scalars WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
          )
          .optional()?;
        Ok(value)
      })
      .await?;
    Ok(value)
  }

  async fn set(&self, key: &str, value: &str) -> Result<()> {
    self
      .execute(
        "INSERT INTO scalars (key, value) VALUES (?1, ?2)
         ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        [key.to_owned(), value.to_owned()],
      )
      .await
  }

  // ── Sets ──────────────────────────────────────────────────────────────────

  async fn set_add(&self, key: &str, member: &str) -> Result<()> {
    self
      .execute(
        "INSERT OR IGNORE INTO set_members (key, member) VALUES (?1, ?2)",
        [key.to_owned(), member.to_owned()],
      )
      .await
  }

  async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
    self
      .execute(
        "DELETE FROM set_members WHERE key = ?1 AND member = ?2",
        [key.to_owned(), member.to_owned()],
      )
      .await
  }

  async fn set_members(&self, key: &str) -> Result<HashSet<String>> {
    let key = key.to_owned();
    let members = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT member FROM set_members WHERE key = ?1")?;
        let members = stmt
          .query_map(rusqlite::params![key], |row| row.get(0))?
          .collect::<rusqlite::Result<HashSet<String>>>()?;
        Ok(members)
      })
      .await?;
    Ok(members)
  }

  // ── Hashes ────────────────────────────────────────────────────────────────

  async fn hash_set(&self, key: &str, field: &str, value: &str) -> Result<()> {
    self
      .execute(
        "INSERT INTO hash_fields (key, field, value) VALUES (?1, ?2, ?3)
         ON CONFLICT (key, field) DO UPDATE SET value = excluded.value",
        [key.to_owned(), field.to_owned(), value.to_owned()],
      )
      .await
  }

  async fn hash_get_all(&self, key: &str) -> Result<HashMap<String, String>> {
    let key = key.to_owned();
    let fields = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare("SELECT field, value FROM hash_fields WHERE key = ?1")?;
        let fields = stmt
          .query_map(rusqlite::params![key], |row| {
            Ok((row.get(0)?, row.get(1)?))
          })?
          .collect::<rusqlite::Result<HashMap<String, String>>>()?;
        Ok(fields)
      })
      .await?;
    Ok(fields)
  }
}
