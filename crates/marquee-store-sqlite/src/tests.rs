//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use marquee_core::store::{REVIEWS_KEY, StateStore, WATCHLIST_KEY};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Scalars ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_scalar_returns_none() {
  let s = store().await;
  assert!(s.get("username").await.unwrap().is_none());
}

#[tokio::test]
async fn set_scalar_overwrites() {
  let s = store().await;
  s.set("username", "ada").await.unwrap();
  s.set("username", "grace").await.unwrap();
  assert_eq!(s.get("username").await.unwrap().as_deref(), Some("grace"));
}

// ─── Sets ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_add_then_members_contains() {
  let s = store().await;
  s.set_add(WATCHLIST_KEY, "42").await.unwrap();
  assert!(s.set_members(WATCHLIST_KEY).await.unwrap().contains("42"));

  s.set_remove(WATCHLIST_KEY, "42").await.unwrap();
  assert!(!s.set_members(WATCHLIST_KEY).await.unwrap().contains("42"));
}

#[tokio::test]
async fn set_add_twice_keeps_one_member() {
  let s = store().await;
  s.set_add(WATCHLIST_KEY, "27205").await.unwrap();
  s.set_add(WATCHLIST_KEY, "27205").await.unwrap();
  assert_eq!(s.set_members(WATCHLIST_KEY).await.unwrap().len(), 1);
}

#[tokio::test]
async fn set_remove_absent_member_is_noop() {
  let s = store().await;
  s.set_add(WATCHLIST_KEY, "1").await.unwrap();
  s.set_add(WATCHLIST_KEY, "2").await.unwrap();
  s.set_remove(WATCHLIST_KEY, "3").await.unwrap();

  let expected: HashSet<String> = ["1", "2"].into_iter().map(String::from).collect();
  assert_eq!(s.set_members(WATCHLIST_KEY).await.unwrap(), expected);
}

#[tokio::test]
async fn sets_are_isolated_by_key() {
  let s = store().await;
  s.set_add("a", "1").await.unwrap();
  s.set_add("b", "2").await.unwrap();
  assert_eq!(s.set_members("a").await.unwrap().len(), 1);
  assert!(s.set_members("c").await.unwrap().is_empty());
}

// ─── Hashes ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn hash_set_last_write_wins() {
  let s = store().await;
  s.hash_set(REVIEWS_KEY, "155", "good").await.unwrap();
  s.hash_set(REVIEWS_KEY, "155", "great").await.unwrap();

  let all = s.hash_get_all(REVIEWS_KEY).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all["155"], "great");
}

#[tokio::test]
async fn hash_get_all_returns_every_field() {
  let s = store().await;
  s.hash_set(REVIEWS_KEY, "1", "one").await.unwrap();
  s.hash_set(REVIEWS_KEY, "2", "").await.unwrap();

  let all = s.hash_get_all(REVIEWS_KEY).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all["2"], "");
}

#[tokio::test]
async fn empty_hash_returns_empty_map() {
  let s = store().await;
  assert!(s.hash_get_all(REVIEWS_KEY).await.unwrap().is_empty());
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_file_keeps_data() {
  let path = std::env::temp_dir()
    .join(format!("marquee-store-test-{}.db", std::process::id()));
  let _ = std::fs::remove_file(&path);

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.set_add(WATCHLIST_KEY, "27205").await.unwrap();
    s.hash_set(REVIEWS_KEY, "27205", "again").await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert!(s.set_members(WATCHLIST_KEY).await.unwrap().contains("27205"));
  assert_eq!(s.hash_get_all(REVIEWS_KEY).await.unwrap()["27205"], "again");

  drop(s);
  let _ = std::fs::remove_file(&path);
}
