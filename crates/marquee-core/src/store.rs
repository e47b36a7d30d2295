//! The `StateStore` trait and the keys the watchlist lives under.
//!
//! A state store is a small key-value service offering scalar, set and hash
//! collections. The trait is implemented by `MemoryStore` in this crate and by
//! `marquee-store-sqlite`; higher layers depend only on the abstraction.

use std::{
  collections::{HashMap, HashSet},
  future::Future,
};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Scalar holding the single account's username.
pub const USERNAME_KEY: &str = "username";
/// Scalar holding the account's password (argon2 PHC string or plaintext).
pub const PASSWORD_KEY: &str = "password";
/// Set of watchlisted movie ids.
pub const WATCHLIST_KEY: &str = "watchlist";
/// Hash of movie id to review text.
pub const REVIEWS_KEY: &str = "reviews";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a key-value state store backend.
///
/// Set and hash enumeration order is unspecified; callers must not rely on
/// insertion order.
pub trait StateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Scalars ───────────────────────────────────────────────────────────

  /// Read a scalar. Returns `None` if the key is absent.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Write a scalar, replacing any previous value.
  fn set<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Sets ──────────────────────────────────────────────────────────────

  /// Add `member` to the set at `key`. Adding an existing member is a no-op.
  fn set_add<'a>(
    &'a self,
    key: &'a str,
    member: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove `member` from the set at `key`. Removing an absent member is a
  /// no-op.
  fn set_remove<'a>(
    &'a self,
    key: &'a str,
    member: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All members of the set at `key`; empty if the key is absent.
  fn set_members<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<HashSet<String>, Self::Error>> + Send + 'a;

  // ── Hashes ────────────────────────────────────────────────────────────

  /// Set `field` in the hash at `key`, overwriting any previous value.
  fn hash_set<'a>(
    &'a self,
    key: &'a str,
    field: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Every field/value pair in the hash at `key`; empty if absent.
  fn hash_get_all<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<HashMap<String, String>, Self::Error>> + Send + 'a;
}
