//! [`MemoryStore`], a process-local [`StateStore`].
//!
//! Nothing survives the process. Used by tests and by the `memory` store
//! backend for throwaway sessions.

use std::{
  collections::{HashMap, HashSet},
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::store::StateStore;

#[derive(Debug, Default)]
struct Collections {
  scalars: HashMap<String, String>,
  sets:    HashMap<String, HashSet<String>>,
  hashes:  HashMap<String, HashMap<String, String>>,
}

/// An in-memory state store. All operations are infallible.
#[derive(Debug, Default)]
pub struct MemoryStore {
  inner: Mutex<Collections>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, Collections> {
    // No operation can leave the maps half-written, so a poisoned lock is
    // still consistent.
    self.inner.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl StateStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.lock().scalars.get(key).cloned())
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), Infallible> {
    self.lock().scalars.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  async fn set_add(&self, key: &str, member: &str) -> Result<(), Infallible> {
    self
      .lock()
      .sets
      .entry(key.to_owned())
      .or_default()
      .insert(member.to_owned());
    Ok(())
  }

  async fn set_remove(&self, key: &str, member: &str) -> Result<(), Infallible> {
    let mut collections = self.lock();
    if let Some(set) = collections.sets.get_mut(key) {
      set.remove(member);
      if set.is_empty() {
        collections.sets.remove(key);
      }
    }
    Ok(())
  }

  async fn set_members(&self, key: &str) -> Result<HashSet<String>, Infallible> {
    Ok(self.lock().sets.get(key).cloned().unwrap_or_default())
  }

  async fn hash_set(
    &self,
    key: &str,
    field: &str,
    value: &str,
  ) -> Result<(), Infallible> {
    self
      .lock()
      .hashes
      .entry(key.to_owned())
      .or_default()
      .insert(field.to_owned(), value.to_owned());
    Ok(())
  }

  async fn hash_get_all(
    &self,
    key: &str,
  ) -> Result<HashMap<String, String>, Infallible> {
    Ok(self.lock().hashes.get(key).cloned().unwrap_or_default())
  }
}
