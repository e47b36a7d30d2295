//! [`Manager`] mediates between the catalog and the state store.
//!
//! The manager keeps no local copy of the watchlist or reviews. Every read
//! goes back to the store, and every listed movie is looked up in the catalog
//! at render time. A stored id the catalog no longer knows still gets a row,
//! so it stays visible and removable.

use tracing::{debug, instrument, warn};

use crate::{
  Error, Result,
  catalog::Catalog,
  credentials::verify_password,
  movie::{Movie, MovieDetail, MovieId, MovieRecord},
  store::{PASSWORD_KEY, REVIEWS_KEY, StateStore, USERNAME_KEY, WATCHLIST_KEY},
};

/// Records for a stored collection, in store enumeration order.
#[derive(Debug, Default)]
pub struct Listing {
  pub records: Vec<MovieRecord>,
  /// Ids the catalog returned nothing for; each has a blank placeholder row
  /// in `records`.
  pub missing: Vec<MovieId>,
}

pub struct Manager<S, C> {
  store:   S,
  catalog: C,
}

impl<S: StateStore, C: Catalog> Manager<S, C> {
  pub fn new(store: S, catalog: C) -> Self { Self { store, catalog } }

  pub fn store(&self) -> &S { &self.store }

  // ── Session ───────────────────────────────────────────────────────────────

  /// Check a login attempt against the stored credential pair.
  ///
  /// A store with no credentials rejects every attempt.
  #[instrument(skip(self, password))]
  pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
    let stored_user = self.store.get(USERNAME_KEY).await.map_err(Error::store)?;
    let stored_pass = self.store.get(PASSWORD_KEY).await.map_err(Error::store)?;

    match (stored_user, stored_pass) {
      (Some(user), Some(pass))
        if user == username && verify_password(password, &pass) =>
      {
        Ok(())
      }
      _ => Err(Error::AuthenticationFailure),
    }
  }

  // ── Catalog ───────────────────────────────────────────────────────────────

  /// Search the catalog, keeping its result order.
  pub async fn search(&self, query: &str) -> Result<Vec<MovieRecord>> {
    let hits = self.catalog.search(query).await.map_err(Error::catalog)?;
    debug!(query, hits = hits.len(), "catalog search");
    Ok(hits.into_iter().map(MovieRecord::from).collect())
  }

  /// Full detail for `id`, or [`Error::NotFound`].
  pub async fn movie(&self, id: &MovieId) -> Result<MovieDetail> {
    self
      .catalog
      .movie(id)
      .await
      .map_err(Error::catalog)?
      .ok_or_else(|| Error::NotFound(id.clone()))
  }

  // ── Watchlist ─────────────────────────────────────────────────────────────

  /// Add `id` to the watchlist. Not checked against the catalog.
  pub async fn add_to_watchlist(&self, id: &MovieId) -> Result<()> {
    self
      .store
      .set_add(WATCHLIST_KEY, id.as_str())
      .await
      .map_err(Error::store)
  }

  pub async fn remove_from_watchlist(&self, id: &MovieId) -> Result<()> {
    self
      .store
      .set_remove(WATCHLIST_KEY, id.as_str())
      .await
      .map_err(Error::store)
  }

  /// A record for every watchlisted id.
  pub async fn watchlist(&self) -> Result<Listing> {
    let ids = self
      .store
      .set_members(WATCHLIST_KEY)
      .await
      .map_err(Error::store)?;
    debug!(count = ids.len(), "fetched watchlist");

    let mut listing = Listing::default();
    for id in ids {
      let record = self.stored_record(MovieId::new(id), &mut listing).await?;
      listing.records.push(record);
    }
    Ok(listing)
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  /// Store `review` for `id`, replacing any earlier review.
  pub async fn write_review(&self, id: &MovieId, review: &str) -> Result<()> {
    self
      .store
      .hash_set(REVIEWS_KEY, id.as_str(), review)
      .await
      .map_err(Error::store)
  }

  /// A reviewed record for every stored review.
  pub async fn reviews(&self) -> Result<Listing> {
    let reviews = self
      .store
      .hash_get_all(REVIEWS_KEY)
      .await
      .map_err(Error::store)?;
    debug!(count = reviews.len(), "fetched reviews");

    let mut listing = Listing::default();
    for (id, review) in reviews {
      let record = self.stored_record(MovieId::new(id), &mut listing).await?;
      listing.records.push(record.with_review(review));
    }
    Ok(listing)
  }

  /// Catalog lookup for an id read back from the store. Unknown ids become a
  /// placeholder and are noted in `listing.missing`.
  async fn stored_record(
    &self,
    id: MovieId,
    listing: &mut Listing,
  ) -> Result<MovieRecord> {
    match self.catalog.movie(&id).await.map_err(Error::catalog)? {
      Some(detail) => Ok(MovieRecord::from(detail)),
      None => {
        warn!(%id, "stored id unknown to catalog");
        listing.missing.push(id.clone());
        Ok(MovieRecord::Base(Movie {
          id,
          title: String::new(),
          release_date: String::new(),
        }))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{collections::HashMap, convert::Infallible};

  use super::*;
  use crate::{
    credentials::hash_password,
    memory::MemoryStore,
    movie::{Movie, MovieDetail},
  };

  /// A catalog with a fixed set of movies; search matches on title.
  struct FakeCatalog {
    movies: Vec<Movie>,
  }

  impl FakeCatalog {
    fn new() -> Self {
      let movie = |id: u64, title: &str, date: &str| Movie {
        id:           MovieId::from(id),
        title:        title.into(),
        release_date: date.into(),
      };
      Self {
        movies: vec![
          movie(27205, "Inception", "2010-07-15"),
          movie(157336, "Interstellar", "2014-11-05"),
          movie(155, "The Dark Knight", "2008-07-16"),
        ],
      }
    }
  }

  impl Catalog for FakeCatalog {
    type Error = Infallible;

    async fn search(&self, query: &str) -> Result<Vec<Movie>, Infallible> {
      Ok(
        self
          .movies
          .iter()
          .filter(|m| m.title.contains(query))
          .cloned()
          .collect(),
      )
    }

    async fn movie(&self, id: &MovieId) -> Result<Option<MovieDetail>, Infallible> {
      Ok(self.movies.iter().find(|m| &m.id == id).map(|m| MovieDetail {
        movie:    m.clone(),
        overview: None,
        tagline:  None,
        runtime:  None,
      }))
    }
  }

  fn manager() -> Manager<MemoryStore, FakeCatalog> {
    Manager::new(MemoryStore::new(), FakeCatalog::new())
  }

  #[tokio::test]
  async fn adding_twice_keeps_one_entry() {
    let m = manager();
    let id = MovieId::from(27205);
    m.add_to_watchlist(&id).await.unwrap();
    m.add_to_watchlist(&id).await.unwrap();

    let members = m.store().set_members(WATCHLIST_KEY).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(m.watchlist().await.unwrap().records.len(), 1);
  }

  #[tokio::test]
  async fn removing_absent_id_leaves_watchlist_unchanged() {
    let m = manager();
    m.add_to_watchlist(&MovieId::from(155)).await.unwrap();
    let before = m.store().set_members(WATCHLIST_KEY).await.unwrap();

    m.remove_from_watchlist(&MovieId::from(27205)).await.unwrap();
    let after = m.store().set_members(WATCHLIST_KEY).await.unwrap();
    assert_eq!(before, after);
  }

  #[tokio::test]
  async fn remove_after_add_drops_member() {
    let m = manager();
    let id = MovieId::from("42");
    m.add_to_watchlist(&id).await.unwrap();
    assert!(m.store().set_members(WATCHLIST_KEY).await.unwrap().contains("42"));

    m.remove_from_watchlist(&id).await.unwrap();
    assert!(!m.store().set_members(WATCHLIST_KEY).await.unwrap().contains("42"));
  }

  #[tokio::test]
  async fn second_review_wins() {
    let m = manager();
    let id = MovieId::from(155);
    m.write_review(&id, "good").await.unwrap();
    m.write_review(&id, "great").await.unwrap();

    let stored = m.store().hash_get_all(REVIEWS_KEY).await.unwrap();
    assert_eq!(stored, HashMap::from([("155".to_owned(), "great".to_owned())]));
  }

  #[tokio::test]
  async fn reviews_match_catalog_and_stored_text() {
    let m = manager();
    m.write_review(&MovieId::from(27205), "Layered.").await.unwrap();
    m.write_review(&MovieId::from(157336), "").await.unwrap();

    let mut records = m.reviews().await.unwrap().records;
    records.sort_by(|a, b| a.id().cmp(b.id()));
    assert_eq!(records.len(), 2);

    let inception = records
      .iter()
      .find(|r| r.id().as_str() == "27205")
      .unwrap();
    assert_eq!(inception.row(), vec![
      "27205",
      "Inception",
      "2010-07-15",
      "Layered."
    ]);
    let interstellar = records
      .iter()
      .find(|r| r.id().as_str() == "157336")
      .unwrap();
    assert_eq!(interstellar.review(), Some(""));
  }

  #[tokio::test]
  async fn unknown_id_is_not_found() {
    let m = manager();
    let err = m.movie(&MovieId::from(1)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(id) if id.as_str() == "1"));
  }

  #[tokio::test]
  async fn watchlist_keeps_a_row_for_unknown_id() {
    let m = manager();
    m.add_to_watchlist(&MovieId::from(155)).await.unwrap();
    m.add_to_watchlist(&MovieId::from(999)).await.unwrap();

    let listing = m.watchlist().await.unwrap();
    assert_eq!(listing.records.len(), 2);
    assert_eq!(listing.missing, vec![MovieId::from(999)]);

    let placeholder = listing
      .records
      .iter()
      .find(|r| r.id().as_str() == "999")
      .unwrap();
    assert_eq!(placeholder.row(), vec!["999", "", ""]);
  }

  #[tokio::test]
  async fn reviews_keep_a_row_for_unknown_id() {
    let m = manager();
    m.write_review(&MovieId::from(999), "Lost film.").await.unwrap();

    let listing = m.reviews().await.unwrap();
    assert_eq!(listing.missing, vec![MovieId::from(999)]);
    assert_eq!(listing.records[0].row(), vec!["999", "", "", "Lost film."]);
  }

  #[tokio::test]
  async fn search_keeps_catalog_order() {
    let m = manager();
    let ids: Vec<_> = m
      .search("In")
      .await
      .unwrap()
      .iter()
      .map(|r| r.id().to_string())
      .collect();
    assert_eq!(ids, vec!["27205", "157336"]);
  }

  #[tokio::test]
  async fn authenticate_against_hashed_password() {
    let m = manager();
    m.store().set(USERNAME_KEY, "ada").await.unwrap();
    m.store()
      .set(PASSWORD_KEY, &hash_password("lovelace").unwrap())
      .await
      .unwrap();

    assert!(m.authenticate("ada", "lovelace").await.is_ok());
    assert!(matches!(
      m.authenticate("ada", "babbage").await,
      Err(Error::AuthenticationFailure)
    ));
    assert!(matches!(
      m.authenticate("charles", "lovelace").await,
      Err(Error::AuthenticationFailure)
    ));
  }

  #[tokio::test]
  async fn authenticate_without_stored_credentials_fails() {
    let m = manager();
    assert!(matches!(
      m.authenticate("", "").await,
      Err(Error::AuthenticationFailure)
    ));
  }
}
