//! Movie types: what the catalog hands back and what the watchlist renders.
//!
//! A [`Movie`] is fetched fresh for every menu operation and never mutated.
//! Attaching a review produces a new [`MovieRecord`] that wraps the base
//! record instead of editing it.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque catalog identifier, stored as a string in the state store.
///
/// TMDB sends ids as JSON numbers; both numbers and strings deserialise.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "RawMovieId")]
pub struct MovieId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMovieId {
  Number(u64),
  Text(String),
}

impl From<RawMovieId> for MovieId {
  fn from(raw: RawMovieId) -> Self {
    match raw {
      RawMovieId::Number(n) => Self(n.to_string()),
      RawMovieId::Text(s) => Self::new(s),
    }
  }
}

impl MovieId {
  /// Surrounding whitespace is dropped so typed ids match stored ones.
  pub fn new(id: impl Into<String>) -> Self { Self(id.into().trim().to_owned()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for MovieId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for MovieId {
  fn from(s: &str) -> Self { Self::new(s) }
}

impl From<u64> for MovieId {
  fn from(n: u64) -> Self { Self(n.to_string()) }
}

// ─── Catalog payloads ────────────────────────────────────────────────────────

/// A search hit: the three fields every table row shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
  pub id:           MovieId,
  pub title:        String,
  /// Catalog-supplied display string; never parsed. Absent or null is empty.
  #[serde(default, deserialize_with = "null_as_empty")]
  pub release_date: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
  Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Full detail for one movie, as returned by a lookup by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
  #[serde(flatten)]
  pub movie:    Movie,
  #[serde(default)]
  pub overview: Option<String>,
  #[serde(default)]
  pub tagline:  Option<String>,
  /// Running time in minutes.
  #[serde(default)]
  pub runtime:  Option<u32>,
}

// ─── MovieRecord ─────────────────────────────────────────────────────────────

/// A renderable row. Reviews are attached by wrapping, never by mutation.
#[derive(Debug, Clone)]
pub enum MovieRecord {
  Base(Movie),
  Reviewed {
    base:   Box<MovieRecord>,
    review: String,
  },
}

impl MovieRecord {
  /// Wrap this record with review text.
  pub fn with_review(self, review: impl Into<String>) -> Self {
    Self::Reviewed { base: Box::new(self), review: review.into() }
  }

  /// The underlying catalog movie.
  pub fn movie(&self) -> &Movie {
    match self {
      Self::Base(movie) => movie,
      Self::Reviewed { base, .. } => base.movie(),
    }
  }

  pub fn id(&self) -> &MovieId { &self.movie().id }

  /// The outermost attached review, if any.
  pub fn review(&self) -> Option<&str> {
    match self {
      Self::Base(_) => None,
      Self::Reviewed { review, .. } => Some(review),
    }
  }

  /// Table cells for this record, one per column.
  pub fn row(&self) -> Vec<String> {
    match self {
      Self::Base(movie) => vec![
        movie.id.to_string(),
        movie.title.clone(),
        movie.release_date.clone(),
      ],
      Self::Reviewed { base, review } => {
        let mut cells = base.row();
        cells.push(review.clone());
        cells
      }
    }
  }
}

impl PartialEq for MovieRecord {
  fn eq(&self, other: &Self) -> bool { self.id() == other.id() }
}

impl Eq for MovieRecord {}

impl From<Movie> for MovieRecord {
  fn from(movie: Movie) -> Self { Self::Base(movie) }
}

impl From<MovieDetail> for MovieRecord {
  fn from(detail: MovieDetail) -> Self { Self::Base(detail.movie) }
}
