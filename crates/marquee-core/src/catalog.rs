//! The `Catalog` trait: read-only access to a remote movie database.
//!
//! Implemented by `marquee-cli`'s TMDB client; tests use scripted fakes.

use std::future::Future;

use crate::movie::{Movie, MovieDetail, MovieId};

pub trait Catalog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Free-text search. Results keep the catalog's own order.
  fn search<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Movie>, Self::Error>> + Send + 'a;

  /// Full detail for `id`. Returns `None` if the catalog does not know it.
  fn movie<'a>(
    &'a self,
    id: &'a MovieId,
  ) -> impl Future<Output = Result<Option<MovieDetail>, Self::Error>> + Send + 'a;
}
