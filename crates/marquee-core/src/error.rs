//! Error types for `marquee-core`.

use thiserror::Error;

use crate::movie::MovieId;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("incorrect username or password")]
  AuthenticationFailure,

  #[error("movie not found: {0}")]
  NotFound(MovieId),

  #[error("state store unavailable: {0}")]
  StoreUnavailable(#[source] BoxError),

  #[error("catalog request failed: {0}")]
  Catalog(#[source] BoxError),

  #[error("invalid menu selection: {0:?}")]
  InvalidMenuSelection(String),

  #[error("password hashing failed: {0}")]
  PasswordHash(String),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::StoreUnavailable(Box::new(e))
  }

  pub(crate) fn catalog(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Catalog(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
