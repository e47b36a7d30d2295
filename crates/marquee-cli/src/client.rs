//! Async HTTP client for TheMovieDb v3 JSON API.

use std::time::Duration;

use marquee_core::{
  catalog::Catalog,
  movie::{Movie, MovieDetail, MovieId},
};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("invalid TMDB base url {0:?}")]
  BaseUrl(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("GET {endpoint} → {status}")]
  Status {
    endpoint: String,
    status:   StatusCode,
  },
}

/// Connection settings for the TMDB API.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
  pub base_url: String,
  pub api_key:  String,
}

/// One page of `GET /search/movie`.
#[derive(Debug, Deserialize)]
struct SearchPage {
  #[serde(default)]
  results: Vec<Movie>,
}

/// Async HTTP client for TMDB.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct TmdbClient {
  client:  Client,
  base:    Url,
  api_key: String,
}

impl TmdbClient {
  pub fn new(config: TmdbConfig) -> Result<Self, ClientError> {
    let base = Url::parse(&config.base_url)
      .ok()
      .filter(|url| !url.cannot_be_a_base())
      .ok_or_else(|| ClientError::BaseUrl(config.base_url.clone()))?;
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, base, api_key: config.api_key })
  }

  /// Append `segments` to the base URL, percent-encoding each one.
  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  async fn get(
    &self,
    segments: &[&str],
    query: &[(&str, &str)],
  ) -> Result<reqwest::Response, ClientError> {
    let url = self.url(segments);
    tracing::debug!(path = url.path(), "tmdb request");
    Ok(
      self
        .client
        .get(url)
        .query(&[("api_key", self.api_key.as_str())])
        .query(query)
        .send()
        .await?,
    )
  }
}

impl Catalog for TmdbClient {
  type Error = ClientError;

  /// `GET /search/movie?query=<q>`, first page only.
  async fn search(&self, query: &str) -> Result<Vec<Movie>, ClientError> {
    let resp = self.get(&["search", "movie"], &[("query", query)]).await?;
    if !resp.status().is_success() {
      return Err(ClientError::Status {
        endpoint: "/search/movie".into(),
        status:   resp.status(),
      });
    }
    let page: SearchPage = resp.json().await?;
    Ok(page.results)
  }

  /// `GET /movie/<id>`
  async fn movie(&self, id: &MovieId) -> Result<Option<MovieDetail>, ClientError> {
    let resp = self.get(&["movie", id.as_str()], &[]).await?;
    match resp.status() {
      StatusCode::NOT_FOUND => Ok(None),
      status if status.is_success() => Ok(Some(resp.json().await?)),
      status => Err(ClientError::Status {
        endpoint: format!("/movie/{id}"),
        status,
      }),
    }
  }
}
