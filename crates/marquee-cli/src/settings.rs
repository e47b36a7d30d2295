//! Runtime configuration, layered from an optional TOML file and
//! `MARQUEE__*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

pub const DEFAULT_TMDB_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
  #[serde(default)]
  pub tmdb:    TmdbSettings,
  #[serde(default)]
  pub store:   StoreSettings,
  /// Credentials written into the store at startup, if present.
  #[serde(default)]
  pub account: Option<AccountSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSettings {
  #[serde(default)]
  pub api_key:  String,
  #[serde(default = "default_tmdb_url")]
  pub base_url: String,
}

impl Default for TmdbSettings {
  fn default() -> Self {
    Self { api_key: String::new(), base_url: default_tmdb_url() }
  }
}

fn default_tmdb_url() -> String { DEFAULT_TMDB_URL.to_owned() }

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  #[default]
  Sqlite,
  Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
  #[serde(default)]
  pub backend: StoreBackend,
  #[serde(default = "default_store_path")]
  pub path:    PathBuf,
}

impl Default for StoreSettings {
  fn default() -> Self {
    Self { backend: StoreBackend::default(), path: default_store_path() }
  }
}

fn default_store_path() -> PathBuf { PathBuf::from("marquee.db") }

#[derive(Debug, Clone, Deserialize)]
pub struct AccountSettings {
  pub username: String,
  pub password: String,
}

impl Settings {
  /// Read `path` if it exists, then apply environment overrides such as
  /// `MARQUEE__TMDB__API_KEY`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("MARQUEE")
          .prefix_separator("__")
          .separator("__"),
      )
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

impl StoreSettings {
  /// The database path, with a leading `~` component resolved against `$HOME`.
  pub fn database_path(&self) -> PathBuf {
    under_home(&self.path, std::env::var_os("HOME").map(PathBuf::from))
  }
}

fn under_home(path: &Path, home: Option<PathBuf>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_owned(),
  }
}
