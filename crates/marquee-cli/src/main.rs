//! `marquee`: terminal movie watchlist and reviews backed by TMDB.
//!
//! # Usage
//!
//! ```
//! marquee --config ~/.config/marquee/marquee.toml
//! marquee --set-credentials ada      # then type the password
//! MARQUEE__TMDB__API_KEY=... marquee
//! ```

mod app;
mod client;
mod console;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result, bail};
use app::App;
use clap::Parser;
use client::{TmdbClient, TmdbConfig};
use console::Console;
use marquee_core::{
  Manager, MemoryStore, SessionLog,
  credentials::hash_password,
  store::{PASSWORD_KEY, StateStore, USERNAME_KEY},
};
use marquee_store_sqlite::SqliteStore;
use settings::{Settings, StoreBackend};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "marquee", version, about = "Terminal movie watchlist and reviews")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "marquee.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,

  /// Store USERNAME and a password entered on stdin as the account, then
  /// exit.
  #[arg(long, value_name = "USERNAME")]
  set_credentials: Option<String>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Diagnostics go to stderr; stdout belongs to the menus.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password()?;
    println!("{}", hash_password(&password)?);
    return Ok(());
  }

  let settings = Settings::load(&cli.config)?;

  match settings.store.backend {
    StoreBackend::Sqlite => {
      let path = settings.store.database_path();
      let store = SqliteStore::open(&path)
        .await
        .with_context(|| format!("failed to open store at {path:?}"))?;
      tracing::info!(?path, "opened sqlite store");
      start(store, &cli, &settings).await
    }
    StoreBackend::Memory => {
      tracing::info!("using in-memory store");
      start(MemoryStore::new(), &cli, &settings).await
    }
  }
}

async fn start<S: StateStore>(store: S, cli: &Cli, settings: &Settings) -> Result<()> {
  if let Some(username) = &cli.set_credentials {
    let password = read_password()?;
    store_credentials(&store, username, &password).await?;
    println!("Stored credentials for {username}");
    return Ok(());
  }

  if let Some(account) = &settings.account {
    store_credentials(&store, &account.username, &account.password).await?;
  }

  if settings.tmdb.api_key.is_empty() {
    bail!("no TMDB API key configured; set tmdb.api_key or MARQUEE__TMDB__API_KEY");
  }
  let catalog = TmdbClient::new(TmdbConfig {
    base_url: settings.tmdb.base_url.clone(),
    api_key:  settings.tmdb.api_key.clone(),
  })
  .context("failed to build TMDB client")?;

  let mut log = SessionLog::new();
  let console = Console::new(io::stdin().lock(), io::stdout());
  let mut app = App::new(Manager::new(store, catalog), console, &mut log);
  app.run().await
}

async fn store_credentials<S: StateStore>(
  store: &S,
  username: &str,
  password: &str,
) -> Result<()> {
  let hash = hash_password(password)?;
  store
    .set(USERNAME_KEY, username)
    .await
    .context("failed to store username")?;
  store
    .set(PASSWORD_KEY, &hash)
    .await
    .context("failed to store password")?;
  Ok(())
}

/// The password for the helper modes, read as one line of stdin.
fn read_password() -> Result<String> {
  let mut console = Console::new(io::stdin().lock(), io::stdout());
  match console.prompt("Password: ")? {
    Some(password) => Ok(password),
    None => bail!("no password given on stdin"),
  }
}
