//! parish server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, and serves the member directory API over HTTP.
//!
//! # Password hash generation
//!
//! To print the argon2 PHC string for seeding a user row by hand:
//!
//! ```
//! cargo run -p parish-server --bin server -- --hash-password
//! ```

mod auth;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use parish_api::{AppState, api_router};
use parish_core::{
  auth::PasswordHasher as _,
  media::{LocalMediaStorage, StorageBackend},
};
use parish_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use auth::{Argon2Hasher, JwtIssuer};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `PARISH_`-prefixed environment overrides.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:                 String,
  #[serde(default = "default_port")]
  port:                 u16,
  store_path:           PathBuf,
  media_path:           PathBuf,
  /// HS256 signing secret for bearer tokens.
  secret_key:           String,
  #[serde(default = "default_token_expiry")]
  token_expiry_minutes: u64,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8000 }
fn default_token_expiry() -> u64 { 60 }

// ─── CLI ─────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Parish member directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_password_from_stdin()?;
    let hash = Argon2Hasher
      .hash(&password)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PARISH"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);
  let media_path = expand_tilde(&server_cfg.media_path);

  // Open SQLite store and media storage.
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let storage = LocalMediaStorage::new(&media_path)
    .with_context(|| format!("failed to open media dir at {media_path:?}"))?;

  // Build application state.
  let state = AppState::new(
    Arc::new(store),
    Arc::new(Argon2Hasher),
    Arc::new(JwtIssuer::new(
      server_cfg.secret_key.clone(),
      server_cfg.token_expiry_minutes * 60,
    )),
    Arc::new(storage),
    StorageBackend::Local,
  );

  let app = axum::Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Read a password from stdin.
fn read_password_from_stdin() -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("Password: ");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
