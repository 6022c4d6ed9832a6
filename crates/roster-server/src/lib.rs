//! HTTP server assembly for Roster.
//!
//! Mounts the procedure API under `/trpc` and wraps it in request tracing.
//! The binary in `main.rs` adds configuration, logging and the listener.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use roster_core::store::MemberStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Layer defaults, the optional file at `path`, then the environment.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000)?
    .set_default("store_path", "roster.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()?
    .try_deserialize()
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store`.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: MemberStore + 'static,
{
  Router::new()
    .nest("/trpc", roster_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
