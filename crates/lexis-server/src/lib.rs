//! Configuration and application assembly for the Lexis server binary.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use lexis_core::store::StringStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `lexis.toml` and
/// `LEXIS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

/// Load configuration from `path` (optional) layered under the environment.
pub fn load_config(path: &Path) -> Result<ServerConfig, config::ConfigError> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8000)?
    .set_default("store_path", "strings.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("LEXIS"))
    .build()?
    .try_deserialize()
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
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

// ─── Application ──────────────────────────────────────────────────────────────

/// The API router wrapped in a per-request tracing layer.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: StringStore + 'static,
{
  lexis_api::router(store).layer(TraceLayer::new_for_http())
}
