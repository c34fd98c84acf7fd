//! lexis-server binary.
//!
//! Reads `lexis.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the JSON API over HTTP until interrupted.
//!
//! # Inspecting a value
//!
//! To print the property bundle for a string without starting the server:
//!
//! ```
//! cargo run -p lexis-server -- --analyze "A man a plan a canal Panama"
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use lexis_server::{app, load_config};
use lexis_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Lexis string analysis server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lexis.toml")]
  config: PathBuf,

  /// Print the computed properties of VALUE as JSON and exit.
  #[arg(long, value_name = "VALUE")]
  analyze: Option<String>,
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

  // Helper mode: analyze a value and exit.
  if let Some(value) = cli.analyze {
    let bundle = lexis_core::analyze(&value);
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    return Ok(());
  }

  let server_cfg =
    load_config(&cli.config).context("failed to load configuration")?;
  let store_path = server_cfg.resolved_store_path();

  let store = Arc::new(
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  );

  let address = server_cfg.address();
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(store.clone()))
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("shutting down");
  match Arc::into_inner(store) {
    Some(store) => store.close().await.context("failed to close store")?,
    None => tracing::warn!("store still shared at shutdown; skipping close"),
  }

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to install Ctrl-C handler");
    std::future::pending::<()>().await;
  }
}
