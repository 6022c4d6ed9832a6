//! roster-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the member procedures over HTTP.
//!
//! # Provisioning accounts
//!
//! Members must reference an existing account. To create one:
//!
//! ```
//! cargo run -p roster-server -- --add-account acct-1 --account-data '{"provider":"github"}'
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_core::member::NewAccount;
use roster_server::{expand_tilde, load_config};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster members directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Insert an account with this id into the store and exit.
  #[arg(long, value_name = "ID")]
  add_account: Option<String>,

  /// JSON object stored as the new account's attributes.
  #[arg(long, value_name = "JSON", requires = "add_account")]
  account_data: Option<String>,
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

  let server_cfg = load_config(&cli.config).context("failed to load configuration")?;
  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: provision an account and exit.
  if let Some(id) = cli.add_account {
    let attributes = match cli.account_data.as_deref() {
      Some(raw) => serde_json::from_str(raw).context("--account-data must be a JSON object")?,
      None => serde_json::Map::new(),
    };
    let account = store
      .add_account(NewAccount { id, attributes })
      .await
      .context("failed to add account")?;
    tracing::info!(id = %account.id, "account added");
    return Ok(());
  }

  let app = roster_server::app(Arc::new(store));
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(store = ?store_path, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
