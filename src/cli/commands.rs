//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::http_server::{route_paths, HttpServer};
use crate::observability::{init_logging, redact_connection_string};
use crate::store::PgStore;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config } => serve(config.as_deref()),
        Command::Routes => routes(),
    }
}

/// Load configuration, connect and serve the API.
///
/// A database that cannot be reached at startup, or a connection string that
/// is rejected, is logged and the server starts anyway; queries fail with a
/// 500 until the database becomes usable.
pub fn serve(config_path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    init_logging(&config.log_level, config.log_format)?;
    tracing::info!(
        profile = %AppConfig::profile_path(config_path).display(),
        "configuration loaded"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let store = open_store(&config.db_connection_string).await;
        let server = HttpServer::new(&config, Arc::new(store))?;
        server.start().await?;
        Ok::<(), CliError>(())
    })
}

/// Build the store and try the connection once; failures are only logged
pub async fn open_store(connection_string: &str) -> PgStore {
    tracing::info!(
        database = %redact_connection_string(connection_string),
        "connecting to database"
    );
    let store = PgStore::connect_lazy(connection_string);
    match store.ping().await {
        Ok(()) => tracing::info!("connected to database"),
        Err(err) => tracing::warn!(error = %err, "unable to connect to database"),
    }
    store
}

/// Print every registered route, one per line
pub fn routes() -> CliResult<()> {
    for path in route_paths() {
        println!("GET {}", path);
    }
    Ok(())
}
