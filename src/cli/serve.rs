//! Handler for the `serve` command.

use tokio::signal;
use tracing::info;

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::db;
use crate::error::Result;
use crate::server;
use crate::store::SqliteProductStore;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;

    // Apply CLI overrides
    if let Some(ref listen) = args.listen {
        config.server.listen_addr = listen.clone();
    }
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }

    config.validate()?;
    config.init_logging();

    info!(database = %config.server.database_url, "opening registry database");
    let pool = db::create_pool(&config.server.database_url)?;
    db::run_migrations(&pool)?;

    let server = server::start(SqliteProductStore::new(pool), &config.server.listen_addr)?;

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            shutdown.shutdown();
        }
    });

    server.wait().await?;

    info!("registry stopped");
    Ok(())
}
