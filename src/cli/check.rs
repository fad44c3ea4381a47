//! Configuration and connection validation commands.

use std::path::Path;

use crate::cli::output;
use crate::config::Config;
use crate::domain::Product;
use crate::error::Result;

/// Validate the configuration file without starting anything.
pub fn config<P: AsRef<Path>>(config_path: P) {
    let path = config_path.as_ref();
    output::note(&format!("Checking configuration: {}", path.display()));

    if !path.exists() {
        output::error(&format!(
            "Configuration file not found: {}",
            path.display()
        ));
        output::hint("create one by copying the example: cp config.toml.example config.toml");
        std::process::exit(1);
    }

    let config = match Config::load(path) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Configuration error: {e}"));
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        output::error(&format!("Configuration error: {e}"));
        std::process::exit(1);
    }

    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Listen", &config.server.listen_addr);
    output::field("Database", &config.server.database_url);
    output::field("API URL", &config.client.api_url);
    output::field("Low stock", config.inventory.low_stock_threshold);
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Console login");
    output::field("Username", &config.auth.username);
    if std::env::var("LARDER_PASSWORD").is_ok() {
        output::success("Password found (from LARDER_PASSWORD env var)");
    } else {
        output::warning("Password comes from the config file");
        output::hint("set LARDER_PASSWORD to keep it out of checked-in files");
    }

    output::note("Configuration is ready to use.");
}

/// Test connection to the registry API.
pub async fn connection<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = Config::load(config_path)?;
    let api_url = config.client.api_url.trim_end_matches('/');

    output::note(&format!("Testing registry at {api_url}"));

    let client = reqwest::Client::new();
    match client.get(format!("{api_url}/products")).send().await {
        Ok(response) if response.status().is_success() => {
            output::success("Registry API reachable");
            if let Ok(products) = response.json::<Vec<Product>>().await {
                output::field("Products", products.len());
            }
        }
        Ok(response) => {
            output::error(&format!("Registry answered HTTP {}", response.status()));
            std::process::exit(1);
        }
        Err(e) => {
            output::error(&format!("Connection failed: {e}"));
            output::hint(&format!(
                "is the registry running? start it with {}",
                output::highlight("larder serve")
            ));
            std::process::exit(1);
        }
    }

    output::note("Connection test passed.");
    Ok(())
}
