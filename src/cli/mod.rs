//! Command-line interface definitions.

pub mod check;
pub mod console;
pub mod output;
pub mod products;
pub mod serve;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Larder - cafe inventory registry and stock-keeping console.
#[derive(Parser, Debug)]
#[command(name = "larder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the registry server (foreground)
    Serve(ServeArgs),

    /// Open the interactive stock-keeping console
    Console(ConsoleArgs),

    /// One-shot product operations against a running registry
    #[command(subcommand)]
    Products(ProductsCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `larder products`
#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List products in the registry
    List(ListArgs),
    /// Add a product to the registry
    Add(AddArgs),
}

/// Subcommands for `larder check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config(ConfigPathArg),
    /// Test connection to the registry API
    Connection(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the listen address (host:port)
    #[arg(long)]
    pub listen: Option<String>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for the `console` subcommand.
#[derive(Parser, Debug)]
pub struct ConsoleArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the registry API URL
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Arguments for `products list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the registry API URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Only show products at or below the low-stock threshold
    #[arg(long)]
    pub low_stock: bool,
}

/// Arguments for `products add`.
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override the registry API URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Product name
    #[arg(long)]
    pub name: String,

    /// Free-form description
    #[arg(long)]
    pub description: Option<String>,

    /// Category label
    #[arg(long)]
    pub category: Option<String>,

    /// Unit price (decimal, e.g. 2.50)
    #[arg(long)]
    pub price: Decimal,

    /// Initial units on hand
    #[arg(long)]
    pub quantity: u32,
}
