//! Larder - cafe inventory registry and stock-keeping console.
//!
//! A small client/server system for keeping track of what a cafe has on
//! the shelf. The registry server owns the durable product list behind a
//! JSON HTTP API; the console keeps a session-scoped snapshot of it and
//! pushes every mutation back through the API, so the snapshot never
//! drifts from storage.
//!
//! # Architecture
//!
//! All storage sits behind the [`store::ProductStore`] trait:
//!
//! - [`store::SqliteProductStore`] - durable backend the server runs on
//! - [`store::MemoryStore`] - in-memory backend for tests and ephemeral registries
//! - [`client::HttpRegistryClient`] - the same trait spoken over HTTP from the console
//!
//! # Modules
//!
//! - [`auth`] - Console login: credentials, sessions, the authenticator seam
//! - [`cli`] - Command-line definitions and handlers
//! - [`client`] - HTTP client for the registry API
//! - [`config`] - Configuration loading from TOML files
//! - [`db`] - Connection pooling and embedded migrations
//! - [`domain`] - Products, drafts, identifiers, validation
//! - [`error`] - Error types for the crate
//! - [`server`] - The registry HTTP server
//! - [`store`] - Storage trait and backends
//! - [`view`] - Session-scoped inventory snapshot for consoles
//!
//! # Example
//!
//! ```no_run
//! use larder::domain::ProductDraft;
//! use larder::store::{MemoryStore, ProductStore};
//! use rust_decimal_macros::dec;
//!
//! # async fn demo() -> larder::error::Result<()> {
//! let store = MemoryStore::new();
//! let draft = ProductDraft::try_new("Bread", None, None, dec!(2.50), 10)?;
//! let product = store.create(&draft).await?;
//! assert_eq!(product.quantity, 10);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod server;
pub mod store;
pub mod view;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
