//! # Schemaport Core
//!
//! Core types, traits, and error handling for the Schemaport console.
//!
//! This crate provides the foundational building blocks shared by the
//! console logic, the HTTP client and the desktop UI:
//!
//! - **Types**: Source systems, schema documents, DDL artifacts, severities
//! - **Traits**: `Backend` (the server API) and `Validatable`
//! - **Errors**: Unified error handling with `ConsoleError` and `ConsoleResult`
//! - **Config**: `ConsoleConfig` loaded from TOML and the environment
//!

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{AiConfig, ConsoleConfig, NotificationConfig, ServerConfig, WindowConfig};
pub use error::{ConsoleError, ConsoleResult, ResultExt};
pub use traits::{Backend, Validatable};
pub use types::{
    ConnectOutcome, DbSystem, DdlArtifact, DdlRequest, SchemaDocument, Severity, Tab, TableRef,
    TargetNaming, DEFAULT_DDL_FILENAME,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
