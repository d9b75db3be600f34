//! Core traits for Schemaport
//!
//! `Backend` is the seam between the console's interaction layer and the
//! server it talks to. The console only ever sees typed results; how the
//! requests travel is up to the implementation.

use async_trait::async_trait;

use crate::error::ConsoleResult;
use crate::types::{ConnectOutcome, DbSystem, DdlRequest, SchemaDocument, TableRef};

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated before they are sent anywhere
///
/// # Example
///
/// ```rust,ignore
/// use schemaport_core::{Validatable, ConsoleResult, ConsoleError};
///
/// struct Target {
///     dataset: String,
/// }
///
/// impl Validatable for Target {
///     fn validate(&self) -> ConsoleResult<()> {
///         if self.dataset.is_empty() {
///             return Err(ConsoleError::validation("Dataset is required"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    fn validate(&self) -> ConsoleResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// The server-side API consumed by the console
///
/// Listing methods return plain name lists regardless of the envelope the
/// server used. Methods that expect a specific payload key return
/// [`ConsoleError::MissingField`](crate::ConsoleError::MissingField) when it is absent.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Names of the AI models available for augmentation
    async fn list_models(&self) -> ConsoleResult<Vec<String>>;

    /// Schemas inside `database` (schema-qualified systems only)
    async fn list_schemas(&self, system: DbSystem, database: &str) -> ConsoleResult<Vec<String>>;

    /// Tables inside `database`, scoped to `schema` when the system needs one
    async fn list_tables(
        &self,
        system: DbSystem,
        database: &str,
        schema: Option<&str>,
    ) -> ConsoleResult<Vec<String>>;

    /// Column definitions of one table
    async fn fetch_schema(&self, table: &TableRef) -> ConsoleResult<SchemaDocument>;

    /// Generate the BigQuery DDL for a schema
    async fn generate_ddl(&self, request: &DdlRequest) -> ConsoleResult<String>;

    /// Ask the AI endpoint to annotate a JSON schema
    async fn augment_schema(&self, schema_json: &str, model: &str)
    -> ConsoleResult<SchemaDocument>;

    /// Ask the AI endpoint to rework a DDL statement; the answer is informational
    async fn augment_ddl(&self, ddl: &str, model: &str) -> ConsoleResult<String>;

    /// Post the connection form
    async fn connect(
        &self,
        system: Option<DbSystem>,
        form: &[(&'static str, String)],
    ) -> ConsoleResult<ConnectOutcome>;

    /// Reset the server-side connection state
    async fn clear_connection(&self) -> ConsoleResult<()>;
}

// ============================================================================
// Tests
// ============================================================================
