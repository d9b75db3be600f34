//! Core types used throughout Schemaport
//!
//! These are the values that cross crate boundaries: which source system
//! is being browsed, what a fetched table schema looks like, what a
//! generated DDL artifact carries and how severe a notification is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ConsoleError, ConsoleResult};

/// Default filename offered when downloading a generated DDL statement
pub const DEFAULT_DDL_FILENAME: &str = "bigquery_ddl.sql";

// ============================================================================
// Database Systems
// ============================================================================

/// Source database systems the console can browse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbSystem {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgresql")]
    PostgreSql,
    #[serde(rename = "sqlserver")]
    SqlServer,
    Oracle,
}

impl DbSystem {
    /// All supported systems, in the order they are offered in the UI
    pub const ALL: [DbSystem; 4] = [
        DbSystem::MySql,
        DbSystem::PostgreSql,
        DbSystem::SqlServer,
        DbSystem::Oracle,
    ];

    /// Wire identifier (`db_system` query/form value)
    pub fn as_str(&self) -> &'static str {
        match self {
            DbSystem::MySql => "mysql",
            DbSystem::PostgreSql => "postgresql",
            DbSystem::SqlServer => "sqlserver",
            DbSystem::Oracle => "oracle",
        }
    }

    /// Parse a wire identifier; empty or unknown values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mysql" => Some(DbSystem::MySql),
            "postgresql" | "postgres" => Some(DbSystem::PostgreSql),
            "sqlserver" | "mssql" => Some(DbSystem::SqlServer),
            "oracle" => Some(DbSystem::Oracle),
            _ => None,
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DbSystem::MySql => "MySQL",
            DbSystem::PostgreSql => "PostgreSQL",
            DbSystem::SqlServer => "SQL Server",
            DbSystem::Oracle => "Oracle",
        }
    }

    /// Whether a schema name is needed in addition to the database name
    pub fn is_schema_qualified(&self) -> bool {
        !matches!(self, DbSystem::MySql)
    }

    /// Default port used to pre-fill the connection form
    pub fn default_port(&self) -> u16 {
        match self {
            DbSystem::MySql => 3306,
            DbSystem::PostgreSql => 5432,
            DbSystem::SqlServer => 1433,
            DbSystem::Oracle => 1521,
        }
    }

    /// Endpoint that accepts the connection form for this system
    pub fn connect_endpoint(system: Option<DbSystem>) -> &'static str {
        match system {
            Some(DbSystem::MySql) => "/connect_mysql",
            Some(DbSystem::PostgreSql) => "/connect_postgres",
            Some(DbSystem::SqlServer) => "/connect_sqlserver",
            Some(DbSystem::Oracle) => "/connect_oracle",
            None => "/connect",
        }
    }
}

impl fmt::Display for DbSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Notification Severity
// ============================================================================

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    #[default]
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

// ============================================================================
// Tabs
// ============================================================================

/// Top-level console tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    /// Manual JSON schema / source DDL entry
    #[default]
    Manual,
    /// Browse a connected source database
    Browse,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Manual => "manual",
            Tab::Browse => "browse",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "manual" => Some(Tab::Manual),
            "browse" => Some(Tab::Browse),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tab::Manual => "Manual Entry",
            Tab::Browse => "Browse Source",
        }
    }

    /// Read the `active_tab` parameter from a query string
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "active_tab")
            .and_then(|(_, value)| Tab::parse(value))
    }
}

// ============================================================================
// Schema Document
// ============================================================================

/// A table's column definitions as returned by the schema endpoints
///
/// The document is kept as a raw JSON object so that whatever the server
/// sends survives a round trip through the preview pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDocument(Map<String, Value>);

impl SchemaDocument {
    /// Wrap a JSON value; anything but an object is rejected
    pub fn from_value(value: Value) -> ConsoleResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConsoleError::Parse(format!(
                "expected a JSON object for the table schema, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse schema text entered by the user
    pub fn parse(text: &str) -> ConsoleResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Destination table name suggested by the document
    pub fn table_name(&self) -> Option<&str> {
        self.0
            .get("table_name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Error reported by the server in place of a schema
    pub fn server_error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Number of entries in the `columns` array
    pub fn column_count(&self) -> usize {
        self.0
            .get("columns")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Render as JSON indented with four spaces
    pub fn to_pretty_json(&self) -> String {
        let mut buf = Vec::with_capacity(256);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        // Serializing a Map into a Vec cannot fail
        if self.0.serialize(&mut ser).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for SchemaDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Fully qualified reference to a source table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub system: DbSystem,
    pub database: String,
    /// Present only for schema-qualified systems
    pub schema: Option<String>,
    pub table: String,
}

/// Destination naming for the generated BigQuery table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetNaming {
    pub project_id: String,
    pub dataset_id: String,
    pub table_name: String,
}

/// Everything the DDL endpoint needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdlRequest {
    /// Schema text, sent verbatim
    pub schema_text: String,
    pub target: TargetNaming,
}

/// Outcome of posting the connection form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOutcome {
    /// Whether the server redirected to the browse tab
    pub connected: bool,
    /// Tab the server asked to show next
    pub active_tab: Tab,
}

// ============================================================================
// DDL Artifact
// ============================================================================

/// A generated DDL statement plus what is needed to download it
#[derive(Debug, Clone, PartialEq)]
pub struct DdlArtifact {
    /// Unique per generation; a new artifact invalidates the previous download
    pub id: Uuid,
    pub ddl: String,
    pub filename: String,
    pub generated_at: DateTime<Utc>,
}

impl DdlArtifact {
    /// Create an artifact with the default filename
    pub fn new(ddl: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ddl: ddl.into(),
            filename: DEFAULT_DDL_FILENAME.to_string(),
            generated_at: Utc::now(),
        }
    }

    /// Bytes offered by the download action
    pub fn bytes(&self) -> Arc<[u8]> {
        Arc::from(self.ddl.as_bytes())
    }
}

// ============================================================================
// Tests
// ============================================================================
