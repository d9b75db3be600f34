//! Route table of the migration server
//!
//! Each source system has its own listing and schema routes. Oracle routes
//! carry no database: the server keeps the service name in its session.
//! The generic `/get_schemas` route, which takes the system as a `db_system`
//! parameter, serves the remaining case.

use schemaport_core::{ConsoleError, ConsoleResult, DbSystem, TableRef};
use url::Url;

/// AI model listing
pub const LIST_MODELS: &str = "/list_models";

/// AI augmentation of a schema or DDL statement
pub const AI_ADD_COMMENT: &str = "/ai_add_comment";

/// BigQuery DDL generation
pub const GENERATE_BQ_DDL: &str = "/generate_bq_ddl";

/// Server-side connection reset
pub const CLEAR_CONNECTION: &str = "/clear_connection";

/// A GET route plus its query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    pub fn new(path: &'static str) -> Self {
        Self {
            path,
            query: Vec::new(),
        }
    }

    pub fn param(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Resolve against the server base URL, percent-encoding the parameters
    pub fn url(&self, base: &Url) -> ConsoleResult<Url> {
        let mut url = base.join(self.path).map_err(|e| {
            ConsoleError::internal(format!("cannot build URL for {}: {}", self.path, e))
        })?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

/// Schemas of a database
pub fn list_schemas(system: DbSystem, database: &str) -> Endpoint {
    match system {
        DbSystem::PostgreSql => Endpoint::new("/get_postgres_schemas").param("database", database),
        DbSystem::SqlServer => Endpoint::new("/get_sqlserver_schemas").param("database", database),
        // The Oracle service name lives in the server session
        DbSystem::Oracle => Endpoint::new("/get_oracle_schemas"),
        DbSystem::MySql => Endpoint::new("/get_schemas")
            .param("db_system", system.as_str())
            .param("database", database),
    }
}

/// Tables of a database, or of one schema inside it
pub fn list_tables(system: DbSystem, database: &str, schema: Option<&str>) -> Endpoint {
    let endpoint = match system {
        DbSystem::MySql => return Endpoint::new("/get_mysql_tables").param("database", database),
        DbSystem::PostgreSql => Endpoint::new("/get_postgres_tables").param("database", database),
        DbSystem::SqlServer => Endpoint::new("/get_sqlserver_tables").param("database", database),
        DbSystem::Oracle => Endpoint::new("/get_oracle_tables"),
    };
    match schema {
        Some(schema) => endpoint.param("schema", schema),
        None => endpoint,
    }
}

/// Column definitions of one table
pub fn fetch_schema(table: &TableRef) -> Endpoint {
    let schema = table.schema.clone().unwrap_or_default();
    match table.system {
        DbSystem::MySql => Endpoint::new("/get_mysql_schema")
            .param("database", &table.database)
            .param("table", &table.table),
        DbSystem::PostgreSql => Endpoint::new("/get_postgres_schema")
            .param("database", &table.database)
            .param("schema", schema)
            .param("table", &table.table),
        DbSystem::SqlServer => Endpoint::new("/get_sqlserver_schema")
            .param("database", &table.database)
            .param("schema", schema)
            .param("table", &table.table),
        DbSystem::Oracle => Endpoint::new("/get_oracle_table_schema")
            .param("schema", schema)
            .param("table", &table.table),
    }
}
