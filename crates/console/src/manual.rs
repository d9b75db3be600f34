//! Manual entry flow
//!
//! The user types a JSON schema or pastes a source DDL statement. Editing
//! either field pre-fills the destination table name when a name can be
//! recognised; unrecognisable text leaves the current name alone.

use schemaport_core::{ConsoleError, ConsoleResult, SchemaDocument, TargetNaming};

use crate::ddl::DdlPane;
use crate::ddl_parse::{extract_schema_from_ddl, table_name_from_ddl, table_name_from_json};
use crate::sequence::{Sequence, Ticket};

/// Schema shown in the JSON field on start-up
pub const DEFAULT_JSON_SCHEMA: &str = r#"{
    "table_name": "employees",
    "columns": [
        {"name": "id", "type": "int", "nullable": false, "comment": "Employee ID"},
        {"name": "name", "type": "varchar", "nullable": true, "comment": "Employee Name"},
        {"name": "hire_date", "type": "date", "nullable": true, "comment": "Hire Date"}
    ],
    "db": "hrdb",
    "schema": "hr",
    "table_comment": "Employee master table"
}"#;

/// Statement shown in the source DDL field on start-up
pub const DEFAULT_SOURCE_DDL: &str = "CREATE TABLE employees (
    id INT NOT NULL,
    name VARCHAR(100),
    hire_date DATE
);";

/// Text fields of the manual tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    JsonSchema,
    SourceDdl,
}

/// Everything the manual tab shows
#[derive(Debug, Clone, PartialEq)]
pub struct ManualState {
    json_schema: String,
    source_ddl: String,
    pub target: TargetNaming,
    pub ddl: DdlPane,
    /// Bumped on every edit of the JSON field
    edits: Sequence,
}

impl Default for ManualState {
    fn default() -> Self {
        let mut state = Self {
            json_schema: String::new(),
            source_ddl: String::new(),
            target: TargetNaming::default(),
            ddl: DdlPane::new(),
            edits: Sequence::new(),
        };
        state.set_json_schema(DEFAULT_JSON_SCHEMA);
        state.set_source_ddl(DEFAULT_SOURCE_DDL);
        state
    }
}

impl ManualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json_schema(&self) -> &str {
        &self.json_schema
    }

    pub fn source_ddl(&self) -> &str {
        &self.source_ddl
    }

    /// Replace the JSON text and pre-fill the table name from it
    pub fn set_json_schema(&mut self, text: impl Into<String>) {
        self.json_schema = text.into();
        self.edits.invalidate();
        if let Some(name) = table_name_from_json(&self.json_schema) {
            self.target.table_name = name;
        }
    }

    /// Replace the source DDL and pre-fill the table name from it
    pub fn set_source_ddl(&mut self, text: impl Into<String>) {
        self.source_ddl = text.into();
        if let Some(name) = table_name_from_ddl(&self.source_ddl) {
            self.target.table_name = name;
        }
    }

    /// Empty one of the text fields
    pub fn clear_field(&mut self, field: ManualField) {
        match field {
            ManualField::JsonSchema => self.set_json_schema(""),
            ManualField::SourceDdl => self.source_ddl.clear(),
        }
    }

    /// Parse the source DDL into the JSON field
    pub fn extract_schema(&mut self) -> ConsoleResult<SchemaDocument> {
        if self.source_ddl.trim().is_empty() {
            return Err(ConsoleError::validation(
                "Enter a source DDL statement to extract a schema from.",
            ));
        }
        let document = extract_schema_from_ddl(&self.source_ddl);
        self.set_json_schema(document.to_pretty_json());
        Ok(document)
    }

    /// Ticket identifying the current JSON text
    pub fn latest_edit(&self) -> Ticket {
        self.edits.latest()
    }

    /// Write an AI-updated schema back unless the user edited the field meanwhile
    pub fn replace_schema(&mut self, ticket: Ticket, document: &SchemaDocument) -> bool {
        if !self.edits.is_current(ticket) {
            return false;
        }
        self.set_json_schema(document.to_pretty_json());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_prefill_employees() {
        let state = ManualState::new();
        assert_eq!(state.target.table_name, "employees");
        assert!(state.json_schema().contains("\"employees\""));
        assert!(state.source_ddl().starts_with("CREATE TABLE employees"));
        assert!(!state.ddl.visible);
    }

    #[test]
    fn test_json_edit_prefills_name() {
        let mut state = ManualState::new();
        state.set_json_schema(r#"{"table_name": "orders", "columns": []}"#);
        assert_eq!(state.target.table_name, "orders");

        // Half-typed JSON keeps the last recognised name
        state.set_json_schema(r#"{"table_name": "ord"#);
        assert_eq!(state.target.table_name, "orders");
    }

    #[test]
    fn test_ddl_edit_prefills_name() {
        let mut state = ManualState::new();
        state.set_source_ddl("create table `invoices` (id int)");
        assert_eq!(state.target.table_name, "invoices");
    }

    #[test]
    fn test_clear_field() {
        let mut state = ManualState::new();
        state.clear_field(ManualField::JsonSchema);
        assert_eq!(state.json_schema(), "");
        assert_eq!(state.target.table_name, "employees");

        state.clear_field(ManualField::SourceDdl);
        assert_eq!(state.source_ddl(), "");
    }

    #[test]
    fn test_extract_schema_fills_json() {
        let mut state = ManualState::new();
        state.set_source_ddl("CREATE TABLE sales.invoices (id INT NOT NULL, total DECIMAL(8,2))");
        let doc = state.extract_schema().unwrap();

        assert_eq!(doc.column_count(), 2);
        assert_eq!(state.target.table_name, "invoices");
        let parsed = SchemaDocument::parse(state.json_schema()).unwrap();
        assert_eq!(parsed.as_map()["schema"], json!("sales"));
    }

    #[test]
    fn test_extract_requires_ddl() {
        let mut state = ManualState::new();
        state.clear_field(ManualField::SourceDdl);
        assert!(state.extract_schema().unwrap_err().is_validation());
    }

    #[test]
    fn test_replace_schema_skips_after_edit() {
        let mut state = ManualState::new();
        let ticket = state.latest_edit();
        let doc = SchemaDocument::from_value(json!({"table_name": "employees_v2"})).unwrap();

        state.set_json_schema("{}");
        assert!(!state.replace_schema(ticket, &doc));
        assert_eq!(state.json_schema(), "{}");

        let ticket = state.latest_edit();
        assert!(state.replace_schema(ticket, &doc));
        assert_eq!(state.target.table_name, "employees_v2");
    }
}
