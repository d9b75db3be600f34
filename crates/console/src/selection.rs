//! Selector cascade for the browse flow
//!
//! The browse selection is an ordered chain:
//!
//! ```text
//! system -> database -> schema -> table -> preview -> DDL pane
//! ```
//!
//! Changing any level clears every level to its right immediately, before
//! any request is awaited. Each list level owns a request sequence so a
//! late response for a superseded selection is recognised and dropped.

use schemaport_core::{
    ConsoleError, ConsoleResult, DbSystem, SchemaDocument, TableRef, TargetNaming,
};

use crate::ddl::DdlPane;
use crate::options::{option_list, SelectOption};
use crate::preview::SchemaPreview;
use crate::sequence::{Sequence, Ticket};

/// Placeholder of the schema dropdown
pub const SCHEMA_PLACEHOLDER: &str = "Select schema...";

/// Placeholder of the table dropdown
pub const TABLE_PLACEHOLDER: &str = "Select table...";

// ============================================================================
// Levels
// ============================================================================

/// Position in the selection chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    System,
    Database,
    Schema,
    Table,
    Preview,
}

// ============================================================================
// Selector
// ============================================================================

/// One dependent dropdown
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    placeholder: &'static str,
    items: Vec<String>,
    selected: String,
    /// Whether a list request is outstanding
    pub loading: bool,
    seq: Sequence,
}

impl Selector {
    pub fn new(placeholder: &'static str) -> Self {
        Self {
            placeholder,
            items: Vec::new(),
            selected: String::new(),
            loading: false,
            seq: Sequence::new(),
        }
    }

    /// Back to placeholder-only, cancelling any outstanding request
    pub fn reset(&mut self) {
        self.items.clear();
        self.selected.clear();
        self.loading = false;
        self.seq.invalidate();
    }

    /// Reset and start a new list request
    pub fn begin_load(&mut self) -> Ticket {
        self.reset();
        self.loading = true;
        self.seq.issue()
    }

    /// Fill the list; returns false when `ticket` was superseded
    pub fn apply(&mut self, ticket: Ticket, items: Vec<String>) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.items = items;
        self.selected.clear();
        self.loading = false;
        true
    }

    /// Finish a failed request, leaving the placeholder only
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.items.clear();
        self.loading = false;
        true
    }

    /// Select a value; unknown values fall back to the placeholder
    pub fn select(&mut self, value: &str) {
        if self.items.iter().any(|item| item == value) {
            self.selected = value.to_string();
        } else {
            self.selected.clear();
        }
    }

    /// Selected value, `None` while the placeholder is selected
    pub fn selected(&self) -> Option<&str> {
        if self.selected.is_empty() {
            None
        } else {
            Some(self.selected.as_str())
        }
    }

    /// Raw selected value, empty for the placeholder
    pub fn value(&self) -> &str {
        &self.selected
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Dropdown entries, placeholder first
    ///
    /// A pending load leaves the list placeholder-only; `loading` is shown
    /// next to the dropdown instead.
    pub fn options(&self) -> Vec<SelectOption> {
        option_list(self.placeholder, &self.items)
    }
}

// ============================================================================
// Requests
// ============================================================================

/// A list request produced by a selection change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRequest {
    Schemas {
        ticket: Ticket,
        system: DbSystem,
        database: String,
    },
    Tables {
        ticket: Ticket,
        system: DbSystem,
        database: String,
        schema: Option<String>,
    },
}

/// A schema fetch produced by the "get schema" action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub ticket: Ticket,
    pub table: TableRef,
}

/// What happened to a response
#[derive(Debug)]
pub enum Outcome {
    /// The response was stored
    Applied,
    /// A newer request superseded this one; nothing changed
    Stale,
    /// The request failed; the level is back to its empty state
    Failed(ConsoleError),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Outcome::Stale)
    }
}

// ============================================================================
// Browse State
// ============================================================================

/// Everything the browse tab shows
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseState {
    pub system: Option<DbSystem>,
    pub database: String,
    pub schemas: Selector,
    pub tables: Selector,
    pub preview: SchemaPreview,
    pub target: TargetNaming,
    pub ddl: DdlPane,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            system: None,
            database: String::new(),
            schemas: Selector::new(SCHEMA_PLACEHOLDER),
            tables: Selector::new(TABLE_PLACEHOLDER),
            preview: SchemaPreview::new(),
            target: TargetNaming::default(),
            ddl: DdlPane::new(),
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the schema dropdown takes part in the chain
    pub fn uses_schemas(&self) -> bool {
        self.system.is_some_and(|s| s.is_schema_qualified())
    }

    /// Clear `level` and everything to its right
    pub fn reset(&mut self, level: Level) {
        if level <= Level::System {
            self.system = None;
        }
        if level <= Level::Database {
            self.database.clear();
        }
        if level <= Level::Schema {
            self.schemas.reset();
        }
        if level <= Level::Table {
            self.tables.reset();
        }
        self.preview.clear();
        self.target.table_name.clear();
        self.ddl.hide();
    }

    /// Change the source system
    pub fn select_system(&mut self, system: Option<DbSystem>) {
        self.reset(Level::System);
        self.system = system;
    }

    /// Change the database and request its first dependent list
    ///
    /// Returns `None` when the database is empty or no system is selected;
    /// the dependent dropdowns are left placeholder-only either way.
    pub fn select_database(&mut self, database: &str) -> Option<ListingRequest> {
        self.reset(Level::Database);
        self.database = database.trim().to_string();

        let system = self.system?;
        if self.database.is_empty() {
            return None;
        }

        if system.is_schema_qualified() {
            Some(ListingRequest::Schemas {
                ticket: self.schemas.begin_load(),
                system,
                database: self.database.clone(),
            })
        } else {
            Some(ListingRequest::Tables {
                ticket: self.tables.begin_load(),
                system,
                database: self.database.clone(),
                schema: None,
            })
        }
    }

    /// Change the schema and request its tables
    pub fn select_schema(&mut self, schema: &str) -> Option<ListingRequest> {
        self.reset(Level::Table);
        self.schemas.select(schema);

        let system = self.system?;
        let schema = self.schemas.selected()?.to_string();
        if self.database.is_empty() {
            return None;
        }

        Some(ListingRequest::Tables {
            ticket: self.tables.begin_load(),
            system,
            database: self.database.clone(),
            schema: Some(schema),
        })
    }

    /// Change the table; the preview is cleared, not fetched
    pub fn select_table(&mut self, table: &str) {
        self.reset(Level::Preview);
        self.tables.select(table);
        self.target.table_name = self.tables.value().to_string();
    }

    /// Store a schema list response
    pub fn apply_schemas(&mut self, ticket: Ticket, result: ConsoleResult<Vec<String>>) -> Outcome {
        apply_listing(&mut self.schemas, ticket, result)
    }

    /// Store a table list response
    pub fn apply_tables(&mut self, ticket: Ticket, result: ConsoleResult<Vec<String>>) -> Outcome {
        apply_listing(&mut self.tables, ticket, result)
    }

    /// Validate the selection and start a schema fetch
    ///
    /// Fails without touching the preview when a required selection is empty.
    pub fn schema_request(&mut self) -> ConsoleResult<PreviewRequest> {
        let Some(system) = self.system else {
            return Err(ConsoleError::missing(["a database system"]));
        };

        let mut missing = Vec::new();
        if self.database.is_empty() {
            missing.push("database");
        }
        if system.is_schema_qualified() && self.schemas.selected().is_none() {
            missing.push("schema");
        }
        if self.tables.selected().is_none() {
            missing.push("table");
        }
        if !missing.is_empty() {
            return Err(ConsoleError::missing(missing));
        }

        let table = TableRef {
            system,
            database: self.database.clone(),
            schema: if system.is_schema_qualified() {
                self.schemas.selected().map(str::to_string)
            } else {
                None
            },
            table: self.tables.value().to_string(),
        };

        Ok(PreviewRequest {
            ticket: self.preview.begin(),
            table,
        })
    }

    /// Store a fetched schema
    ///
    /// On success the destination table name is pre-filled and any shown
    /// DDL is hidden, since it belongs to the previous schema.
    pub fn apply_schema(&mut self, ticket: Ticket, result: ConsoleResult<SchemaDocument>) -> Outcome {
        let document = match result.and_then(check_document) {
            Ok(document) => document,
            Err(err) => {
                return if self.preview.fail(ticket) {
                    Outcome::Failed(err)
                } else {
                    Outcome::Stale
                };
            }
        };

        let table_name = document.table_name().unwrap_or_default().to_string();
        if !self.preview.accept(ticket, document) {
            return Outcome::Stale;
        }
        self.target.table_name = table_name;
        self.ddl.hide();
        Outcome::Applied
    }

    /// Schema text sent to DDL generation
    pub fn schema_text(&self) -> &str {
        self.preview.text()
    }
}

fn apply_listing(
    selector: &mut Selector,
    ticket: Ticket,
    result: ConsoleResult<Vec<String>>,
) -> Outcome {
    match result {
        Ok(items) => {
            if selector.apply(ticket, items) {
                Outcome::Applied
            } else {
                Outcome::Stale
            }
        }
        Err(err) => {
            if selector.fail(ticket) {
                Outcome::Failed(err)
            } else {
                Outcome::Stale
            }
        }
    }
}

fn check_document(document: SchemaDocument) -> ConsoleResult<SchemaDocument> {
    if let Some(message) = document.server_error() {
        return Err(ConsoleError::Server(message.to_string()));
    }
    if document.is_empty() {
        return Err(ConsoleError::Server(
            "No schema was returned for the selected table.".to_string(),
        ));
    }
    Ok(document)
}

// ============================================================================
// Tests
// ============================================================================
