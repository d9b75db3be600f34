//! Lightweight parsing of user-entered schema text
//!
//! Covers the manual flow's helpers: guessing the destination table name
//! from JSON or DDL text, and extracting a schema document from a source
//! `CREATE TABLE` statement.

use regex::Regex;
use schemaport_core::SchemaDocument;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

/// Database name used when the statement does not qualify the table
pub const DEFAULT_SOURCE_DB: &str = "sourcedb";

/// Schema name used when the statement does not qualify the table
pub const DEFAULT_SOURCE_SCHEMA: &str = "sourceschema";

/// Table name used when no `CREATE TABLE` clause is found
pub const FALLBACK_TABLE_NAME: &str = "extracted_table";

static CREATE_TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)CREATE\s+TABLE\s+[`"]?(\w+)[`"]?"#).expect("valid regex")
});

static QUALIFIED_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)CREATE\s+(?:OR\s+REPLACE\s+)?TABLE\s+(?:(?:(?P<db>\w+)\.)?(?P<schema>\w+)\.(?P<table>\w+)|(?P<plain>\w+))"#,
    )
    .expect("valid regex")
});

static ANY_TABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)CREATE\s+(?:OR\s+REPLACE\s+)?TABLE\s+([^\s(]+)"#).expect("valid regex")
});

static COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^[`"]?(?P<name>\w+)[`"]?\s+(?P<type>\w+(?:\([^)]+\))?)\s*(?P<nullable>NOT NULL|NULL)?\s*(?:COMMENT\s+['"](?P<comment>[^'"]+)['"])?"#,
    )
    .expect("valid regex")
});

/// Leading keywords of table constraints, which are not columns
const CONSTRAINT_KEYWORDS: [&str; 7] = [
    "PRIMARY",
    "KEY",
    "CONSTRAINT",
    "UNIQUE",
    "INDEX",
    "FOREIGN",
    "CHECK",
];

/// Table name of the first `CREATE TABLE` clause
pub fn table_name_from_ddl(ddl: &str) -> Option<String> {
    CREATE_TABLE_NAME
        .captures(ddl)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Non-empty `table_name` of a JSON schema; unparsable text yields `None`
pub fn table_name_from_json(text: &str) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    value
        .get("table_name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

/// Build a schema document from a source `CREATE TABLE` statement
///
/// Accepts `table`, `schema.table` and `db.schema.table` names and column
/// definitions of the form `name type [NULL | NOT NULL] [COMMENT '...']`.
/// The result may have no columns when none could be recognised.
pub fn extract_schema_from_ddl(ddl: &str) -> SchemaDocument {
    let clean = ddl.split_whitespace().collect::<Vec<_>>().join(" ");

    let (db, schema, table) = match QUALIFIED_TABLE.captures(&clean) {
        Some(caps) => {
            let part = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
            match part("plain") {
                Some(table) => (None, None, table),
                None => (part("db"), part("schema"), part("table").unwrap_or_default()),
            }
        }
        None => {
            let table = ANY_TABLE
                .captures(&clean)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim_matches(|c| matches!(c, '`' | '"' | '[' | ']')).to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| FALLBACK_TABLE_NAME.to_string());
            (None, None, table)
        }
    };

    let columns: Vec<Value> = column_block(&clean)
        .map(split_top_level)
        .unwrap_or_default()
        .into_iter()
        .filter_map(parse_column)
        .collect();

    let mut map = Map::new();
    map.insert("table_name".to_string(), Value::String(table));
    map.insert("columns".to_string(), Value::Array(columns));
    map.insert(
        "db".to_string(),
        Value::String(db.unwrap_or_else(|| DEFAULT_SOURCE_DB.to_string())),
    );
    map.insert(
        "schema".to_string(),
        Value::String(schema.unwrap_or_else(|| DEFAULT_SOURCE_SCHEMA.to_string())),
    );
    map.insert(
        "table_comment".to_string(),
        Value::String("Extracted from DDL".to_string()),
    );
    SchemaDocument::from(map)
}

/// Text between the first `(` and the last `)`
fn column_block(ddl: &str) -> Option<&str> {
    let start = ddl.find('(')?;
    let end = ddl.rfind(')')?;
    (end > start).then(|| &ddl[start + 1..end])
}

/// Split on commas that are not nested inside parentheses
fn split_top_level(block: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in block.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&block[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&block[start..]);
    parts
}

fn parse_column(definition: &str) -> Option<Value> {
    let definition = definition.trim();
    if definition.is_empty() {
        return None;
    }
    let first_word = definition.split_whitespace().next()?.to_ascii_uppercase();
    if CONSTRAINT_KEYWORDS.contains(&first_word.as_str()) {
        return None;
    }

    let caps = COLUMN.captures(definition)?;
    let nullable = caps
        .name("nullable")
        .is_none_or(|m| !m.as_str().eq_ignore_ascii_case("NOT NULL"));
    Some(json!({
        "name": &caps["name"],
        "type": &caps["type"],
        "nullable": nullable,
        "comment": caps.name("comment").map(|m| m.as_str()).unwrap_or(""),
    }))
}

// ============================================================================
// Tests
// ============================================================================
