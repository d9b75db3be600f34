//! Request and response bodies exchanged with the migration server

use schemaport_core::{ConsoleError, ConsoleResult, DdlRequest, SchemaDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Responses
// ============================================================================

/// A name listing: either a bare array or wrapped under a key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Names(Vec<String>),
    Schemas { schemas: Vec<String> },
    Tables { tables: Vec<String> },
}

impl ListResponse {
    pub fn into_names(self) -> Vec<String> {
        match self {
            ListResponse::Names(names)
            | ListResponse::Schemas { schemas: names }
            | ListResponse::Tables { tables: names } => names,
        }
    }
}

/// `{"schema": {...}}` as returned by the schema endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaEnvelope {
    #[serde(default)]
    pub schema: Option<Value>,
}

impl SchemaEnvelope {
    pub fn into_document(self, endpoint: &str) -> ConsoleResult<SchemaDocument> {
        let value = self
            .schema
            .ok_or_else(|| ConsoleError::missing_field(endpoint, "schema"))?;
        schema_value(value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DdlResponse {
    #[serde(default)]
    pub ddl: Option<String>,
}

/// Answer of the AI endpoint
///
/// Schema augmentation answers with `schema`, DDL augmentation with
/// `response`. Either may come back alongside an `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AugmentResponse {
    #[serde(default)]
    pub schema: Option<Value>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AugmentResponse {
    pub fn into_schema(self, endpoint: &str) -> ConsoleResult<SchemaDocument> {
        match (self.schema, self.error) {
            (Some(value), _) => schema_value(value),
            (None, Some(error)) => Err(ConsoleError::Server(error)),
            (None, None) => Err(ConsoleError::missing_field(endpoint, "schema")),
        }
    }

    pub fn into_response(self, endpoint: &str) -> ConsoleResult<String> {
        match (self.response, self.error) {
            (Some(text), _) => Ok(text),
            (None, Some(error)) => Err(ConsoleError::Server(error)),
            (None, None) => Err(ConsoleError::missing_field(endpoint, "response")),
        }
    }
}

/// Schemas arrive either as an object or as JSON text holding one
fn schema_value(value: Value) -> ConsoleResult<SchemaDocument> {
    match value {
        Value::String(text) => SchemaDocument::parse(&text)
            .map_err(|e| ConsoleError::Parse(format!("schema string is not a JSON object: {}", e))),
        other => SchemaDocument::from_value(other),
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateDdlBody<'a> {
    /// Schema JSON as text; the server decodes it itself
    pub schema: &'a str,
    pub bq_project_id: &'a str,
    pub bq_dataset_id: &'a str,
    pub bq_table_name: &'a str,
}

impl<'a> From<&'a DdlRequest> for GenerateDdlBody<'a> {
    fn from(request: &'a DdlRequest) -> Self {
        Self {
            schema: &request.schema_text,
            bq_project_id: request.target.project_id.trim(),
            bq_dataset_id: request.target.dataset_id.trim(),
            bq_table_name: request.target.table_name.trim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentSchemaBody<'a> {
    pub json_schema: &'a str,
    pub model: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AugmentDdlBody<'a> {
    pub ddl: &'a str,
    pub model: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemaport_core::TargetNaming;
    use serde_json::json;

    #[test]
    fn test_list_envelopes() {
        let bare: ListResponse = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(bare.into_names(), vec!["a", "b"]);

        let wrapped: ListResponse = serde_json::from_value(json!({"schemas": ["public"]})).unwrap();
        assert_eq!(wrapped.into_names(), vec!["public"]);

        let tables: ListResponse = serde_json::from_value(json!({"tables": []})).unwrap();
        assert!(tables.into_names().is_empty());
    }

    #[test]
    fn test_schema_envelope_requires_schema() {
        let envelope: SchemaEnvelope = serde_json::from_value(json!({})).unwrap();
        let err = envelope.into_document("/get_mysql_schema").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Response from /get_mysql_schema is missing 'schema'"
        );

        let envelope: SchemaEnvelope =
            serde_json::from_value(json!({"schema": {"table_name": "orders", "columns": []}}))
                .unwrap();
        let doc = envelope.into_document("/get_mysql_schema").unwrap();
        assert_eq!(doc.table_name(), Some("orders"));
    }

    #[test]
    fn test_augmented_schema_as_string() {
        let response: AugmentResponse = serde_json::from_value(json!({
            "schema": "{\"table_name\": \"employees\", \"columns\": [{\"name\": \"id\"}]}"
        }))
        .unwrap();
        let doc = response.into_schema("/ai_add_comment").unwrap();
        assert_eq!(doc.column_count(), 1);
    }

    #[test]
    fn test_augment_without_schema_is_semantic_error() {
        let response: AugmentResponse =
            serde_json::from_value(json!({"response": "free text"})).unwrap();
        let err = response.into_schema("/ai_add_comment").unwrap_err();
        assert!(err.is_semantic());

        let response: AugmentResponse =
            serde_json::from_value(json!({"error": "model not loaded"})).unwrap();
        let err = response.into_response("/ai_add_comment").unwrap_err();
        assert_eq!(err.to_string(), "Server error: model not loaded");
    }

    #[test]
    fn test_generate_body_field_names() {
        let request = DdlRequest {
            schema_text: "{\"columns\": []}".to_string(),
            target: TargetNaming {
                project_id: " proj ".to_string(),
                dataset_id: "ds".to_string(),
                table_name: "orders".to_string(),
            },
        };
        let body = serde_json::to_value(GenerateDdlBody::from(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "schema": "{\"columns\": []}",
                "bq_project_id": "proj",
                "bq_dataset_id": "ds",
                "bq_table_name": "orders"
            })
        );
    }
}
