//! HTTP implementation of the console backend
//!
//! The server keeps the source connection in its session cookie, so the
//! client keeps a cookie store for its whole lifetime.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use schemaport_core::{
    Backend, ConnectOutcome, ConsoleConfig, ConsoleError, ConsoleResult, DbSystem, DdlRequest,
    SchemaDocument, Tab, TableRef,
};

use crate::endpoints::{self, Endpoint};
use crate::wire::{
    AugmentDdlBody, AugmentResponse, AugmentSchemaBody, DdlResponse, GenerateDdlBody,
    ListResponse, SchemaEnvelope,
};

/// Upper bound for establishing a TCP connection to the server
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// HttpBackend
// ============================================================================

/// [`Backend`] that talks to the migration server over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    /// Create a backend for the server at `base_url`
    pub fn new(base_url: &str) -> ConsoleResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .cookie_store(true)
            .build()
            .map_err(|e| ConsoleError::internal(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ConsoleConfig) -> ConsoleResult<Self> {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> ConsoleResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ConsoleError::internal(format!("cannot build URL for {}: {}", path, e)))
    }

    // ========================================================================
    // Generic request helpers
    // ========================================================================

    /// Send a GET request and deserialise the response
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> ConsoleResult<T> {
        let url = endpoint.url(&self.base_url)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(transport)?;
        handle_response(endpoint.path, response).await
    }

    /// Send a POST request with a JSON body and deserialise the response
    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ConsoleResult<T> {
        let url = self.url(path)?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        handle_response(path, response).await
    }
}

fn parse_base_url(raw: &str) -> ConsoleResult<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{}/", trimmed))
        .map_err(|e| ConsoleError::InvalidConfig(format!("invalid server URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConsoleError::InvalidConfig(format!(
            "server URL must use http or https, got '{}'",
            other
        ))),
    }
}

fn transport(err: reqwest::Error) -> ConsoleError {
    if err.is_timeout() {
        ConsoleError::transport(format!("request timed out: {}", err))
    } else {
        ConsoleError::transport(err.to_string())
    }
}

/// Check the status, then decode the JSON body
async fn handle_response<T: DeserializeOwned>(path: &str, response: Response) -> ConsoleResult<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("{} answered with status {}", path, status);
        return Err(ConsoleError::Http {
            status: status.as_u16(),
            path: path.to_string(),
        });
    }
    let body = response.text().await.map_err(transport)?;
    serde_json::from_str(&body).map_err(|e| ConsoleError::Parse(format!("{}: {}", path, e)))
}

/// Read the connect result from the page the server redirected to
fn connect_outcome(final_url: &Url) -> ConnectOutcome {
    let active_tab = final_url
        .query()
        .and_then(Tab::from_query)
        .unwrap_or(Tab::Manual);
    ConnectOutcome {
        connected: active_tab == Tab::Browse,
        active_tab,
    }
}

// ============================================================================
// Backend implementation
// ============================================================================

#[async_trait]
impl Backend for HttpBackend {
    async fn list_models(&self) -> ConsoleResult<Vec<String>> {
        let models: ListResponse = self.get(&Endpoint::new(endpoints::LIST_MODELS)).await?;
        Ok(models.into_names())
    }

    async fn list_schemas(&self, system: DbSystem, database: &str) -> ConsoleResult<Vec<String>> {
        let names: ListResponse = self.get(&endpoints::list_schemas(system, database)).await?;
        Ok(names.into_names())
    }

    async fn list_tables(
        &self,
        system: DbSystem,
        database: &str,
        schema: Option<&str>,
    ) -> ConsoleResult<Vec<String>> {
        let names: ListResponse = self
            .get(&endpoints::list_tables(system, database, schema))
            .await?;
        Ok(names.into_names())
    }

    async fn fetch_schema(&self, table: &TableRef) -> ConsoleResult<SchemaDocument> {
        let endpoint = endpoints::fetch_schema(table);
        let envelope: SchemaEnvelope = self.get(&endpoint).await?;
        envelope.into_document(endpoint.path)
    }

    async fn generate_ddl(&self, request: &DdlRequest) -> ConsoleResult<String> {
        let body = GenerateDdlBody::from(request);
        let response: DdlResponse = self.post(endpoints::GENERATE_BQ_DDL, &body).await?;
        response
            .ddl
            .ok_or_else(|| ConsoleError::missing_field(endpoints::GENERATE_BQ_DDL, "ddl"))
    }

    async fn augment_schema(
        &self,
        schema_json: &str,
        model: &str,
    ) -> ConsoleResult<SchemaDocument> {
        let body = AugmentSchemaBody {
            json_schema: schema_json,
            model,
        };
        let response: AugmentResponse = self.post(endpoints::AI_ADD_COMMENT, &body).await?;
        response.into_schema(endpoints::AI_ADD_COMMENT)
    }

    async fn augment_ddl(&self, ddl: &str, model: &str) -> ConsoleResult<String> {
        let body = AugmentDdlBody { ddl, model };
        let response: AugmentResponse = self.post(endpoints::AI_ADD_COMMENT, &body).await?;
        response.into_response(endpoints::AI_ADD_COMMENT)
    }

    async fn connect(
        &self,
        system: Option<DbSystem>,
        form: &[(&'static str, String)],
    ) -> ConsoleResult<ConnectOutcome> {
        let path = DbSystem::connect_endpoint(system);
        let url = self.url(path)?;
        tracing::debug!("POST {} (form)", url);
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConsoleError::Http {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }
        Ok(connect_outcome(response.url()))
    }

    async fn clear_connection(&self) -> ConsoleResult<()> {
        let url = self.url(endpoints::CLEAR_CONNECTION)?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ConsoleError::Http {
                status: status.as_u16(),
                path: endpoints::CLEAR_CONNECTION.to_string(),
            })
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_base_url_normalisation() {
        let backend = HttpBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.base_url().as_str(), "http://localhost:5000/");

        let backend = HttpBackend::new("https://migrate.example.com/api").unwrap();
        assert_eq!(
            backend.url("/list_models").unwrap().as_str(),
            "https://migrate.example.com/list_models"
        );
    }

    #[test]
    fn test_rejects_non_http_urls() {
        assert!(matches!(
            HttpBackend::new("ftp://files.example.com"),
            Err(ConsoleError::InvalidConfig(_))
        ));
        assert!(HttpBackend::new("not a url").is_err());
    }

    #[test]
    fn test_connect_outcome_from_redirect() {
        let url = Url::parse("http://localhost:5000/?db_system=mysql&host=db&active_tab=browse")
            .unwrap();
        assert_eq!(
            connect_outcome(&url),
            ConnectOutcome {
                connected: true,
                active_tab: Tab::Browse
            }
        );

        let url = Url::parse("http://localhost:5000/?db_system=mysql&active_tab=manual").unwrap();
        assert!(!connect_outcome(&url).connected);

        let url = Url::parse("http://localhost:5000/").unwrap();
        assert_eq!(connect_outcome(&url).active_tab, Tab::Manual);
    }

    #[test]
    fn test_from_config() {
        let config = ConsoleConfig::default();
        let backend = HttpBackend::from_config(&config).unwrap();
        assert_eq!(backend.base_url().as_str(), "http://127.0.0.1:5000/");
    }
}
