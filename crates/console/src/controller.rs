//! Async controllers
//!
//! [`Console`] turns user actions into state changes and backend calls.
//! Every action follows the same shape: mutate the state synchronously
//! (clearing whatever the action invalidates), await the backend, then apply
//! the response only if it still belongs to the current selection. Failures
//! end up as a notification and never abort the console.

use schemaport_core::{
    Backend, ConsoleConfig, ConsoleError, ConsoleResult, DbSystem, DdlArtifact, DdlRequest, Severity,
    SchemaDocument, Tab, TargetNaming, Validatable,
};
use std::sync::Arc;
use std::time::Duration;

use crate::connection::{ConnectionForm, ConnectionStatus};
use crate::ddl::DdlFlow;
use crate::manual::ManualField;
use crate::overlay::OverlayGuard;
use crate::selection::{ListingRequest, Outcome};
use crate::sequence::Ticket;
use crate::store::StateStore;

/// Console controller bound to a backend and a state store
pub struct Console<B: Backend, S: StateStore> {
    backend: Arc<B>,
    store: S,
    config: Arc<ConsoleConfig>,
}

impl<B: Backend, S: StateStore> Clone for Console<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            store: self.store.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<B: Backend, S: StateStore> PartialEq for Console<B, S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.backend, &other.backend) && Arc::ptr_eq(&self.config, &other.config)
    }
}

/// A DDL generation ready to be sent, or the reason it is not needed
enum PreparedDdl {
    Send { ticket: Ticket, request: DdlRequest },
    Extracted { columns: usize },
}

impl<B: Backend, S: StateStore> Console<B, S> {
    pub fn new(backend: Arc<B>, store: S, config: ConsoleConfig) -> Self {
        Self {
            backend,
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Show a toast for the default duration
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        self.notify_for(message, severity, self.config.notifications.default_duration())
    }

    /// Show a toast for `duration`
    pub fn notify_for(
        &self,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) -> u64 {
        let message = message.into();
        self.store
            .update(|s| s.notifications.notify(message, severity, duration))
    }

    /// Remove a toast (manual close or timer expiry)
    pub fn dismiss(&self, id: u64) {
        self.store.update(|s| s.notifications.dismiss(id));
    }

    /// Log an error and surface it as a toast
    pub fn report(&self, err: &ConsoleError) {
        if err.is_validation() {
            tracing::warn!("{}", err);
        } else {
            tracing::error!("{}", err);
        }
        self.notify(err.user_message(), err.severity());
    }

    // ========================================================================
    // Tabs
    // ========================================================================

    pub fn select_tab(&self, tab: Tab) {
        self.store.update(|s| s.active_tab = tab);
    }

    // ========================================================================
    // AI Settings
    // ========================================================================

    /// Fetch the model list; later calls are no-ops
    pub async fn load_models(&self) {
        if !self.store.update(|s| s.ai.begin_load()) {
            return;
        }
        tracing::debug!("Loading AI model list");
        let result = self.backend.list_models().await;
        match &result {
            Ok(models) => tracing::info!("{} AI model(s) available", models.len()),
            Err(err) => tracing::warn!("Failed to load AI models: {}", err),
        }
        self.store.update(|s| s.ai.apply_models(result));
    }

    pub fn set_ai_enabled(&self, enabled: bool) {
        self.store.update(|s| s.ai.enabled = enabled);
    }

    pub fn select_model(&self, model: &str) {
        self.store.update(|s| s.ai.select_model(model));
    }

    fn require_model(&self) -> ConsoleResult<String> {
        self.store.read(|s| {
            if !s.ai.enabled {
                return Err(ConsoleError::validation("Turn on \"Use AI\" first."));
            }
            s.ai
                .selected_model()
                .map(str::to_string)
                .ok_or_else(|| ConsoleError::missing(["an AI model"]))
        })
    }

    // ========================================================================
    // Connection
    // ========================================================================

    /// Edit the connection form
    pub fn edit_connection(&self, f: impl FnOnce(&mut ConnectionForm)) {
        self.store.update(|s| f(&mut s.connection_form));
    }

    /// Post the connection form and, on success, load the first browse level
    pub async fn connect(&self) {
        let form = self.store.read(|s| s.connection_form.clone());
        if let Err(err) = form.validate() {
            self.report(&err);
            return;
        }
        let Some(system) = form.system else {
            return;
        };

        self.store
            .update(|s| s.connection = ConnectionStatus::Connecting);
        tracing::info!(
            "Connecting to {} at {}:{}",
            system,
            form.host.trim(),
            form.port.trim()
        );

        match self.backend.connect(form.system, &form.form_pairs()).await {
            Ok(outcome) if outcome.connected => {
                let database = form.database.trim().to_string();
                self.store.update(|s| {
                    s.connection = ConnectionStatus::Connected {
                        system,
                        database: database.clone(),
                    };
                    s.active_tab = outcome.active_tab;
                    s.browse.select_system(Some(system));
                });
                self.notify(
                    format!("{} connection successful!", system),
                    Severity::Success,
                );
                self.database_changed(&database).await;
            }
            Ok(outcome) => {
                tracing::warn!("Connection to {} was refused by the server", system);
                self.store.update(|s| {
                    s.connection = ConnectionStatus::Disconnected;
                    s.active_tab = outcome.active_tab;
                });
                self.notify(
                    format!(
                        "{} connection failed. Check the connection details and try again.",
                        system
                    ),
                    Severity::Danger,
                );
            }
            Err(err) => {
                self.store
                    .update(|s| s.connection = ConnectionStatus::Disconnected);
                self.report(&err);
            }
        }
    }

    /// Reset the form and the browse tab, then drop the server-side connection
    pub async fn clear_connection(&self) {
        self.store.update(|s| {
            s.connection_form.reset();
            s.connection = ConnectionStatus::Disconnected;
            s.browse.select_system(None);
            s.active_tab = Tab::Manual;
        });
        tracing::info!("Clearing source connection");

        match self.backend.clear_connection().await {
            Ok(()) => {
                self.notify("Connection cleared.", Severity::Info);
            }
            Err(err) => self.report(&err),
        }
    }

    // ========================================================================
    // Selector Cascade
    // ========================================================================

    /// Change the browse system; clears the whole chain
    pub fn system_changed(&self, system: Option<DbSystem>) {
        self.store.update(|s| s.browse.select_system(system));
    }

    /// Change the database and load its schemas (or tables for flat systems)
    pub async fn database_changed(&self, database: &str) {
        let request = self.store.update(|s| s.browse.select_database(database));
        if let Some(request) = request {
            self.run_listing(request).await;
        }
    }

    /// Change the schema and load its tables
    pub async fn schema_changed(&self, schema: &str) {
        let request = self.store.update(|s| s.browse.select_schema(schema));
        if let Some(request) = request {
            self.run_listing(request).await;
        }
    }

    /// Change the table; the schema is fetched separately by [`Console::load_schema`]
    pub fn table_changed(&self, table: &str) {
        self.store.update(|s| s.browse.select_table(table));
    }

    async fn run_listing(&self, request: ListingRequest) {
        match request {
            ListingRequest::Schemas {
                ticket,
                system,
                database,
            } => {
                tracing::info!("Listing schemas of {} database '{}'", system, database);
                let result = self.backend.list_schemas(system, &database).await;
                let outcome = self.store.update(|s| s.browse.apply_schemas(ticket, result));
                self.finish("schema list", ticket, outcome);
            }
            ListingRequest::Tables {
                ticket,
                system,
                database,
                schema,
            } => {
                tracing::info!(
                    "Listing tables of {} database '{}'{}",
                    system,
                    database,
                    schema
                        .as_deref()
                        .map(|s| format!(", schema '{}'", s))
                        .unwrap_or_default()
                );
                let result = self
                    .backend
                    .list_tables(system, &database, schema.as_deref())
                    .await;
                let outcome = self.store.update(|s| s.browse.apply_tables(ticket, result));
                self.finish("table list", ticket, outcome);
            }
        }
    }

    fn finish(&self, what: &str, ticket: Ticket, outcome: Outcome) {
        match outcome {
            Outcome::Applied => tracing::debug!("Applied {} #{}", what, ticket.value()),
            Outcome::Stale => {
                tracing::debug!("Discarded stale {} response #{}", what, ticket.value())
            }
            Outcome::Failed(err) => self.report(&err),
        }
    }

    // ========================================================================
    // Schema Preview
    // ========================================================================

    /// Fetch the selected table's schema into the preview pane
    pub async fn load_schema(&self) {
        let request = match self.store.update(|s| s.browse.schema_request()) {
            Ok(request) => request,
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        tracing::info!(
            "Fetching schema of {}.{}",
            request.table.schema.as_deref().unwrap_or(&request.table.database),
            request.table.table
        );
        let result = self.backend.fetch_schema(&request.table).await;
        let outcome = self
            .store
            .update(|s| s.browse.apply_schema(request.ticket, result));
        self.finish("schema", request.ticket, outcome);
    }

    // ========================================================================
    // Manual Entry
    // ========================================================================

    pub fn set_json_schema(&self, text: String) {
        self.store.update(|s| s.manual.set_json_schema(text));
    }

    pub fn set_source_ddl(&self, text: String) {
        self.store.update(|s| s.manual.set_source_ddl(text));
    }

    pub fn clear_field(&self, field: ManualField) {
        self.store.update(|s| s.manual.clear_field(field));
    }

    /// Parse the source DDL into the JSON schema field
    pub fn extract_schema(&self) {
        match self.store.update(|s| s.manual.extract_schema()) {
            Ok(document) => self.notify_extraction(document.column_count()),
            Err(err) => self.report(&err),
        }
    }

    fn notify_extraction(&self, columns: usize) {
        if columns == 0 {
            self.notify(
                "Failed to parse columns from the source DDL.",
                Severity::Warning,
            );
        } else {
            self.notify(
                format!("Extracted {} column(s) from the source DDL.", columns),
                Severity::Success,
            );
        }
    }

    /// Edit the destination naming of a flow
    pub fn edit_target(&self, flow: DdlFlow, f: impl FnOnce(&mut TargetNaming)) {
        self.store.update(|s| f(s.target_mut(flow)));
    }

    // ========================================================================
    // DDL Generation
    // ========================================================================

    /// Generate DDL for a flow's current schema and show it in that flow's pane
    pub async fn generate_ddl(&self, flow: DdlFlow) {
        let prepared = self.store.update(|s| -> ConsoleResult<PreparedDdl> {
            let schema_text = match flow {
                DdlFlow::Browse => {
                    if !s.browse.preview.is_ready() {
                        return Err(ConsoleError::validation(
                            "Fetch a table schema before generating DDL.",
                        ));
                    }
                    s.browse.schema_text().to_string()
                }
                DdlFlow::Manual => {
                    let json = s.manual.json_schema().trim();
                    if json.is_empty() {
                        // Only a source statement: extract and let the user review it first
                        let document = s.manual.extract_schema().map_err(|_| {
                            ConsoleError::validation(
                                "Enter a JSON schema or a source DDL statement.",
                            )
                        })?;
                        return Ok(PreparedDdl::Extracted {
                            columns: document.column_count(),
                        });
                    }
                    SchemaDocument::parse(json).map_err(|e| {
                        ConsoleError::validation(format!("The JSON schema is not valid: {}", e))
                    })?;
                    json.to_string()
                }
            };
            let target = s.target(flow).clone();
            let ticket = s.ddl_pane_mut(flow).begin();
            Ok(PreparedDdl::Send {
                ticket,
                request: DdlRequest {
                    schema_text,
                    target,
                },
            })
        });

        let (ticket, request) = match prepared {
            Ok(PreparedDdl::Send { ticket, request }) => (ticket, request),
            Ok(PreparedDdl::Extracted { columns }) => {
                self.notify_extraction(columns);
                return;
            }
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        tracing::info!(
            "Generating {} DDL for table '{}'",
            flow,
            request.target.table_name
        );
        let result = {
            let _overlay = OverlayGuard::show(&self.store, "Generating DDL...");
            self.backend.generate_ddl(&request).await
        };

        match result {
            Ok(ddl) => {
                let shown = self
                    .store
                    .update(|s| s.ddl_pane_mut(flow).show(ticket, DdlArtifact::new(ddl)));
                if shown {
                    tracing::info!("Generated {} DDL", flow);
                } else {
                    tracing::debug!("Discarded stale {} DDL #{}", flow, ticket.value());
                }
            }
            Err(err) => {
                if self.store.update(|s| s.ddl_pane_mut(flow).fail(ticket)) {
                    self.report(&err);
                } else {
                    tracing::debug!("Ignoring failure of stale {} DDL #{}", flow, ticket.value());
                }
            }
        }
    }

    // ========================================================================
    // AI Augmentation
    // ========================================================================

    /// Send the flow's schema to the AI assistant and apply the annotated result
    ///
    /// The result replaces the schema only if it was not changed meanwhile.
    /// DDL is then regenerated unless `ai.auto_regenerate` is off.
    pub async fn augment_schema(&self, flow: DdlFlow) {
        let model = match self.require_model() {
            Ok(model) => model,
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        let source = self.store.read(|s| match flow {
            DdlFlow::Browse => s
                .browse
                .preview
                .document()
                .map(|_| (s.browse.preview.latest(), s.browse.schema_text().to_string())),
            DdlFlow::Manual => {
                let json = s.manual.json_schema().trim();
                (!json.is_empty()).then(|| (s.manual.latest_edit(), json.to_string()))
            }
        });
        let Some((ticket, schema_json)) = source else {
            self.report(&ConsoleError::validation(
                "There is no schema to send to the AI assistant.",
            ));
            return;
        };

        self.notify_for(
            "Processing Add Comments to DDL...",
            Severity::Info,
            self.config.notifications.processing_duration(),
        );
        tracing::info!("Requesting AI comments for {} schema with {}", flow, model);

        let result = {
            let _overlay = OverlayGuard::show(&self.store, "Adding comments with AI...");
            self.backend.augment_schema(&schema_json, &model).await
        };

        let document = match result {
            Ok(document) => document,
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        let applied = self.store.update(|s| match flow {
            DdlFlow::Browse => {
                let replaced = s.browse.preview.replace(ticket, document);
                if replaced {
                    s.browse.ddl.hide();
                }
                replaced
            }
            DdlFlow::Manual => s.manual.replace_schema(ticket, &document),
        });
        if !applied {
            tracing::debug!("Schema changed during AI request; discarding {} update", flow);
            self.notify(
                "The schema changed while the AI assistant was working, so its update was discarded.",
                Severity::Warning,
            );
            return;
        }

        if self.config.ai.auto_regenerate {
            self.generate_ddl(flow).await;
        } else {
            self.notify(
                "Schema updated by the AI assistant. Generate DDL to apply it.",
                Severity::Success,
            );
        }
    }

    /// Ask the AI assistant to standardize the flow's DDL; the answer is only shown
    pub async fn augment_ddl(&self, flow: DdlFlow) {
        let model = match self.require_model() {
            Ok(model) => model,
            Err(err) => {
                self.report(&err);
                return;
            }
        };

        let ddl = self.store.read(|s| {
            let generated = s.ddl_pane(flow).ddl_text();
            match flow {
                DdlFlow::Manual if generated.is_empty() => s.manual.source_ddl().trim().to_string(),
                _ => generated.to_string(),
            }
        });
        if ddl.is_empty() {
            self.report(&ConsoleError::validation(
                "Generate a DDL statement before standardizing it.",
            ));
            return;
        }

        self.notify_for(
            "Processing Standardize DDL...",
            Severity::Info,
            self.config.notifications.processing_duration(),
        );
        tracing::info!("Requesting AI standardization for {} DDL with {}", flow, model);

        let result = {
            let _overlay = OverlayGuard::show(&self.store, "Standardizing DDL with AI...");
            self.backend.augment_ddl(&ddl, &model).await
        };

        match result {
            Ok(answer) => {
                self.notify_for(
                    answer,
                    Severity::Info,
                    self.config.notifications.ai_response_duration(),
                );
            }
            Err(err) => self.report(&err),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use schemaport_core::{ConnectOutcome, TableRef, DEFAULT_DDL_FILENAME};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ------------------------------------------------------------------------
    // Fake backend
    // ------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<String>>,
        delays: HashMap<String, Duration>,
        models: Option<Vec<String>>,
        augment_without_schema: bool,
        refuse_connection: bool,
        fail_listing: bool,
    }

    impl FakeBackend {
        fn delay(mut self, key: &str, millis: u64) -> Self {
            self.delays
                .insert(key.to_string(), Duration::from_millis(millis));
            self
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls()
                .iter()
                .filter(|c| c.starts_with(prefix))
                .count()
        }

        async fn pause(&self, key: &str) {
            if let Some(delay) = self.delays.get(key) {
                tokio::time::sleep(*delay).await;
            }
        }
    }

    #[async_trait]
    impl Backend for FakeBackend {
        async fn list_models(&self) -> ConsoleResult<Vec<String>> {
            self.record("list_models".to_string());
            self.models
                .clone()
                .ok_or_else(|| ConsoleError::transport("connection refused"))
        }

        async fn list_schemas(&self, _system: DbSystem, database: &str) -> ConsoleResult<Vec<String>> {
            self.record(format!("list_schemas:{}", database));
            self.pause(database).await;
            if self.fail_listing {
                return Err(ConsoleError::transport("connection reset"));
            }
            Ok(vec![format!("{}_schema", database)])
        }

        async fn list_tables(
            &self,
            _system: DbSystem,
            database: &str,
            schema: Option<&str>,
        ) -> ConsoleResult<Vec<String>> {
            let scope = schema.unwrap_or(database);
            self.record(format!("list_tables:{}", scope));
            self.pause(scope).await;
            Ok(vec!["orders".to_string(), "customers".to_string()])
        }

        async fn fetch_schema(&self, table: &TableRef) -> ConsoleResult<SchemaDocument> {
            self.record(format!("fetch_schema:{}", table.table));
            self.pause(&table.table).await;
            SchemaDocument::from_value(json!({
                "table_name": table.table,
                "columns": [{"name": "id", "type": "int", "nullable": false, "comment": ""}],
                "db": table.database,
                "schema": table.schema.clone().unwrap_or_else(|| table.database.clone()),
                "table_comment": ""
            }))
        }

        async fn generate_ddl(&self, request: &DdlRequest) -> ConsoleResult<String> {
            self.record(format!("generate_ddl:{}", request.target.table_name));
            self.pause("generate").await;
            let t = &request.target;
            Ok(format!(
                "CREATE TABLE `{}.{}.{}` (\n  id INT64 NOT NULL\n);",
                t.project_id, t.dataset_id, t.table_name
            ))
        }

        async fn augment_schema(
            &self,
            schema_json: &str,
            model: &str,
        ) -> ConsoleResult<SchemaDocument> {
            self.record(format!("augment_schema:{}", model));
            self.pause("augment").await;
            if self.augment_without_schema {
                return Err(ConsoleError::missing_field("/ai_add_comment", "schema"));
            }
            let mut value: serde_json::Value = serde_json::from_str(schema_json)?;
            value["table_comment"] = json!("Commented by AI");
            SchemaDocument::from_value(value)
        }

        async fn augment_ddl(&self, ddl: &str, model: &str) -> ConsoleResult<String> {
            self.record(format!("augment_ddl:{}", model));
            Ok(format!("-- standardized\n{}", ddl))
        }

        async fn connect(
            &self,
            system: Option<DbSystem>,
            form: &[(&'static str, String)],
        ) -> ConsoleResult<ConnectOutcome> {
            let host = form
                .iter()
                .find(|(k, _)| *k == "host")
                .map(|(_, v)| v.as_str())
                .unwrap_or_default();
            self.record(format!(
                "connect:{}:{}",
                DbSystem::connect_endpoint(system),
                host
            ));
            let connected = !self.refuse_connection;
            Ok(ConnectOutcome {
                connected,
                active_tab: if connected { Tab::Browse } else { Tab::Manual },
            })
        }

        async fn clear_connection(&self) -> ConsoleResult<()> {
            self.record("clear_connection".to_string());
            Ok(())
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn console_with(backend: FakeBackend) -> (Console<FakeBackend, LocalStore>, Arc<FakeBackend>) {
        console_with_config(backend, ConsoleConfig::default())
    }

    fn console_with_config(
        backend: FakeBackend,
        config: ConsoleConfig,
    ) -> (Console<FakeBackend, LocalStore>, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let console = Console::new(Arc::clone(&backend), LocalStore::default(), config);
        (console, backend)
    }

    fn toast(console: &Console<FakeBackend, LocalStore>) -> Option<(String, Severity)> {
        console.store().read(|s| {
            s.notifications
                .current()
                .map(|t| (t.message.clone(), t.severity))
        })
    }

    /// PostgreSQL selection down to `public.orders` with its schema fetched
    async fn browse_orders(console: &Console<FakeBackend, LocalStore>) {
        console.system_changed(Some(DbSystem::PostgreSql));
        console.database_changed("sales").await;
        console.schema_changed("sales_schema").await;
        console.table_changed("orders");
        console.load_schema().await;
    }

    fn enable_ai(console: &Console<FakeBackend, LocalStore>) {
        console.store().update(|s| {
            s.ai.begin_load();
            s.ai.apply_models(Ok(vec!["llama-3.gguf".to_string()]));
        });
        console.set_ai_enabled(true);
    }

    // ------------------------------------------------------------------------
    // Selector cascade
    // ------------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn test_stale_schema_list_does_not_overwrite_newer() {
        let (console, backend) = console_with(FakeBackend::default().delay("slow_db", 500));
        console.system_changed(Some(DbSystem::PostgreSql));

        tokio::join!(console.database_changed("slow_db"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            console.database_changed("fast_db").await;
        });

        let (database, schemas) = console
            .store()
            .read(|s| (s.browse.database.clone(), s.browse.schemas.items().to_vec()));
        assert_eq!(database, "fast_db");
        assert_eq!(schemas, vec!["fast_db_schema".to_string()]);
        assert_eq!(
            backend.calls(),
            vec!["list_schemas:slow_db", "list_schemas:fast_db"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_table_list_does_not_overwrite_newer() {
        let (console, _) = console_with(FakeBackend::default().delay("slow_schema", 300));
        console.system_changed(Some(DbSystem::SqlServer));
        console.store().update(|s| {
            if let Some(ListingRequest::Schemas { ticket, .. }) = s.browse.select_database("erp") {
                s.browse.apply_schemas(
                    ticket,
                    Ok(vec!["slow_schema".to_string(), "dbo".to_string()]),
                );
            }
        });

        tokio::join!(console.schema_changed("slow_schema"), async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            console.schema_changed("dbo").await;
            console.table_changed("customers");
        });

        let (schema, table) = console.store().read(|s| {
            (
                s.browse.schemas.value().to_string(),
                s.browse.tables.value().to_string(),
            )
        });
        assert_eq!(schema, "dbo");
        assert_eq!(table, "customers");
    }

    #[tokio::test]
    async fn test_mysql_database_lists_tables_directly() {
        let (console, backend) = console_with(FakeBackend::default());
        console.system_changed(Some(DbSystem::MySql));
        console.database_changed("shop").await;

        assert_eq!(backend.calls(), vec!["list_tables:shop"]);
        let tables = console.store().read(|s| s.browse.tables.items().to_vec());
        assert_eq!(tables, vec!["orders", "customers"]);
    }

    #[tokio::test]
    async fn test_empty_database_issues_no_request() {
        let (console, backend) = console_with(FakeBackend::default());
        console.system_changed(Some(DbSystem::PostgreSql));
        console.database_changed("").await;
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_listing_is_reported() {
        let (console, _) = console_with(FakeBackend {
            fail_listing: true,
            ..FakeBackend::default()
        });
        console.system_changed(Some(DbSystem::Oracle));
        console.database_changed("ORCL").await;

        let (_, severity) = toast(&console).unwrap();
        assert_eq!(severity, Severity::Danger);
        assert_eq!(console.store().read(|s| s.browse.schemas.options().len()), 1);
    }

    // ------------------------------------------------------------------------
    // Schema preview
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_schema_fetch_prefills_and_enables_generate() {
        let (console, _) = console_with(FakeBackend::default());
        browse_orders(&console).await;

        let (name, enabled) = console
            .store()
            .read(|s| (s.browse.target.table_name.clone(), s.enablement()));
        assert_eq!(name, "orders");
        assert!(enabled.browse_generate);
    }

    #[tokio::test]
    async fn test_missing_selection_issues_no_request() {
        let (console, backend) = console_with(FakeBackend::default());
        console.system_changed(Some(DbSystem::PostgreSql));
        console.load_schema().await;

        assert!(backend.calls().is_empty());
        let (message, severity) = toast(&console).unwrap();
        assert_eq!(severity, Severity::Warning);
        assert_eq!(message, "Please select database, schema, and table.");
    }

    // ------------------------------------------------------------------------
    // DDL generation
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_generate_shows_preview_and_download() {
        let (console, backend) = console_with(FakeBackend::default());
        browse_orders(&console).await;
        console.edit_target(DdlFlow::Browse, |t| {
            t.project_id = "acme".to_string();
            t.dataset_id = "raw".to_string();
        });

        console.generate_ddl(DdlFlow::Browse).await;

        let pane = console.store().read(|s| s.browse.ddl.clone());
        assert!(pane.visible);
        assert_eq!(
            pane.ddl_text(),
            "CREATE TABLE `acme.raw.orders` (\n  id INT64 NOT NULL\n);"
        );
        let download = pane.download().unwrap();
        assert_eq!(download.filename, DEFAULT_DDL_FILENAME);
        assert_eq!(&*download.bytes, pane.ddl_text().as_bytes());
        assert_eq!(backend.count("generate_ddl"), 1);
        assert!(!console.store().read(|s| s.overlay.is_visible()));
    }

    #[tokio::test]
    async fn test_manual_generation_leaves_browse_pane_alone() {
        let (console, _) = console_with(FakeBackend::default());
        console.generate_ddl(DdlFlow::Manual).await;

        let (manual, browse) = console
            .store()
            .read(|s| (s.manual.ddl.visible, s.browse.ddl.visible));
        assert!(manual);
        assert!(!browse);
    }

    #[tokio::test]
    async fn test_manual_invalid_json_issues_no_request() {
        let (console, backend) = console_with(FakeBackend::default());
        console.set_json_schema("{ \"table_name\": ".to_string());
        console.generate_ddl(DdlFlow::Manual).await;

        assert_eq!(backend.count("generate_ddl"), 0);
        assert_eq!(toast(&console).unwrap().1, Severity::Warning);
    }

    #[tokio::test]
    async fn test_manual_ddl_only_extracts_schema_first() {
        let (console, backend) = console_with(FakeBackend::default());
        console.clear_field(ManualField::JsonSchema);
        console.set_source_ddl("CREATE TABLE invoices (id INT NOT NULL, total DECIMAL(8,2))".to_string());

        console.generate_ddl(DdlFlow::Manual).await;

        assert_eq!(backend.count("generate_ddl"), 0);
        let json = console.store().read(|s| s.manual.json_schema().to_string());
        assert_eq!(
            SchemaDocument::parse(&json).unwrap().table_name(),
            Some("invoices")
        );
        assert_eq!(toast(&console).unwrap().1, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_hides_inflight_generation() {
        let (console, _) = console_with(FakeBackend::default().delay("generate", 200));
        browse_orders(&console).await;

        tokio::join!(console.generate_ddl(DdlFlow::Browse), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            console.load_schema().await;
        });

        assert!(!console.store().read(|s| s.browse.ddl.visible));
    }

    // ------------------------------------------------------------------------
    // AI augmentation
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_ai_missing_schema_skips_regeneration() {
        let (console, backend) = console_with(FakeBackend {
            augment_without_schema: true,
            ..FakeBackend::default()
        });
        browse_orders(&console).await;
        enable_ai(&console);

        console.augment_schema(DdlFlow::Browse).await;

        assert_eq!(backend.count("augment_schema"), 1);
        assert_eq!(backend.count("generate_ddl"), 0);
        assert_eq!(toast(&console).unwrap().1, Severity::Danger);
        assert!(!console.store().read(|s| s.overlay.is_visible()));
    }

    #[tokio::test]
    async fn test_ai_schema_regenerates_ddl() {
        let (console, backend) = console_with(FakeBackend::default());
        browse_orders(&console).await;
        enable_ai(&console);

        console.augment_schema(DdlFlow::Browse).await;

        let calls = backend.calls();
        assert_eq!(
            calls[calls.len() - 2..].to_vec(),
            vec!["augment_schema:llama-3.gguf", "generate_ddl:orders"]
        );
        let text = console.store().read(|s| s.browse.schema_text().to_string());
        assert!(text.contains("Commented by AI"));
        assert!(console.store().read(|s| s.browse.ddl.visible));
    }

    #[tokio::test]
    async fn test_ai_schema_staged_when_auto_regenerate_off() {
        let mut config = ConsoleConfig::default();
        config.ai.auto_regenerate = false;
        let (console, backend) = console_with_config(FakeBackend::default(), config);
        enable_ai(&console);

        console.augment_schema(DdlFlow::Manual).await;

        assert_eq!(backend.count("generate_ddl"), 0);
        let json = console.store().read(|s| s.manual.json_schema().to_string());
        assert!(json.contains("Commented by AI"));
        assert_eq!(toast(&console).unwrap().1, Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ai_result_dropped_after_selection_change() {
        let (console, backend) = console_with(FakeBackend::default().delay("augment", 200));
        browse_orders(&console).await;
        enable_ai(&console);

        tokio::join!(console.augment_schema(DdlFlow::Browse), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            console.table_changed("customers");
        });

        assert_eq!(backend.count("generate_ddl"), 0);
        assert!(!console.store().read(|s| s.browse.preview.is_ready()));
        assert_eq!(toast(&console).unwrap().1, Severity::Warning);
    }

    #[tokio::test]
    async fn test_ai_requires_toggle_and_model() {
        let (console, backend) = console_with(FakeBackend::default());
        browse_orders(&console).await;

        console.augment_schema(DdlFlow::Browse).await;
        console.augment_ddl(DdlFlow::Browse).await;

        assert_eq!(backend.count("augment"), 0);
        assert_eq!(toast(&console).unwrap().1, Severity::Warning);
    }

    #[tokio::test]
    async fn test_ai_ddl_answer_shown_as_info_toast() {
        let (console, backend) = console_with(FakeBackend::default());
        enable_ai(&console);

        console.augment_ddl(DdlFlow::Manual).await;

        assert_eq!(backend.count("augment_ddl"), 1);
        let toast = console
            .store()
            .read(|s| s.notifications.current().cloned())
            .unwrap();
        assert_eq!(toast.severity, Severity::Info);
        assert!(toast.message.starts_with("-- standardized\nCREATE TABLE employees"));
        assert_eq!(toast.duration, Duration::from_millis(8000));
    }

    #[tokio::test]
    async fn test_models_loaded_once() {
        let (console, backend) = console_with(FakeBackend {
            models: Some(vec!["a.gguf".to_string(), "b.gguf".to_string()]),
            ..FakeBackend::default()
        });
        console.load_models().await;
        console.load_models().await;

        assert_eq!(backend.count("list_models"), 1);
        assert_eq!(
            console.store().read(|s| s.ai.selected_model().map(str::to_string)),
            Some("a.gguf".to_string())
        );
    }

    #[tokio::test]
    async fn test_model_failure_keeps_actions_disabled() {
        let (console, _) = console_with(FakeBackend::default());
        console.load_models().await;
        console.set_ai_enabled(true);
        assert!(!console.store().read(|s| s.enablement().ai_actions));
    }

    // ------------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------------

    #[test]
    fn test_two_notifications_leave_one() {
        let (console, _) = console_with(FakeBackend::default());
        console.notify("first", Severity::Info);
        let second = console.notify("second", Severity::Danger);

        let (count, current) = console
            .store()
            .read(|s| (s.notifications.len(), s.notifications.current().map(|t| t.id)));
        assert_eq!(count, 1);
        assert_eq!(current, Some(second));
    }

    // ------------------------------------------------------------------------
    // Connection
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_connect_switches_to_browse_and_loads() {
        let (console, backend) = console_with(FakeBackend::default());
        console.edit_connection(|f| {
            f.set_system(Some(DbSystem::PostgreSql));
            f.host = "db.internal".to_string();
            f.database = "sales".to_string();
        });

        console.connect().await;

        assert_eq!(
            backend.calls(),
            vec!["connect:/connect_postgres:db.internal", "list_schemas:sales"]
        );
        let state = console.store().snapshot();
        assert_eq!(state.active_tab, Tab::Browse);
        assert!(state.connection.is_connected());
        assert_eq!(state.browse.database, "sales");
        assert!(state.enablement().schema_selector);
    }

    #[tokio::test]
    async fn test_refused_connection_stays_on_manual() {
        let (console, _) = console_with(FakeBackend {
            refuse_connection: true,
            ..FakeBackend::default()
        });
        console.edit_connection(|f| {
            f.set_system(Some(DbSystem::MySql));
            f.host = "localhost".to_string();
        });

        console.connect().await;

        let state = console.store().snapshot();
        assert_eq!(state.active_tab, Tab::Manual);
        assert_eq!(state.connection, ConnectionStatus::Disconnected);
        assert_eq!(toast(&console).unwrap().1, Severity::Danger);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_posted() {
        let (console, backend) = console_with(FakeBackend::default());
        console.connect().await;
        assert!(backend.calls().is_empty());
        assert_eq!(
            toast(&console).unwrap().0,
            "Please select a database system."
        );
    }

    #[tokio::test]
    async fn test_clear_connection_resets_everything() {
        let (console, backend) = console_with(FakeBackend::default());
        browse_orders(&console).await;
        console.select_tab(Tab::Browse);

        console.clear_connection().await;

        assert_eq!(backend.count("clear_connection"), 1);
        let state = console.store().snapshot();
        assert_eq!(state.active_tab, Tab::Manual);
        assert_eq!(state.browse.system, None);
        assert!(!state.browse.preview.is_ready());
        assert_eq!(state.connection_form, ConnectionForm::default());
    }
}
