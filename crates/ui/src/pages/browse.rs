//! Browse Page
//!
//! The selector cascade over a connected source: system, database, schema
//! (schema-qualified systems only), table, then the fetched schema preview
//! and its DDL pane.

use dioxus::prelude::*;
use schemaport_console::DdlFlow;
use schemaport_core::DbSystem;

use crate::components::ddl_preview::DdlPreview;
use crate::components::inputs::{ActionButton, ButtonKind, Select, TextInput};
use crate::components::target_form::TargetForm;
use crate::hooks::{run, use_console};
use crate::pages::connection::system_options;
use crate::state::APP_STATE;

#[component]
pub fn BrowsePage() -> Element {
    let console = use_console();

    let state = APP_STATE.read();
    let browse = &state.browse;
    let system = browse.system;
    let schema_label = selector_label("Schema", browse.schemas.loading);
    let schema_value = browse.schemas.value().to_string();
    let schema_options = browse.schemas.options();
    let table_label = selector_label("Table", browse.tables.loading);
    let table_value = browse.tables.value().to_string();
    let table_options = browse.tables.options();
    let preview_loading = browse.preview.loading;
    let preview_text = browse.schema_text().to_string();
    let enabled = state.enablement();
    let ai_hint = state.ai.disabled_hint().map(str::to_string);
    drop(state);

    // The draft follows the committed database whenever the cascade changes it
    let committed_database = use_memo(|| APP_STATE.read().browse.database.clone());
    let mut database = use_signal(|| committed_database.peek().clone());
    use_effect(move || database.set(committed_database()));

    let c = console.clone();
    let on_system = move |v: String| c.system_changed(DbSystem::parse(&v));

    let load_database = {
        let console = console.clone();
        move || {
            let db = database.read().clone();
            run(&console, |c| async move { c.database_changed(&db).await });
        }
    };
    let on_database_enter = {
        let load = load_database.clone();
        move |_: ()| load()
    };
    let on_database_load = move |_: ()| load_database();

    let c = console.clone();
    let on_schema = move |v: String| run(&c, |c| async move { c.schema_changed(&v).await });
    let c = console.clone();
    let on_table = move |v: String| c.table_changed(&v);

    let c = console.clone();
    let on_fetch = move |_: ()| run(&c, |c| async move { c.load_schema().await });
    let c = console.clone();
    let on_generate = move |_: ()| run(&c, |c| async move { c.generate_ddl(DdlFlow::Browse).await });
    let on_comments =
        move |_: ()| run(&console, |c| async move { c.augment_schema(DdlFlow::Browse).await });

    rsx! {
        div {
            class: "page browse-page",

            section {
                class: "panel",
                h3 { "Source table" }

                div {
                    class: "form-row",
                    Select {
                        label: "Database system".to_string(),
                        value: system.map(|s| s.as_str().to_string()).unwrap_or_default(),
                        options: system_options(),
                        on_change: on_system,
                    }
                    div {
                        class: "inline-field",
                        TextInput {
                            label: "Database".to_string(),
                            value: database.read().clone(),
                            help_text: "Press Enter or Load to list its contents.".to_string(),
                            on_change: move |v: String| database.set(v),
                            on_enter: on_database_enter,
                        }
                        ActionButton {
                            label: "Load",
                            kind: ButtonKind::Secondary,
                            onclick: on_database_load,
                        }
                    }
                }

                div {
                    class: "form-row",
                    if enabled.schema_selector {
                        Select {
                            label: schema_label,
                            value: schema_value,
                            options: schema_options,
                            on_change: on_schema,
                        }
                    }
                    Select {
                        label: table_label,
                        value: table_value,
                        options: table_options,
                        on_change: on_table,
                    }
                }

                div {
                    class: "panel-actions",
                    ActionButton {
                        label: if preview_loading { "Loading schema...".to_string() } else { "Get Schema".to_string() },
                        disabled: !enabled.fetch_schema,
                        onclick: on_fetch,
                    }
                }
            }

            section {
                class: "panel",
                div {
                    class: "panel-header",
                    h3 { "Table schema" }
                    ActionButton {
                        label: "Add Comments",
                        kind: ButtonKind::Ai,
                        disabled: !enabled.ai_actions || !enabled.browse_generate,
                        hint: ai_hint.unwrap_or_else(|| "Fetch a table schema first.".to_string()),
                        onclick: on_comments,
                    }
                }
                if preview_text.is_empty() {
                    p { class: "muted", "Select a table and click Get Schema." }
                } else {
                    pre { class: "code-block", "{preview_text}" }
                }
            }

            section {
                class: "panel",
                h3 { "Destination" }
                TargetForm { flow: DdlFlow::Browse }
                div {
                    class: "panel-actions",
                    ActionButton {
                        label: "Generate DDL",
                        disabled: !enabled.browse_generate,
                        hint: "Fetch a table schema first.".to_string(),
                        onclick: on_generate,
                    }
                }
            }

            DdlPreview { flow: DdlFlow::Browse }
        }
    }
}

/// Dropdown label, marked while its list is being fetched
fn selector_label(name: &str, loading: bool) -> String {
    if loading {
        format!("{} (loading...)", name)
    } else {
        name.to_string()
    }
}
