//! Manual Entry Page
//!
//! JSON schema and source DDL editors. Either one is enough to generate DDL:
//! with only a source statement the schema is extracted first.

use dioxus::prelude::*;
use schemaport_console::{DdlFlow, ManualField};

use crate::components::ddl_preview::DdlPreview;
use crate::components::inputs::{ActionButton, ButtonKind, TextArea};
use crate::components::target_form::TargetForm;
use crate::hooks::{run, use_console};
use crate::state::APP_STATE;

#[component]
pub fn ManualPage() -> Element {
    let console = use_console();

    let state = APP_STATE.read();
    let json_schema = state.manual.json_schema().to_string();
    let source_ddl = state.manual.source_ddl().to_string();
    let enabled = state.enablement();
    let ai_hint = state.ai.disabled_hint().map(str::to_string);
    drop(state);

    let has_json = !json_schema.trim().is_empty();
    let has_ddl = !source_ddl.trim().is_empty();

    let c = console.clone();
    let on_json = move |text: String| c.set_json_schema(text);
    let c = console.clone();
    let on_clear_json = move |_: ()| c.clear_field(ManualField::JsonSchema);
    let c = console.clone();
    let on_ddl = move |text: String| c.set_source_ddl(text);
    let c = console.clone();
    let on_clear_ddl = move |_: ()| c.clear_field(ManualField::SourceDdl);
    let c = console.clone();
    let on_extract = move |_: ()| c.extract_schema();

    let c = console.clone();
    let on_generate = move |_: ()| run(&c, |c| async move { c.generate_ddl(DdlFlow::Manual).await });
    let on_comments =
        move |_: ()| run(&console, |c| async move { c.augment_schema(DdlFlow::Manual).await });

    rsx! {
        div {
            class: "page manual-page",

            div {
                class: "editor-grid",

                section {
                    class: "panel",
                    TextArea {
                        label: "JSON schema".to_string(),
                        value: json_schema,
                        rows: 16,
                        on_change: on_json,
                        on_clear: on_clear_json,
                    }
                    div {
                        class: "panel-actions",
                        ActionButton {
                            label: "Add Comments",
                            kind: ButtonKind::Ai,
                            disabled: !enabled.ai_actions || !has_json,
                            hint: ai_hint.unwrap_or_else(|| "Enter a JSON schema first.".to_string()),
                            onclick: on_comments,
                        }
                    }
                }

                section {
                    class: "panel",
                    TextArea {
                        label: "Source DDL".to_string(),
                        value: source_ddl,
                        rows: 16,
                        on_change: on_ddl,
                        on_clear: on_clear_ddl,
                    }
                    div {
                        class: "panel-actions",
                        ActionButton {
                            label: "Extract Schema",
                            kind: ButtonKind::Secondary,
                            disabled: !has_ddl,
                            hint: "Enter a CREATE TABLE statement first.".to_string(),
                            onclick: on_extract,
                        }
                    }
                }
            }

            section {
                class: "panel",
                h3 { "Destination" }
                TargetForm { flow: DdlFlow::Manual }
                div {
                    class: "panel-actions",
                    ActionButton {
                        label: "Generate DDL",
                        disabled: !enabled.manual_generate,
                        hint: "Enter a JSON schema or a source DDL statement.".to_string(),
                        onclick: on_generate,
                    }
                }
            }

            DdlPreview { flow: DdlFlow::Manual }
        }
    }
}
