//! Generated DDL pane with its download and AI actions
//!
//! One instance per flow. The pane renders from that flow's [`DdlPane`]
//! only, so the browse and manual panes never show each other's output.
//!
//! [`DdlPane`]: schemaport_console::DdlPane

use dioxus::prelude::*;
use schemaport_console::DdlFlow;
use schemaport_core::{ConsoleError, Severity};

use crate::components::inputs::{ActionButton, ButtonKind};
use crate::file_ops;
use crate::hooks::{run, use_console};
use crate::state::APP_STATE;

#[component]
pub fn DdlPreview(flow: DdlFlow) -> Element {
    let console = use_console();

    let state = APP_STATE.read();
    let pane = state.ddl_pane(flow);
    let visible = pane.visible;
    let generating = pane.generating;
    let ddl = pane.ddl_text().to_string();
    let download = pane.download().cloned();
    let enabled = state.enablement();
    let ai_hint = state.ai.disabled_hint().map(str::to_string);
    drop(state);

    let can_download = match flow {
        DdlFlow::Browse => enabled.browse_download,
        DdlFlow::Manual => enabled.manual_download,
    };

    let on_download = {
        let console = console.clone();
        move |_: ()| {
            let Some(download) = download.clone() else {
                return;
            };
            run(&console, |c| async move {
                match file_ops::save_download(&download).await {
                    Ok(path) => {
                        c.notify(format!("DDL saved to {}", path.display()), Severity::Success);
                    }
                    Err(ConsoleError::Cancelled) => tracing::debug!("Save cancelled by user"),
                    Err(err) => c.report(&err),
                }
            });
        }
    };

    let on_standardize = {
        let console = console.clone();
        move |_: ()| run(&console, move |c| async move { c.augment_ddl(flow).await })
    };

    rsx! {
        section {
            class: "panel ddl-panel",

            div {
                class: "panel-header",
                h3 { "BigQuery DDL" }
                div {
                    class: "panel-actions",
                    ActionButton {
                        label: "Standardize DDL",
                        kind: ButtonKind::Ai,
                        disabled: !enabled.ai_actions,
                        hint: ai_hint,
                        onclick: on_standardize,
                    }
                    ActionButton {
                        label: "Download",
                        kind: ButtonKind::Secondary,
                        disabled: !can_download,
                        hint: "Generate DDL first.".to_string(),
                        onclick: on_download,
                    }
                }
            }

            if generating {
                p { class: "muted", "Generating..." }
            } else if visible {
                pre { class: "code-block", "{ddl}" }
            } else {
                p { class: "muted", "No DDL generated yet." }
            }
        }
    }
}
