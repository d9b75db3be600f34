//! Destination naming fields of a flow

use dioxus::prelude::*;
use schemaport_console::DdlFlow;

use crate::components::inputs::TextInput;
use crate::hooks::use_console;
use crate::state::APP_STATE;

#[component]
pub fn TargetForm(flow: DdlFlow) -> Element {
    let console = use_console();
    let target = APP_STATE.read().target(flow).clone();

    let c = console.clone();
    let on_project = move |v: String| c.edit_target(flow, |t| t.project_id = v);
    let c = console.clone();
    let on_dataset = move |v: String| c.edit_target(flow, |t| t.dataset_id = v);
    let on_table = move |v: String| console.edit_target(flow, |t| t.table_name = v);

    rsx! {
        div {
            class: "target-form",
            TextInput {
                label: "BigQuery project".to_string(),
                value: target.project_id,
                placeholder: "my-gcp-project".to_string(),
                on_change: on_project,
            }
            TextInput {
                label: "Dataset".to_string(),
                value: target.dataset_id,
                placeholder: "analytics".to_string(),
                on_change: on_dataset,
            }
            TextInput {
                label: "Table name".to_string(),
                value: target.table_name,
                on_change: on_table,
            }
        }
    }
}
