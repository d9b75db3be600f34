//! "Use AI" toggle and model selector
//!
//! The model list is fetched once, when the panel first mounts.

use dioxus::prelude::*;

use crate::components::inputs::{Select, Toggle};
use crate::hooks::use_console;
use crate::state::APP_STATE;

#[component]
pub fn AiPanel() -> Element {
    let console = use_console();

    {
        let console = console.clone();
        use_future(move || {
            let console = console.clone();
            async move { console.load_models().await }
        });
    }

    let state = APP_STATE.read();
    let enabled = state.ai.enabled;
    let selected = state.ai.selected_model().unwrap_or_default().to_string();
    let options = state.ai.model_options();
    drop(state);

    let on_toggle = {
        let console = console.clone();
        move |on: bool| console.set_ai_enabled(on)
    };
    let on_model = move |model: String| console.select_model(&model);

    rsx! {
        div {
            class: "ai-panel",
            Toggle {
                checked: enabled,
                label: "Use AI".to_string(),
                on_change: on_toggle,
            }
            Select {
                value: selected,
                options: options,
                disabled: !enabled,
                on_change: on_model,
            }
        }
    }
}
