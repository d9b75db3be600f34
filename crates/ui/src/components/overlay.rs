//! Blocking overlay shown while DDL generation or an AI request is running

use dioxus::prelude::*;

use crate::state::APP_STATE;

#[component]
pub fn LoadingOverlay() -> Element {
    let state = APP_STATE.read();
    if !state.overlay.is_visible() {
        return rsx! {};
    }
    let message = state.overlay.message().unwrap_or("Working...").to_string();
    drop(state);

    rsx! {
        div {
            class: "overlay",
            div {
                class: "overlay-box",
                div { class: "spinner" }
                p { "{message}" }
            }
        }
    }
}
