//! Toast notifications
//!
//! At most one toast is shown. Each toast is keyed by its id, so a newer
//! notification remounts [`ToastItem`] and restarts the dismiss timer.

use dioxus::prelude::*;
use schemaport_core::Severity;

use crate::hooks::use_console;
use crate::state::APP_STATE;

/// Fixed container in the top-right corner, created with the first toast
#[component]
pub fn ToastHost() -> Element {
    let state = APP_STATE.read();
    let container = state.notifications.container().cloned();
    let toast = state.notifications.current().cloned();
    drop(state);

    let Some(container) = container else {
        return rsx! {};
    };

    rsx! {
        div {
            id: "toast-{container.id}",
            class: "toast-container",
            style: "top: {container.top}; right: {container.right}; z-index: {container.z_index};",

            if let Some(toast) = toast {
                ToastItem {
                    key: "{toast.id}",
                    toast_id: toast.id,
                    message: toast.message,
                    severity: toast.severity,
                    duration_ms: toast.duration.as_millis() as u64,
                }
            }
        }
    }
}

#[component]
fn ToastItem(toast_id: u64, message: String, severity: Severity, duration_ms: u64) -> Element {
    let console = use_console();

    {
        let console = console.clone();
        use_future(move || {
            let console = console.clone();
            async move {
                tokio::time::sleep(std::time::Duration::from_millis(duration_ms)).await;
                console.dismiss(toast_id);
            }
        });
    }

    let class = toast_class(severity);

    rsx! {
        div {
            class: "{class}",
            role: "alert",
            span { class: "toast-message", "{message}" }
            button {
                class: "toast-close",
                r#type: "button",
                title: "Close",
                onclick: move |_| console.dismiss(toast_id),
                "×"
            }
        }
    }
}

fn toast_class(severity: Severity) -> String {
    format!("toast toast-{}", severity.as_str())
}
