//! Main Application Component for the Schemaport console
//!
//! Layout: a header with the AI controls, a sidebar with the connection
//! panel, and the tabbed main area. Toasts and the blocking overlay sit on
//! top of everything.

use dioxus::prelude::*;
use schemaport_core::Tab;

use crate::components::{AiPanel, LoadingOverlay, ToastHost};
use crate::hooks::use_console;
use crate::pages::{BrowsePage, ConnectionPanel, ManualPage};
use crate::state::APP_STATE;

/// Tabs in display order
const TABS: [Tab; 2] = [Tab::Manual, Tab::Browse];

// ============================================================================
// Main App Component
// ============================================================================

/// Root application component
#[component]
pub fn App() -> Element {
    use_effect(|| {
        let tab = APP_STATE.peek().active_tab;
        tracing::info!("Schemaport UI initialized on the {} tab", tab.as_str());
    });

    rsx! {
        div {
            class: "app-container",

            Header {}

            div {
                class: "app-body",
                aside {
                    class: "sidebar",
                    ConnectionPanel {}
                }
                MainContent {}
            }

            ToastHost {}
            LoadingOverlay {}
        }
    }
}

// ============================================================================
// Header Component
// ============================================================================

#[component]
fn Header() -> Element {
    let console = use_console();
    let title = console.config().window.title.clone();

    rsx! {
        header {
            class: "app-header",
            div {
                class: "brand",
                span { class: "brand-name", "{title}" }
                span { class: "brand-version", "v{crate::VERSION}" }
            }
            div { class: "spacer" }
            AiPanel {}
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Tab bar plus the active page
#[component]
fn MainContent() -> Element {
    let active = APP_STATE.read().active_tab;

    rsx! {
        main {
            class: "main-content",

            nav {
                class: "tab-bar",
                for tab in TABS {
                    TabButton { key: "{tab.as_str()}", tab: tab, active: active == tab }
                }
            }

            match active {
                Tab::Manual => rsx! { ManualPage {} },
                Tab::Browse => rsx! { BrowsePage {} },
            }
        }
    }
}

#[component]
fn TabButton(tab: Tab, active: bool) -> Element {
    let console = use_console();

    rsx! {
        button {
            class: if active { "tab active" } else { "tab" },
            r#type: "button",
            onclick: move |_| console.select_tab(tab),
            "{tab.display_name()}"
        }
    }
}
