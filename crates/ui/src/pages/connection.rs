//! Connection Panel
//!
//! Source database connection form, always visible in the sidebar. A
//! successful connect switches to the browse tab and loads the first level.

use dioxus::prelude::*;
use schemaport_console::{ConnectionStatus, SelectOption};
use schemaport_core::DbSystem;

use crate::components::inputs::{ActionButton, ButtonKind, Select, TextInput};
use crate::hooks::{run, use_console};
use crate::state::APP_STATE;

/// Placeholder entry of the system dropdowns
pub const SYSTEM_PLACEHOLDER: &str = "Select database system...";

/// Dropdown entries for the supported systems
pub fn system_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(SYSTEM_PLACEHOLDER))
        .chain(
            DbSystem::ALL
                .iter()
                .map(|s| SelectOption::new(s.as_str(), s.display_name())),
        )
        .collect()
}

#[component]
pub fn ConnectionPanel() -> Element {
    let console = use_console();

    let state = APP_STATE.read();
    let form = state.connection_form.clone();
    let status = state.connection.clone();
    let can_clear = state.enablement().clear_connection;
    drop(state);

    let connecting = matches!(status, ConnectionStatus::Connecting);
    let status_class = if status.is_connected() {
        "status connected"
    } else {
        "status"
    };
    let database_label = if form.system == Some(DbSystem::Oracle) {
        "Service name"
    } else {
        "Database"
    };

    let on_connect = {
        let console = console.clone();
        move |_: ()| run(&console, |c| async move { c.connect().await })
    };
    let on_clear = {
        let console = console.clone();
        move |_: ()| run(&console, |c| async move { c.clear_connection().await })
    };

    let c = console.clone();
    let on_system = move |v: String| c.edit_connection(|f| f.set_system(DbSystem::parse(&v)));
    let c = console.clone();
    let on_host = move |v: String| c.edit_connection(|f| f.host = v);
    let c = console.clone();
    let on_port = move |v: String| c.edit_connection(|f| f.port = v);
    let c = console.clone();
    let on_username = move |v: String| c.edit_connection(|f| f.username = v);
    let c = console.clone();
    let on_password = move |v: String| c.edit_connection(|f| f.password = v);
    let c = console.clone();
    let on_database = move |v: String| c.edit_connection(|f| f.database = v);

    rsx! {
        section {
            class: "panel connection-panel",

            h3 { "Source connection" }
            p { class: "{status_class}", "{status.describe()}" }

            Select {
                label: "Database system".to_string(),
                value: form.system.map(|s| s.as_str().to_string()).unwrap_or_default(),
                options: system_options(),
                disabled: connecting,
                on_change: on_system,
            }
            TextInput {
                label: "Host".to_string(),
                value: form.host.clone(),
                placeholder: "localhost".to_string(),
                disabled: connecting,
                on_change: on_host,
            }
            TextInput {
                label: "Port".to_string(),
                value: form.port.clone(),
                disabled: connecting,
                on_change: on_port,
            }
            TextInput {
                label: "Username".to_string(),
                value: form.username.clone(),
                disabled: connecting,
                on_change: on_username,
            }
            TextInput {
                label: "Password".to_string(),
                value: form.password.clone(),
                input_type: "password".to_string(),
                disabled: connecting,
                on_change: on_password,
            }
            TextInput {
                label: database_label.to_string(),
                value: form.database.clone(),
                disabled: connecting,
                on_change: on_database,
            }

            div {
                class: "panel-actions",
                ActionButton {
                    label: if connecting { "Connecting...".to_string() } else { "Connect".to_string() },
                    disabled: connecting,
                    onclick: on_connect,
                }
                ActionButton {
                    label: "Clear connection",
                    kind: ButtonKind::Danger,
                    disabled: !can_clear,
                    onclick: on_clear,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_options() {
        let options = system_options();
        assert_eq!(options.len(), 5);
        assert!(options[0].is_placeholder());
        assert_eq!(options[1].value, "mysql");
        assert_eq!(options[4].label, "Oracle");
    }
}
