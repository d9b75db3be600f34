//! # Input Components
//!
//! Form controls shared by the console pages:
//! - **TextInput**: single-line text input
//! - **TextArea**: multi-line editor for schemas and DDL
//! - **Select**: dropdown fed with [`SelectOption`] lists from the console
//! - **Toggle**: on/off switch
//! - **ActionButton**: button with an optional disabled hint

use dioxus::prelude::*;
use schemaport_console::SelectOption;

// ============================================================================
// Text Input Component
// ============================================================================

/// Properties for TextInput component
#[derive(Props, Clone, PartialEq)]
pub struct TextInputProps {
    /// Input value
    pub value: String,

    /// Label text
    #[props(default)]
    pub label: Option<String>,

    /// Placeholder text
    #[props(default)]
    pub placeholder: Option<String>,

    /// Help text shown below the input
    #[props(default)]
    pub help_text: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    /// Input type (text, password, number)
    #[props(default = "text".to_string())]
    pub input_type: String,

    /// Change handler
    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Enter key handler
    #[props(default)]
    pub on_enter: EventHandler<()>,
}

/// Single-line text input component
#[component]
pub fn TextInput(props: TextInputProps) -> Element {
    let input_class = field_class("input", props.disabled);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label { class: "input-label", "{label}" }
            }

            input {
                class: "{input_class}",
                r#type: "{props.input_type}",
                value: "{props.value}",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                disabled: props.disabled,
                oninput: move |e| props.on_change.call(e.value()),
                onkeydown: move |e| {
                    if e.key() == Key::Enter {
                        props.on_enter.call(());
                    }
                },
            }

            if let Some(help) = &props.help_text {
                p { class: "input-help", "{help}" }
            }
        }
    }
}

// ============================================================================
// Text Area Component
// ============================================================================

/// Properties for TextArea component
#[derive(Props, Clone, PartialEq)]
pub struct TextAreaProps {
    pub value: String,

    #[props(default)]
    pub label: Option<String>,

    #[props(default)]
    pub placeholder: Option<String>,

    /// Number of visible rows
    #[props(default = 10)]
    pub rows: usize,

    #[props(default = false)]
    pub readonly: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,

    /// Shows a "Clear" link next to the label when set
    #[props(default)]
    pub on_clear: Option<EventHandler<()>>,
}

/// Multi-line editor, monospaced for JSON and SQL
#[component]
pub fn TextArea(props: TextAreaProps) -> Element {
    let on_clear = props.on_clear;

    rsx! {
        div {
            class: "input-group",

            if props.label.is_some() || on_clear.is_some() {
                div {
                    class: "input-label-row",
                    if let Some(label) = &props.label {
                        label { class: "input-label", "{label}" }
                    }
                    if let Some(clear) = on_clear {
                        button {
                            class: "link-button",
                            r#type: "button",
                            onclick: move |_| clear.call(()),
                            "Clear"
                        }
                    }
                }
            }

            textarea {
                class: "input code",
                rows: "{props.rows}",
                spellcheck: "false",
                placeholder: props.placeholder.as_deref().unwrap_or(""),
                readonly: props.readonly,
                value: "{props.value}",
                oninput: move |e| props.on_change.call(e.value()),
            }
        }
    }
}

// ============================================================================
// Select Component
// ============================================================================

/// Properties for Select component
#[derive(Props, Clone, PartialEq)]
pub struct SelectProps {
    /// Selected value, empty for the placeholder entry
    pub value: String,

    /// Entries, placeholder included
    pub options: Vec<SelectOption>,

    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<String>,
}

/// Dropdown select component
#[component]
pub fn Select(props: SelectProps) -> Element {
    let select_class = field_class("input select", props.disabled);

    rsx! {
        div {
            class: "input-group",

            if let Some(label) = &props.label {
                label { class: "input-label", "{label}" }
            }

            select {
                class: "{select_class}",
                disabled: props.disabled,
                onchange: move |e| props.on_change.call(e.value()),

                for option in &props.options {
                    option {
                        key: "{option.value}-{option.label}",
                        value: "{option.value}",
                        disabled: option.disabled,
                        selected: props.value == option.value,
                        "{option.label}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Toggle Component
// ============================================================================

/// Properties for Toggle component
#[derive(Props, Clone, PartialEq)]
pub struct ToggleProps {
    pub checked: bool,

    #[props(default)]
    pub label: Option<String>,

    #[props(default = false)]
    pub disabled: bool,

    #[props(default)]
    pub on_change: EventHandler<bool>,
}

/// Switch-style toggle
#[component]
pub fn Toggle(props: ToggleProps) -> Element {
    let track_class = if props.checked {
        "toggle-track on"
    } else {
        "toggle-track"
    };

    rsx! {
        label {
            class: if props.disabled { "toggle disabled" } else { "toggle" },
            input {
                r#type: "checkbox",
                class: "sr-only",
                checked: props.checked,
                disabled: props.disabled,
                onchange: move |_| {
                    if !props.disabled {
                        props.on_change.call(!props.checked);
                    }
                },
            }
            span { class: "{track_class}", span { class: "toggle-thumb" } }
            if let Some(label) = &props.label {
                span { class: "toggle-label", "{label}" }
            }
        }
    }
}

// ============================================================================
// Action Button Component
// ============================================================================

/// Visual weight of an [`ActionButton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonKind {
    #[default]
    Primary,
    Secondary,
    Ai,
    Danger,
}

impl ButtonKind {
    fn class(&self) -> &'static str {
        match self {
            ButtonKind::Primary => "btn btn-primary",
            ButtonKind::Secondary => "btn btn-secondary",
            ButtonKind::Ai => "btn btn-ai",
            ButtonKind::Danger => "btn btn-danger",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ActionButtonProps {
    pub label: String,

    #[props(default)]
    pub kind: ButtonKind,

    #[props(default = false)]
    pub disabled: bool,

    /// Tooltip explaining why the button is disabled
    #[props(default)]
    pub hint: Option<String>,

    #[props(default)]
    pub onclick: EventHandler<()>,
}

#[component]
pub fn ActionButton(props: ActionButtonProps) -> Element {
    let class = props.kind.class();
    let title = if props.disabled {
        props.hint.clone().unwrap_or_default()
    } else {
        String::new()
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: props.disabled,
            title: "{title}",
            onclick: move |_| {
                if !props.disabled {
                    props.onclick.call(());
                }
            },
            "{props.label}"
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Append the disabled modifier to a base class
fn field_class(base: &str, disabled: bool) -> String {
    if disabled {
        format!("{} disabled", base)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_class() {
        assert_eq!(field_class("input", false), "input");
        assert_eq!(field_class("input select", true), "input select disabled");
    }

    #[test]
    fn test_button_kind_classes() {
        assert_eq!(ButtonKind::default().class(), "btn btn-primary");
        assert!(ButtonKind::Ai.class().contains("btn-ai"));
    }
}
