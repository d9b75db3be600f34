//! Option records for dropdowns
//!
//! Selectors are rendered from lists of [`SelectOption`] values rather than
//! from markup, so table and schema names never need escaping.

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Option value; empty means "no selection"
    pub value: String,
    /// Display label
    pub label: String,
    /// Whether disabled
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new select option
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Create a disabled option
    pub fn disabled(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: true,
        }
    }

    /// Create the leading "no selection" entry
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self::new("", label)
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

/// Build a dropdown: the placeholder first, then one option per item
pub fn option_list<S: AsRef<str>>(placeholder: &str, items: &[S]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(placeholder))
        .chain(
            items
                .iter()
                .map(|item| SelectOption::new(item.as_ref(), item.as_ref())),
        )
        .collect()
}
