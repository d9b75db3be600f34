//! AI augmentation settings
//!
//! The AI buttons are enabled exactly when the AI toggle is on and a model
//! is selected. That rule is derived on every read, never stored.

use schemaport_core::ConsoleResult;

use crate::options::SelectOption;

/// Label of the disabled entry shown when the server has no models
pub const NO_MODELS_LABEL: &str = "No models found";

/// Label of the disabled entry shown when the model list failed to load
pub const MODELS_ERROR_LABEL: &str = "Error loading models";

/// State of the model list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelList {
    /// Not fetched yet
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<String>),
    Failed(String),
}

/// AI toggle, model list and model selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiSettings {
    pub enabled: bool,
    pub models: ModelList,
    selected: String,
}

impl AiSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the model list as loading; returns false if it was already requested
    pub fn begin_load(&mut self) -> bool {
        if !matches!(self.models, ModelList::NotLoaded) {
            return false;
        }
        self.models = ModelList::Loading;
        true
    }

    /// Store the model list; the first model becomes the selection
    pub fn apply_models(&mut self, result: ConsoleResult<Vec<String>>) {
        match result {
            Ok(models) => {
                self.selected = models.first().cloned().unwrap_or_default();
                self.models = ModelList::Loaded(models);
            }
            Err(err) => {
                self.selected.clear();
                self.models = ModelList::Failed(err.to_string());
            }
        }
    }

    /// Select a model; values not in the list clear the selection
    pub fn select_model(&mut self, model: &str) {
        let known = match &self.models {
            ModelList::Loaded(models) => models.iter().any(|m| m == model),
            _ => false,
        };
        if known {
            self.selected = model.to_string();
        } else {
            self.selected.clear();
        }
    }

    /// Selected model, `None` when nothing usable is selected
    pub fn selected_model(&self) -> Option<&str> {
        if self.selected.is_empty() {
            None
        } else {
            Some(&self.selected)
        }
    }

    /// Dropdown entries for the model selector
    pub fn model_options(&self) -> Vec<SelectOption> {
        match &self.models {
            ModelList::NotLoaded | ModelList::Loading => {
                vec![SelectOption::disabled("", "Loading models...")]
            }
            ModelList::Loaded(models) if models.is_empty() => {
                vec![SelectOption::disabled("", NO_MODELS_LABEL)]
            }
            ModelList::Loaded(models) => models
                .iter()
                .map(|m| SelectOption::new(m.as_str(), m.as_str()))
                .collect(),
            ModelList::Failed(_) => vec![SelectOption::disabled("", MODELS_ERROR_LABEL)],
        }
    }

    /// Whether the AI action buttons are enabled
    pub fn actions_enabled(&self) -> bool {
        self.enabled && self.selected_model().is_some()
    }

    /// Hover text explaining a disabled AI button
    pub fn disabled_hint(&self) -> Option<&'static str> {
        if !self.enabled {
            Some("Turn on \"Use AI\" to enable this action.")
        } else if self.selected_model().is_none() {
            Some("Select an AI model to enable this action.")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaport_core::ConsoleError;

    fn loaded(models: &[&str]) -> AiSettings {
        let mut ai = AiSettings::new();
        ai.begin_load();
        ai.apply_models(Ok(models.iter().map(|m| m.to_string()).collect()));
        ai
    }

    #[test]
    fn test_enablement_truth_table() {
        for enabled in [false, true] {
            for model in [None, Some("llama-3.gguf")] {
                let mut ai = loaded(&["llama-3.gguf"]);
                ai.enabled = enabled;
                ai.select_model(model.unwrap_or(""));
                assert_eq!(
                    ai.actions_enabled(),
                    enabled && model.is_some(),
                    "enabled={} model={:?}",
                    enabled,
                    model
                );
                assert_eq!(ai.disabled_hint().is_none(), ai.actions_enabled());
            }
        }
    }

    #[test]
    fn test_first_model_selected_on_load() {
        let ai = loaded(&["a.gguf", "b.gguf"]);
        assert_eq!(ai.selected_model(), Some("a.gguf"));
        assert_eq!(ai.model_options().len(), 2);
    }

    #[test]
    fn test_empty_list_renders_disabled_placeholder() {
        let mut ai = loaded(&[]);
        ai.enabled = true;
        let options = ai.model_options();
        assert_eq!(options, vec![SelectOption::disabled("", NO_MODELS_LABEL)]);
        assert!(!ai.actions_enabled());
    }

    #[test]
    fn test_failed_load_renders_error_placeholder() {
        let mut ai = AiSettings::new();
        ai.begin_load();
        ai.enabled = true;
        ai.apply_models(Err(ConsoleError::transport("refused")));
        assert_eq!(ai.model_options()[0].label, MODELS_ERROR_LABEL);
        assert!(!ai.actions_enabled());
    }

    #[test]
    fn test_models_requested_once() {
        let mut ai = AiSettings::new();
        assert!(ai.begin_load());
        assert!(!ai.begin_load());
        ai.apply_models(Ok(vec![]));
        assert!(!ai.begin_load());
    }
}
