//! # UI Components
//!
//! Reusable Dioxus components for the console pages:
//! - **Inputs**: text fields, editors, dropdowns, toggles and buttons
//! - **Toast**: the notification host
//! - **Overlay**: the blocking "working" overlay
//! - **DDL preview**: generated DDL with download and AI actions
//! - **AI panel**: "Use AI" toggle and model selector
//! - **Target form**: BigQuery destination naming

pub mod ai_panel;
pub mod ddl_preview;
pub mod inputs;
pub mod overlay;
pub mod target_form;
pub mod toast;

pub use ai_panel::AiPanel;
pub use ddl_preview::DdlPreview;
pub use inputs::{ActionButton, ButtonKind, Select, TextArea, TextInput, Toggle};
pub use overlay::LoadingOverlay;
pub use target_form::TargetForm;
pub use toast::ToastHost;
