//! Application state of the console
//!
//! [`ConsoleState`] is the single source of truth the UI renders from.
//! Button enablement is derived from it on demand through
//! [`ConsoleState::enablement`] and never stored.

use schemaport_core::{Tab, TargetNaming};

use crate::ai::AiSettings;
use crate::connection::{ConnectionForm, ConnectionStatus};
use crate::ddl::{DdlFlow, DdlPane};
use crate::manual::ManualState;
use crate::notification::NotificationCenter;
use crate::overlay::OverlayState;
use crate::selection::BrowseState;

// ============================================================================
// Enablement
// ============================================================================

/// Enabled/visible flags of the console's controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enablement {
    /// Schema dropdown shown (schema-qualified systems only)
    pub schema_selector: bool,
    /// "Get schema" button
    pub fetch_schema: bool,
    /// Browse "Generate DDL" button
    pub browse_generate: bool,
    /// Manual "Generate DDL" button
    pub manual_generate: bool,
    /// "Add Comments" and "Standardize DDL" buttons of both flows
    pub ai_actions: bool,
    /// Browse download button
    pub browse_download: bool,
    /// Manual download button
    pub manual_download: bool,
    /// "Clear connection" button
    pub clear_connection: bool,
}

// ============================================================================
// Console State
// ============================================================================

/// Main console state container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleState {
    /// Currently active tab
    pub active_tab: Tab,
    /// Connection form contents
    pub connection_form: ConnectionForm,
    /// Connection status
    pub connection: ConnectionStatus,
    /// Browse tab
    pub browse: BrowseState,
    /// Manual tab
    pub manual: ManualState,
    /// AI toggle and model selection
    pub ai: AiSettings,
    /// Current toast
    pub notifications: NotificationCenter,
    /// Blocking overlay
    pub overlay: OverlayState,
}

impl ConsoleState {
    /// Create new console state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state that opens on `tab`
    pub fn with_tab(tab: Tab) -> Self {
        Self {
            active_tab: tab,
            ..Self::default()
        }
    }

    /// Derive control enablement from the current state
    pub fn enablement(&self) -> Enablement {
        let browse = &self.browse;
        let manual = &self.manual;
        Enablement {
            schema_selector: browse.uses_schemas(),
            fetch_schema: !browse.preview.loading,
            browse_generate: browse.preview.is_ready() && !browse.ddl.generating,
            manual_generate: !manual.ddl.generating
                && (!manual.json_schema().trim().is_empty()
                    || !manual.source_ddl().trim().is_empty()),
            ai_actions: self.ai.actions_enabled(),
            browse_download: browse.ddl.download().is_some(),
            manual_download: manual.ddl.download().is_some(),
            clear_connection: !matches!(self.connection, ConnectionStatus::Connecting),
        }
    }

    pub fn ddl_pane(&self, flow: DdlFlow) -> &DdlPane {
        match flow {
            DdlFlow::Browse => &self.browse.ddl,
            DdlFlow::Manual => &self.manual.ddl,
        }
    }

    pub fn ddl_pane_mut(&mut self, flow: DdlFlow) -> &mut DdlPane {
        match flow {
            DdlFlow::Browse => &mut self.browse.ddl,
            DdlFlow::Manual => &mut self.manual.ddl,
        }
    }

    pub fn target(&self, flow: DdlFlow) -> &TargetNaming {
        match flow {
            DdlFlow::Browse => &self.browse.target,
            DdlFlow::Manual => &self.manual.target,
        }
    }

    pub fn target_mut(&mut self, flow: DdlFlow) -> &mut TargetNaming {
        match flow {
            DdlFlow::Browse => &mut self.browse.target,
            DdlFlow::Manual => &mut self.manual.target,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
