//! # Schemaport UI
//!
//! Dioxus Desktop UI for the Schemaport migration console.
//!
//! Components are a projection of [`schemaport_console::ConsoleState`]:
//! they render from [`APP_STATE`] and route every user action through the
//! [`AppConsole`] controller provided as root context.

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod hooks;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use app::App;
pub use state::{APP_STATE, AppConsole, GlobalStore, init_app_state};

use schemaport_client::HttpBackend;
use schemaport_console::Console;
use schemaport_core::ConsoleConfig;
use std::sync::Arc;

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stylesheet embedded into the window head
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the desktop console against `backend`
///
/// ```rust,ignore
/// let config = ConsoleConfig::load()?;
/// let backend = HttpBackend::from_config(&config)?;
/// schemaport_ui::launch(config, backend);
/// ```
pub fn launch(config: ConsoleConfig, backend: HttpBackend) {
    tracing::info!(
        "Starting {} v{} against {}",
        config.window.title,
        VERSION,
        backend.base_url()
    );

    init_app_state(config.window.initial_tab);

    let window = &config.window;
    let title = window.title.clone();
    let (width, height) = (window.width, window.height);
    let console: AppConsole = Console::new(Arc::new(backend), GlobalStore, config);

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(title)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(width, height))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(900.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .with_context(console)
        .launch(App);
}
