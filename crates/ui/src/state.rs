//! Application State for the Schemaport UI
//!
//! The whole console state lives in one Dioxus 0.7 global signal. Components
//! read it directly to render; controllers reach it through [`GlobalStore`].

use dioxus::prelude::*;
use schemaport_client::HttpBackend;
use schemaport_console::{Console, ConsoleState, StateStore};
use schemaport_core::Tab;
use std::sync::OnceLock;

static INITIAL_TAB: OnceLock<Tab> = OnceLock::new();

/// Global application state
pub static APP_STATE: GlobalSignal<ConsoleState> =
    Signal::global(|| ConsoleState::with_tab(INITIAL_TAB.get().copied().unwrap_or_default()));

/// Set the tab the state opens on; call once before launch
pub fn init_app_state(initial_tab: Tab) {
    if INITIAL_TAB.set(initial_tab).is_err() {
        tracing::debug!("Initial tab already set; keeping the first value");
    }
}

/// The console controller used by every component
pub type AppConsole = Console<HttpBackend, GlobalStore>;

/// [`StateStore`] over [`APP_STATE`]
///
/// Reads use `peek` so that controller access from event handlers and
/// spawned tasks never subscribes the calling scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlobalStore;

impl StateStore for GlobalStore {
    fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        f(&APP_STATE.peek())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        f(&mut APP_STATE.write())
    }
}
