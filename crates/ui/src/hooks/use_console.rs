//! # Console Hook
//!
//! Access to the [`AppConsole`] provided at launch, plus a helper that runs
//! one of its async actions on the Dioxus runtime.
//!
//! ```rust,ignore
//! let console = use_console();
//! let on_generate = move |_| run(&console, |c| async move { c.generate_ddl(DdlFlow::Browse).await });
//! ```

use dioxus::prelude::*;
use std::future::Future;

use crate::state::AppConsole;

/// The console controller from the root context
pub fn use_console() -> AppConsole {
    use_context::<AppConsole>()
}

/// Spawn an async console action
///
/// Actions are attached to the root scope: connecting switches tabs, and the
/// follow-up listing must survive the connection page being unmounted.
pub fn run<F, Fut>(console: &AppConsole, action: F)
where
    F: FnOnce(AppConsole) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    spawn_forever(action(console.clone()));
}
