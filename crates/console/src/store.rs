//! Access to the console state
//!
//! Controllers never hold a borrow of the state across an await point:
//! each access goes through a closure that completes synchronously.

use std::cell::RefCell;
use std::rc::Rc;

use crate::state::ConsoleState;

/// Shared, single-threaded owner of a [`ConsoleState`]
pub trait StateStore: Clone + 'static {
    /// Read the state
    fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R;

    /// Mutate the state
    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R;

    /// Clone the whole state
    fn snapshot(&self) -> ConsoleState {
        self.read(ConsoleState::clone)
    }
}

/// In-memory store used outside the UI runtime
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    inner: Rc<RefCell<ConsoleState>>,
}

impl LocalStore {
    pub fn new(state: ConsoleState) -> Self {
        Self {
            inner: Rc::new(RefCell::new(state)),
        }
    }
}

impl StateStore for LocalStore {
    fn read<R>(&self, f: impl FnOnce(&ConsoleState) -> R) -> R {
        f(&self.inner.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ConsoleState) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaport_core::Tab;

    #[test]
    fn test_clones_share_state() {
        let store = LocalStore::default();
        let other = store.clone();
        other.update(|s| s.active_tab = Tab::Browse);
        assert_eq!(store.read(|s| s.active_tab), Tab::Browse);
        assert_eq!(store.snapshot().active_tab, Tab::Browse);
    }
}
