//! Blocking overlay shown during long-running calls
//!
//! The overlay is held through an [`OverlayGuard`]; dropping the guard hides
//! it, so every exit path of an operation releases it. Holders are counted,
//! and the overlay stays up while any guard is alive.

use crate::store::StateStore;

/// Overlay visibility and message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayState {
    holders: u32,
    message: Option<String>,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, message: impl Into<String>) {
        self.holders += 1;
        self.message = Some(message.into());
    }

    pub fn release(&mut self) {
        self.holders = self.holders.saturating_sub(1);
        if self.holders == 0 {
            self.message = None;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.holders > 0
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Keeps the overlay visible until dropped
#[must_use = "the overlay hides as soon as the guard is dropped"]
pub struct OverlayGuard<S: StateStore> {
    store: S,
}

impl<S: StateStore> OverlayGuard<S> {
    pub fn show(store: &S, message: impl Into<String>) -> Self {
        let message = message.into();
        store.update(|s| s.overlay.acquire(message));
        Self {
            store: store.clone(),
        }
    }
}

impl<S: StateStore> Drop for OverlayGuard<S> {
    fn drop(&mut self) {
        self.store.update(|s| s.overlay.release());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalStore;

    fn visible(store: &LocalStore) -> bool {
        store.read(|s| s.overlay.is_visible())
    }

    #[test]
    fn test_guard_hides_on_drop() {
        let store = LocalStore::default();
        {
            let _guard = OverlayGuard::show(&store, "Working...");
            assert!(visible(&store));
            assert_eq!(
                store.read(|s| s.overlay.message().map(str::to_string)),
                Some("Working...".to_string())
            );
        }
        assert!(!visible(&store));
    }

    #[test]
    fn test_guard_hides_on_early_return() {
        fn failing(store: &LocalStore) -> Result<(), &'static str> {
            let _guard = OverlayGuard::show(store, "Working...");
            if store.read(|s| s.overlay.is_visible()) {
                return Err("boom");
            }
            Ok(())
        }

        let store = LocalStore::default();
        assert!(failing(&store).is_err());
        assert!(!visible(&store));
    }

    #[test]
    fn test_nested_holders() {
        let store = LocalStore::default();
        let outer = OverlayGuard::show(&store, "outer");
        let inner = OverlayGuard::show(&store, "inner");
        drop(inner);
        assert!(visible(&store));
        drop(outer);
        assert!(!visible(&store));
    }

    #[test]
    fn test_release_never_underflows() {
        let mut overlay = OverlayState::new();
        overlay.release();
        assert!(!overlay.is_visible());
    }
}
