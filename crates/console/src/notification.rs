//! Transient notifications ("toasts")
//!
//! At most one toast exists at a time. Issuing a new one replaces the
//! current one outright; nothing is queued. The container the toast lives
//! in is created on first use and reused afterwards.

use chrono::{DateTime, Utc};
use schemaport_core::Severity;
use std::time::Duration;
use uuid::Uuid;

/// Where toasts are stacked on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastContainer {
    pub id: Uuid,
    pub top: &'static str,
    pub right: &'static str,
    pub z_index: u32,
}

impl ToastContainer {
    fn top_right() -> Self {
        Self {
            id: Uuid::new_v4(),
            top: "1rem",
            right: "1rem",
            z_index: 1080,
        }
    }
}

/// A single notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    /// Time until the toast dismisses itself
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

/// Owner of the current toast
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCenter {
    container: Option<ToastContainer>,
    current: Option<Toast>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing any toast currently shown; returns its id
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, duration: Duration) -> u64 {
        self.container.get_or_insert_with(ToastContainer::top_right);

        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            message: message.into(),
            severity,
            duration,
            created_at: Utc::now(),
        };
        tracing::debug!(
            "Toast {} ({}): {}",
            toast.id,
            toast.severity.as_str(),
            toast.message
        );
        self.current = Some(toast);
        self.next_id
    }

    /// Remove the toast with `id`; a replaced toast's id is ignored
    pub fn dismiss(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|t| t.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// The container, once any toast has been shown
    pub fn container(&self) -> Option<&ToastContainer> {
        self.container.as_ref()
    }

    /// Number of toasts on screen (zero or one)
    pub fn len(&self) -> usize {
        usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR_SECONDS: Duration = Duration::from_millis(4000);

    #[test]
    fn test_second_toast_replaces_first() {
        let mut center = NotificationCenter::new();
        center.notify("first", Severity::Warning, FOUR_SECONDS);
        center.notify("second", Severity::Success, FOUR_SECONDS);

        assert_eq!(center.len(), 1);
        let toast = center.current().unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.severity, Severity::Success);
    }

    #[test]
    fn test_container_created_once() {
        let mut center = NotificationCenter::new();
        assert!(center.container().is_none());

        center.notify("a", Severity::Info, FOUR_SECONDS);
        let first = center.container().unwrap().id;
        center.notify("b", Severity::Info, FOUR_SECONDS);

        assert_eq!(center.container().unwrap().id, first);
        assert_eq!(center.container().unwrap().z_index, 1080);
    }

    #[test]
    fn test_dismiss_ignores_replaced_toast() {
        let mut center = NotificationCenter::new();
        let old = center.notify("old", Severity::Info, FOUR_SECONDS);
        let new = center.notify("new", Severity::Info, FOUR_SECONDS);

        // The timer of the replaced toast fires late
        assert!(!center.dismiss(old));
        assert_eq!(center.current().unwrap().id, new);

        assert!(center.dismiss(new));
        assert!(center.is_empty());
    }
}
