//! DDL preview panes
//!
//! The browse and manual flows each own a [`DdlPane`]. Panes never share
//! state: generating in one flow leaves the other untouched.

use schemaport_core::DdlArtifact;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::sequence::{Sequence, Ticket};

// ============================================================================
// Flows
// ============================================================================

/// Which entry point a DDL action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdlFlow {
    /// Schema fetched from a connected source
    Browse,
    /// Schema typed or pasted by the user
    Manual,
}

impl DdlFlow {
    pub fn as_str(&self) -> &'static str {
        match self {
            DdlFlow::Browse => "browse",
            DdlFlow::Manual => "manual",
        }
    }
}

impl fmt::Display for DdlFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Download Reference
// ============================================================================

/// Handle to the bytes offered by a download button
///
/// Each generation produces a reference with a fresh id; the previous one is
/// dropped together with its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRef {
    pub id: Uuid,
    pub filename: String,
    pub bytes: Arc<[u8]>,
}

impl From<&DdlArtifact> for DownloadRef {
    fn from(artifact: &DdlArtifact) -> Self {
        Self {
            id: artifact.id,
            filename: artifact.filename.clone(),
            bytes: artifact.bytes(),
        }
    }
}

// ============================================================================
// DDL Pane
// ============================================================================

/// Preview pane plus download button for one flow
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DdlPane {
    /// Whether the preview is shown
    pub visible: bool,
    /// Whether a generation request is outstanding
    pub generating: bool,
    artifact: Option<DdlArtifact>,
    download: Option<DownloadRef>,
    seq: Sequence,
}

impl DdlPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a generation request
    pub fn begin(&mut self) -> Ticket {
        self.generating = true;
        self.seq.issue()
    }

    /// Show a freshly generated artifact; returns false for a stale ticket
    pub fn show(&mut self, ticket: Ticket, artifact: DdlArtifact) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.generating = false;
        self.visible = true;
        self.download = Some(DownloadRef::from(&artifact));
        self.artifact = Some(artifact);
        true
    }

    /// Finish a failed generation; returns false for a stale ticket
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.generating = false;
        true
    }

    /// Hide the preview and drop the artifact, cancelling any pending generation
    pub fn hide(&mut self) {
        self.visible = false;
        self.generating = false;
        self.artifact = None;
        self.download = None;
        self.seq.invalidate();
    }

    pub fn artifact(&self) -> Option<&DdlArtifact> {
        self.artifact.as_ref()
    }

    /// Generated statement, empty when nothing is shown
    pub fn ddl_text(&self) -> &str {
        self.artifact.as_ref().map(|a| a.ddl.as_str()).unwrap_or("")
    }

    pub fn download(&self) -> Option<&DownloadRef> {
        if self.visible {
            self.download.as_ref()
        } else {
            None
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use schemaport_core::DEFAULT_DDL_FILENAME;

    #[test]
    fn test_show_produces_download() {
        let mut pane = DdlPane::new();
        let ticket = pane.begin();
        assert!(pane.generating);

        assert!(pane.show(ticket, DdlArtifact::new("CREATE TABLE `p.d.orders` ();")));
        assert!(pane.visible);
        assert!(!pane.generating);
        assert_eq!(pane.ddl_text(), "CREATE TABLE `p.d.orders` ();");

        let download = pane.download().unwrap();
        assert_eq!(download.filename, DEFAULT_DDL_FILENAME);
        assert_eq!(&*download.bytes, pane.ddl_text().as_bytes());
    }

    #[test]
    fn test_new_generation_replaces_download() {
        let mut pane = DdlPane::new();
        let t1 = pane.begin();
        pane.show(t1, DdlArtifact::new("a"));
        let first = pane.download().unwrap().id;

        let t2 = pane.begin();
        pane.show(t2, DdlArtifact::new("b"));
        let second = pane.download().unwrap().id;

        assert_ne!(first, second);
        assert_eq!(pane.ddl_text(), "b");
    }

    #[test]
    fn test_hide_discards_inflight_generation() {
        let mut pane = DdlPane::new();
        let ticket = pane.begin();
        pane.hide();

        assert!(!pane.show(ticket, DdlArtifact::new("stale")));
        assert!(!pane.visible);
        assert!(pane.download().is_none());
        assert_eq!(pane.ddl_text(), "");
    }

    #[test]
    fn test_superseded_generation_is_dropped() {
        let mut pane = DdlPane::new();
        let old = pane.begin();
        let new = pane.begin();

        assert!(pane.show(new, DdlArtifact::new("new")));
        assert!(!pane.show(old, DdlArtifact::new("old")));
        assert!(!pane.fail(old));
        assert_eq!(pane.ddl_text(), "new");
    }
}
