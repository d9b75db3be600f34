//! Schema preview pane for the browse flow

use schemaport_core::SchemaDocument;

use crate::sequence::{Sequence, Ticket};

/// The fetched schema of the selected table
///
/// The rendered text is derived from the document when it is stored, so
/// the pane always shows exactly what DDL generation will send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaPreview {
    /// Whether a fetch is outstanding
    pub loading: bool,
    document: Option<SchemaDocument>,
    text: String,
    seq: Sequence,
}

impl SchemaPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch, superseding any outstanding one
    pub fn begin(&mut self) -> Ticket {
        self.loading = true;
        self.seq.issue()
    }

    /// Store a fetched document; returns false for a stale ticket
    pub fn accept(&mut self, ticket: Ticket, document: SchemaDocument) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.loading = false;
        self.set_document(document);
        true
    }

    /// Finish a failed fetch; returns false for a stale ticket
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        if !self.seq.is_current(ticket) {
            return false;
        }
        self.loading = false;
        true
    }

    /// Swap in an updated document without starting a new fetch
    ///
    /// Used for AI-augmented schemas; `ticket` must be the one observed
    /// before the augmentation request was sent.
    pub fn replace(&mut self, ticket: Ticket, document: SchemaDocument) -> bool {
        if !self.seq.is_current(ticket) || self.document.is_none() {
            return false;
        }
        self.set_document(document);
        true
    }

    /// Drop the document and cancel any outstanding fetch
    pub fn clear(&mut self) {
        self.loading = false;
        self.document = None;
        self.text.clear();
        self.seq.invalidate();
    }

    /// Ticket identifying the current contents
    pub fn latest(&self) -> Ticket {
        self.seq.latest()
    }

    pub fn document(&self) -> Option<&SchemaDocument> {
        self.document.as_ref()
    }

    /// Four-space indented JSON shown in the pane
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_ready(&self) -> bool {
        self.document.is_some()
    }

    fn set_document(&mut self, document: SchemaDocument) {
        self.text = document.to_pretty_json();
        self.document = Some(document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(name: &str) -> SchemaDocument {
        SchemaDocument::from_value(json!({ "table_name": name, "columns": [] })).unwrap()
    }

    #[test]
    fn test_accept_renders_text() {
        let mut preview = SchemaPreview::new();
        let ticket = preview.begin();
        assert!(preview.accept(ticket, doc("orders")));
        assert!(preview.is_ready());
        assert!(preview.text().contains("\n    \"table_name\": \"orders\""));
    }

    #[test]
    fn test_clear_discards_pending_fetch() {
        let mut preview = SchemaPreview::new();
        let ticket = preview.begin();
        preview.clear();
        assert!(!preview.accept(ticket, doc("orders")));
        assert!(!preview.is_ready());
        assert_eq!(preview.text(), "");
    }

    #[test]
    fn test_replace_requires_unchanged_preview() {
        let mut preview = SchemaPreview::new();
        let ticket = preview.begin();
        preview.accept(ticket, doc("orders"));

        let observed = preview.latest();
        assert!(preview.replace(observed, doc("orders_v2")));
        assert_eq!(preview.document().unwrap().table_name(), Some("orders_v2"));

        let refetch = preview.begin();
        assert!(!preview.replace(observed, doc("orders_v3")));
        preview.accept(refetch, doc("orders"));
        assert_eq!(preview.document().unwrap().table_name(), Some("orders"));
    }
}
