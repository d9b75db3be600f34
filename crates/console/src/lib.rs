//! # Schemaport Console
//!
//! The interaction layer of the Schemaport console, independent of any UI
//! toolkit.
//!
//! - **State**: [`ConsoleState`], the single object the UI renders from
//! - **Cascade**: the database, schema, table and preview chain in [`selection`]
//! - **Feedback**: toasts in [`notification`] and the blocking overlay in [`overlay`]
//! - **Controllers**: [`Console`], which drives a [`schemaport_core::Backend`]
//!
//! Responses are matched against per-level request [`sequence`] tickets so a
//! late answer for a superseded selection never overwrites a newer one.

pub mod ai;
pub mod connection;
pub mod controller;
pub mod ddl;
pub mod ddl_parse;
pub mod manual;
pub mod notification;
pub mod options;
pub mod overlay;
pub mod preview;
pub mod selection;
pub mod sequence;
pub mod state;
pub mod store;

// Re-export commonly used items at crate root
pub use ai::{AiSettings, ModelList};
pub use connection::{ConnectionForm, ConnectionStatus};
pub use controller::Console;
pub use ddl::{DdlFlow, DdlPane, DownloadRef};
pub use manual::{ManualField, ManualState};
pub use notification::{NotificationCenter, Toast};
pub use options::{option_list, SelectOption};
pub use overlay::{OverlayGuard, OverlayState};
pub use preview::SchemaPreview;
pub use selection::{BrowseState, Level, Selector};
pub use sequence::{Sequence, Ticket};
pub use state::{ConsoleState, Enablement};
pub use store::{LocalStore, StateStore};
