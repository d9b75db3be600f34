//! Page Components for the Schemaport console
//!
//! - **ConnectionPanel**: source connection form in the sidebar
//! - **BrowsePage**: selector cascade over a connected source
//! - **ManualPage**: JSON schema and source DDL entry

pub mod browse;
pub mod connection;
pub mod manual;

pub use browse::BrowsePage;
pub use connection::ConnectionPanel;
pub use manual::ManualPage;
