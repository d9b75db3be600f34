//! # Schemaport Client
//!
//! [`HttpBackend`] implements [`schemaport_core::Backend`] against the
//! migration server's HTTP routes. [`endpoints`] holds the per-system route
//! table and [`wire`] the request and response bodies.

pub mod client;
pub mod endpoints;
pub mod wire;

pub use client::HttpBackend;
pub use endpoints::Endpoint;
