//! # UI Hooks

pub mod use_console;

pub use use_console::{run, use_console};
