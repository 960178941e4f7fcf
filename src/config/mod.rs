//! Configuration module
//!
//! Handles runtime settings loaded from an optional JSON file.

pub mod settings;

pub use settings::{ConfigError, Settings};
