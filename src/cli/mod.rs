//! CLI command handlers

pub mod commands;

pub use commands::{convert, resolve_config, ConvertOptions};
