//! CLI command handlers

pub mod commands;

pub use commands::{columns, extract, init_tracing, print_setup_error, ExtractArgs};
