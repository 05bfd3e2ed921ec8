//! CLI module
//!
//! Command-line interface over the API client.
//!
//! # Commands
//!
//! - `list-series` - List series matching a filter
//! - `get-series` / `create-series` - Series metadata
//! - `read` / `find` - Stream data points, page by page
//! - `write` / `delete` - Modify data points
//! - `single` - Value nearest a timestamp

mod commands;
mod runner;

pub use commands::{parse_key_val, Cli, Commands, OutputFormat};
pub use runner::Runner;
