// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # TempoDB Client
//!
//! An async client for the TempoDB time-series HTTP API.
//!
//! ## Features
//!
//! - **Series management**: create, get, list, update and delete series
//! - **Reads**: raw, rolled-up, interpolated, aggregated and "find" reads
//! - **Writes**: single-series and multi-series writes, range deletes
//! - **Lazy pagination**: reads return a [`Cursor`] that follows `Link`
//!   headers page by page as it is consumed
//! - **Timezones**: timestamps are rendered in the timezone the API reports
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tempodb_client::{Client, ClientConfig, ReadOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::new(ClientConfig::new("my-key", "my-secret"))?;
//!
//!     let options = ReadOptions::new().rollup("mean", "1hour").tz("US/Eastern");
//!     let mut points = client
//!         .read_data("temp:1", "2013-12-01T00:00:00", "2013-12-02T00:00:00", &options)
//!         .await?;
//!
//!     while let Some(point) = points.try_next().await? {
//!         println!("{} {}", point.timestamp(), point.v);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Client                           │
//! │  paths + query strings per operation                     │
//! └──────────────────────────────────────────────────────────┘
//!        │                 │                      │
//! ┌──────┴─────┐   ┌───────┴───────┐   ┌──────────┴─────────┐
//! │  Response  │   │    Decode     │   │     Pagination     │
//! │ classifier │   │ payload caster│   │  Cursor (Link hdr) │
//! └────────────┘   └───────────────┘   └────────────────────┘
//!        │                                        │
//! ┌──────┴────────────────────────────────────────┴─────────┐
//! │           Transport (reqwest, Basic auth)               │
//! └─────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// API credentials
pub mod auth;

/// HTTP transport with rate limiting
pub mod http;

/// Response classification
pub mod response;

/// Payload casting
pub mod decode;

/// Timestamp validation and parsing
pub mod temporal;

/// Domain objects
pub mod protocol;

/// Paginated cursors
pub mod pagination;

/// API client
pub mod client;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::{Client, ReadOptions, SeriesFilter};
pub use config::ClientConfig;
pub use pagination::{Cursor, CursorState};
pub use protocol::{
    DataPoint, DataPointFound, MultiPoint, Rollup, Series, SeriesSummary, SingleValue,
};
pub use response::{Outcome, Response};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
