//! API client module
//!
//! Composes request paths and query strings for each TempoDB operation
//! and hands the results to the response classifier, the payload caster
//! or a pagination cursor.

mod api;
mod options;
mod params;

pub use api::Client;
pub use options::{ReadOptions, SeriesFilter};
pub use params::{make_series_url, QueryParams};
