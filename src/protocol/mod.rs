//! Domain objects
//!
//! Plain records decoded from the API's JSON payloads. Each object keeps a
//! handle on the [`Response`](crate::response::Response) it was decoded from,
//! so callers can inspect the HTTP status and headers through any element.
//! Objects built locally (for writes) have no response.

mod points;
mod rollup;
mod series;
mod single;
mod summary;

pub use points::{DataPoint, DataPointFound, MultiPoint};
pub use rollup::Rollup;
pub use series::Series;
pub use single::SingleValue;
pub use summary::{DeleteSummary, SeriesSummary, Summary};

#[cfg(test)]
mod tests;
