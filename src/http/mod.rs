//! HTTP transport module
//!
//! Provides the [`Transport`] seam the client and cursors depend on, and
//! its reqwest implementation.
//!
//! # Features
//!
//! - **Fixed credentials**: Basic auth bound at construction
//! - **Link header pagination**: `rel="next"` extracted into [`RawResult`]
//! - **Rate Limiting**: Optional token bucket pacing using governor
//! - **No retries**: every call is issued exactly once

mod client;
mod rate_limit;
mod transport;

pub use client::{
    default_user_agent, HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder,
    DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{parse_link_header, RawResult, Transport};
