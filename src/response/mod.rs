//! Response classification
//!
//! Every raw transport result is normalized into a [`Response`] whose
//! [`Outcome`] is a pure function of the HTTP status:
//!
//! | status | outcome   | error         |
//! |--------|-----------|---------------|
//! | 200    | `Success` | `None`        |
//! | 207    | `Partial` | raw body      |
//! | other  | `Failure` | raw body      |
//!
//! Classification never fails. Deciding what to do with a non-success
//! outcome is left to [`Response::ensure_success`] and its callers.

mod types;

pub use types::{Outcome, Response};
