//! Payload casting
//!
//! Turns the JSON body of a successful [`Response`](crate::response::Response)
//! into typed domain objects.
//!
//! # Overview
//!
//! Each domain type declares its own schema by implementing [`FromJson`].
//! [`cast_single`] and [`cast_list`] are the generic entry points the client
//! calls after every request: one object from a JSON object, or one object
//! per element of a JSON array, in array order. Every object is tagged with
//! the response it came from.

mod caster;
mod types;

pub use caster::{as_object, cast_list, cast_single, decode_elements, optional, required};
pub use types::{DecodeContext, FromJson};
