//! Authentication module
//!
//! The TempoDB API authenticates every request with a fixed key/secret
//! pair sent as HTTP Basic credentials. There is no token exchange or
//! refresh; the pair is bound once when the transport is built.

mod credentials;

pub use credentials::Credentials;
