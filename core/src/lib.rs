//! Core components shared by the cosops crates.
//!
//! This crate holds the pieces every cosops service crate needs and nothing
//! more:
//!
//! - [`Error`] and [`ErrorKind`]: the single error type used across the workspace
//! - [`hash`]: keyed hash and digest helpers used by request signing
//! - [`time`]: UTC time capture and the timestamp formats used in signatures
//! - [`utils`]: general utilities including secret redaction
//!
//! ## Example
//!
//! ```
//! use cosops_core::hash::hex_hmac_sha256;
//!
//! # fn main() -> cosops_core::Result<()> {
//! let mac = hex_hmac_sha256(b"key", b"The quick brown fox jumps over the lazy dog")?;
//! assert_eq!(
//!     mac,
//!     "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
//! );
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
