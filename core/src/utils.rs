//! Utility functions and types.

use std::fmt::{Debug, Formatter};

/// Hides a secret when printed with `{:?}`.
///
/// Values shorter than 12 bytes are fully masked. Longer values keep their
/// first and last three characters so different keys can still be told apart
/// in logs.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self.0;
        match s.len() {
            0 => f.write_str("EMPTY"),
            n if n < 12 => f.write_str("***"),
            n => match (s.get(..3), s.get(n - 3..)) {
                (Some(head), Some(tail)) => write!(f, "{head}***{tail}"),
                // Not on a char boundary, mask everything.
                _ => f.write_str("***"),
            },
        }
    }
}
