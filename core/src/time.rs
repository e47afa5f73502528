//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only timezone signatures are computed in.
pub type DateTime = chrono::DateTime<Utc>;

/// Date format: "20220313"
pub const DATE: &str = "%Y%m%d";

/// Time format for ISO 8601 basic: "20220313T072004Z"
pub const ISO8601: &str = "%Y%m%dT%H%M%SZ";

/// Capture the current time.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `20220313`
pub fn format_date(t: DateTime) -> String {
    t.format(DATE).to_string()
}

/// Format time into ISO 8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format(ISO8601).to_string()
}
