//! Presigned object storage links and formatted spreadsheet reports.
//!
//! Each concern lives in its own crate and is re-exported behind a feature:
//!
//! - `presign`: [`presign::generate_link`] builds time-limited GET links
//!   signed with AWS Signature Version 4.
//! - `report`: [`report::ReportBuilder`] renders datasets into a styled xlsx
//!   workbook and can hand it to an object store.
//!
//! Both features are enabled by default.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use cosops_core::*;

#[cfg(feature = "presign")]
pub mod presign {
    pub use cosops_presign::*;
}

#[cfg(feature = "report")]
pub mod report {
    pub use cosops_report::*;
}
