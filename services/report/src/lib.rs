//! Formatted spreadsheet reports, optionally stored in an object store.
//!
//! Every [`Dataset`] becomes one sheet of an xlsx workbook. The layout is
//! fixed by a [`StyleProfile`]: header row height, wrapped header text,
//! column widths and background bands alternating every two data rows.
//!
//! ## Example
//!
//! ```
//! use cosops_report::{
//!     Cell, Dataset, MemoryObjectStore, ReportBuilder, StyleProfile, UploadTarget,
//! };
//!
//! # fn main() -> cosops_core::Result<()> {
//! let measures = Dataset::new("Measures", ["Measure", "Score"])
//!     .with_row([Cell::from("Coverage"), Cell::from(0.93)])
//!     .with_row([Cell::from("Latency"), Cell::from(0.71)]);
//!
//! let store = MemoryObjectStore::new();
//! let target = UploadTarget::new("reports", "weekly.xlsx");
//! let buffer = ReportBuilder::new(StyleProfile::Standard).build_and_upload(
//!     &[measures],
//!     Some(&target),
//!     &store,
//! )?;
//!
//! assert_eq!(store.get("reports", "weekly.xlsx"), Some(buffer));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod dataset;
pub use dataset::{Cell, Dataset};

pub mod layout;

mod profile;
pub use profile::{ColumnRange, StyleProfile};

mod report;
pub use report::{build_report, upload, ReportBuilder, UploadTarget};

mod sheet;

mod storage;
pub use storage::{MemoryObjectStore, ObjectStore};

mod xlsx;
