use crate::dataset::Dataset;
use crate::profile::StyleProfile;
use crate::sheet::{self, SheetOptions};
use crate::storage::ObjectStore;
use crate::xlsx;
use bytes::Bytes;
use cosops_core::{Error, Result};
use log::debug;
use std::collections::HashSet;

/// Longest sheet name spreadsheet applications accept.
const MAX_SHEET_NAME_LEN: usize = 31;
/// Characters forbidden in sheet names.
const SHEET_NAME_FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];
/// Rows per sheet, header included.
const MAX_ROWS: usize = 1_048_576;
/// Columns per sheet, index column included.
const MAX_COLUMNS: usize = 16_384;

/// Where an uploaded report is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Destination bucket.
    pub bucket: String,
    /// Object key, usually the report filename.
    pub key: String,
}

impl UploadTarget {
    /// Create a new upload target.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Builder of formatted multi-sheet reports.
///
/// Each dataset becomes one sheet, in the given order and under its own name.
/// The header row is wrapped and sized by the [`StyleProfile`], data rows
/// are banded by pairs and columns get the profile widths.
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder {
    profile: StyleProfile,
    index: bool,
}

impl ReportBuilder {
    /// Create a builder for `profile`, writing the row index column.
    pub fn new(profile: StyleProfile) -> Self {
        Self {
            profile,
            index: true,
        }
    }

    /// Whether to write the leading row index column (default `true`).
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    /// Render `datasets` into a complete xlsx file.
    pub fn build(&self, datasets: &[Dataset]) -> Result<Bytes> {
        validate(datasets, self.index)?;

        let opts = SheetOptions {
            profile: self.profile,
            index: self.index,
        };
        let mut sheets = Vec::with_capacity(datasets.len());
        for dataset in datasets {
            debug!(
                "rendering sheet {:?}: {} rows, {} columns, profile {:?}",
                dataset.name(),
                dataset.len(),
                dataset.columns().len(),
                self.profile
            );
            sheets.push(sheet::render(dataset, opts)?);
        }

        let names: Vec<&str> = datasets.iter().map(Dataset::name).collect();
        let buffer = xlsx::package(&names, sheets)?;
        debug!("built report of {} sheets, {} bytes", names.len(), buffer.len());
        Ok(buffer)
    }

    /// Render `datasets` and upload the result when `target` is set.
    ///
    /// The store is not touched when `target` is `None`. The buffer is only
    /// returned once the upload, if any, succeeded.
    pub fn build_and_upload(
        &self,
        datasets: &[Dataset],
        target: Option<&UploadTarget>,
        store: &dyn ObjectStore,
    ) -> Result<Bytes> {
        let buffer = self.build(datasets)?;
        if let Some(target) = target {
            upload(buffer.clone(), &target.bucket, &target.key, store)?;
        }
        Ok(buffer)
    }
}

/// Render `datasets` with `profile` and the default options.
///
/// Shortcut of [`ReportBuilder::build`].
pub fn build_report(datasets: &[Dataset], profile: StyleProfile) -> Result<Bytes> {
    ReportBuilder::new(profile).build(datasets)
}

/// Store a built report under `bucket` and `key`.
///
/// Errors of the store are returned as [`cosops_core::ErrorKind::Storage`]
/// with the store's message and the original error as source.
pub fn upload(buffer: Bytes, bucket: &str, key: &str, store: &dyn ObjectStore) -> Result<()> {
    debug!("uploading report to {bucket}/{key}: {} bytes", buffer.len());
    store.put_object(bucket, key, buffer).map_err(Error::storage)
}

fn validate(datasets: &[Dataset], index: bool) -> Result<()> {
    if datasets.is_empty() {
        return Err(Error::invalid_input(
            "a report needs at least one dataset",
        ));
    }

    let mut seen = HashSet::with_capacity(datasets.len());
    for dataset in datasets {
        let name = dataset.name();
        check_sheet_name(name)?;
        if !seen.insert(name.to_lowercase()) {
            return Err(Error::invalid_input(format!(
                "sheet name {name:?} is used more than once"
            )));
        }

        let width = dataset.columns().len();
        if width + usize::from(index) > MAX_COLUMNS {
            return Err(Error::invalid_input(format!(
                "sheet {name:?} has {width} columns, more than a sheet can hold"
            )));
        }
        if dataset.len() + 1 > MAX_ROWS {
            return Err(Error::invalid_input(format!(
                "sheet {name:?} has {} rows, more than a sheet can hold",
                dataset.len()
            )));
        }
        if let Some((idx, row)) = dataset
            .rows()
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
        {
            return Err(Error::invalid_input(format!(
                "row {idx} of sheet {name:?} has {} cells, expected {width}",
                row.len()
            )));
        }
    }

    Ok(())
}

fn check_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_input("sheet name must not be empty"));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::invalid_input(format!(
            "sheet name {name:?} is longer than {MAX_SHEET_NAME_LEN} characters"
        )));
    }
    if name.contains(SHEET_NAME_FORBIDDEN) {
        return Err(Error::invalid_input(format!(
            "sheet name {name:?} contains one of {SHEET_NAME_FORBIDDEN:?}"
        )));
    }
    if name.contains(char::is_control) {
        return Err(Error::invalid_input(format!(
            "sheet name {name:?} contains a control character"
        )));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(Error::invalid_input(format!(
            "sheet name {name:?} must not start or end with an apostrophe"
        )));
    }
    Ok(())
}
