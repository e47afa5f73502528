use super::{init, scores, sheet_names};
use anyhow::{anyhow, Result};
use bytes::Bytes;
use cosops_core::ErrorKind;
use cosops_report::{
    upload, MemoryObjectStore, ObjectStore, ReportBuilder, StyleProfile, UploadTarget,
};
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Store that counts calls and always fails.
#[derive(Debug, Default)]
struct FailingStore {
    calls: AtomicUsize,
}

impl ObjectStore for FailingStore {
    fn put_object(&self, bucket: &str, _: &str, _: Bytes) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("AccessDenied: write to {bucket} is not allowed"))
    }
}

#[test]
fn test_no_target_never_touches_store() -> Result<()> {
    init();

    let store = FailingStore::default();
    let buffer = ReportBuilder::new(StyleProfile::Effectiveness).build_and_upload(
        &[scores("s", 3)],
        None,
        &store,
    )?;

    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    assert_eq!(sheet_names(&buffer)?, vec!["s"]);
    Ok(())
}

#[test]
fn test_upload_stores_the_returned_buffer() -> Result<()> {
    init();

    let store = MemoryObjectStore::new();
    let target = UploadTarget::new("reports", "2024/weekly.xlsx");
    let buffer = ReportBuilder::new(StyleProfile::Standard).build_and_upload(
        &[scores("a", 2), scores("b", 4)],
        Some(&target),
        &store,
    )?;

    assert_eq!(store.len(), 1);
    let stored = store
        .get("reports", "2024/weekly.xlsx")
        .expect("report must be stored");
    assert_eq!(stored, buffer);
    assert_eq!(sheet_names(&stored)?, vec!["a", "b"]);
    Ok(())
}

#[test]
fn test_upload_error_is_propagated() {
    init();

    let store = FailingStore::default();
    let target = UploadTarget::new("reports", "weekly.xlsx");
    let err = ReportBuilder::new(StyleProfile::Standard)
        .build_and_upload(&[scores("s", 1)], Some(&target), &store)
        .expect_err("upload must fail");

    assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    assert_eq!(err.kind(), ErrorKind::Storage);
    assert_eq!(
        err.to_string(),
        "AccessDenied: write to reports is not allowed"
    );
    assert!(err.source().is_some());
}

#[test]
fn test_invalid_report_is_not_uploaded() {
    let store = FailingStore::default();
    let target = UploadTarget::new("reports", "weekly.xlsx");
    let err = ReportBuilder::new(StyleProfile::Standard)
        .build_and_upload(&[], Some(&target), &store)
        .expect_err("empty report must fail");

    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_upload_function() -> Result<()> {
    let store = MemoryObjectStore::new();
    upload(Bytes::from_static(b"xlsx"), "bucket", "key", &store)?;

    assert_eq!(store.get("bucket", "key"), Some(Bytes::from_static(b"xlsx")));
    Ok(())
}
