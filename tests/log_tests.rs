//! Tests for the append log
//!
//! These tests verify:
//! - File creation and reopening
//! - Append offsets and end-offset tracking
//! - Random-access reads
//! - Short-read behavior past the end of the file

use std::io::ErrorKind;

use logkv::log::LogFile;
use logkv::StoreError;
use tempfile::TempDir;

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("new.log");
    assert!(!path.exists());

    let log = LogFile::open_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(log.len(), 0);
    assert!(log.is_empty());
}

#[test]
fn test_open_existing_file_sets_end_offset() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("existing.log");
    std::fs::write(&path, b"0123456789").unwrap();

    let log = LogFile::open_or_create(&path).unwrap();

    assert_eq!(log.len(), 10);
    assert!(!log.is_empty());
}

#[test]
fn test_path_accessor() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("named.log");

    let log = LogFile::open_or_create(&path).unwrap();

    assert_eq!(log.path(), path);
}

// =============================================================================
// Append Tests
// =============================================================================

#[test]
fn test_append_returns_write_offset() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = LogFile::open_or_create(&temp_dir.path().join("a.log")).unwrap();

    let first = log.append(b"aaaa").unwrap();
    let second = log.append(b"bb").unwrap();
    let third = log.append(b"cccccc").unwrap();

    assert_eq!(first, 0);
    assert_eq!(second, 4);
    assert_eq!(third, 6);
    assert_eq!(log.len(), 12);
}

#[test]
fn test_append_is_visible_after_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("durable.log");

    {
        let mut log = LogFile::open_or_create(&path).unwrap();
        log.append(b"persisted").unwrap();
        log.sync().unwrap();
    }

    let mut reopened = LogFile::open_or_create(&path).unwrap();
    assert_eq!(reopened.len(), 9);
    assert_eq!(reopened.read_at(0, 9).unwrap(), b"persisted");
}

// =============================================================================
// Read Tests
// =============================================================================

#[test]
fn test_read_at_arbitrary_offsets() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = LogFile::open_or_create(&temp_dir.path().join("r.log")).unwrap();
    log.append(b"hello world").unwrap();

    assert_eq!(log.read_at(0, 5).unwrap(), b"hello");
    assert_eq!(log.read_at(6, 5).unwrap(), b"world");
    assert_eq!(log.read_at(0, 0).unwrap(), b"");
}

#[test]
fn test_read_past_end_is_unexpected_eof() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = LogFile::open_or_create(&temp_dir.path().join("r.log")).unwrap();
    log.append(b"short").unwrap();

    let result = log.read_at(0, 100);

    match result {
        Err(StoreError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("expected UnexpectedEof, got {:?}", other),
    }
}

#[test]
fn test_read_at_offset_beyond_end_is_unexpected_eof() {
    let temp_dir = TempDir::new().unwrap();
    let mut log = LogFile::open_or_create(&temp_dir.path().join("r.log")).unwrap();
    log.append(b"data").unwrap();

    let result = log.read_at(1000, 1);

    match result {
        Err(StoreError::Io(e)) => assert_eq!(e.kind(), ErrorKind::UnexpectedEof),
        other => panic!("expected UnexpectedEof, got {:?}", other),
    }
}
