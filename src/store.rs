//! Store façade
//!
//! The externally visible get/put/close surface, composing the codec,
//! the append log, and the index under one exclusion lock.
//!
//! ## Concurrency Model
//!
//! Every operation holds the single mutex for its full duration. There
//! is no internal parallelism and no lock-free path: concurrent puts are
//! fully linearized, and for the same key the call that acquires the
//! lock later wins. No reader can observe an index entry whose record
//! has not already been durably appended, because the index is only
//! mutated after the append succeeds, under the same lock.
//!
//! One `Store` instance exclusively owns its file and index from open to
//! close. Opening the same path from a second instance, in-process or
//! not, is unsupported.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{info, trace};

use crate::error::{Result, StoreError};
use crate::index::Index;
use crate::log::LogFile;
use crate::record;
use crate::recovery;

/// An embedded, single-file, log-structured key-value store
pub struct Store {
    path: PathBuf,
    inner: Mutex<StoreInner>,
}

/// State guarded by the store lock
struct StoreInner {
    log: LogFile,
    index: Index,
}

impl Store {
    /// Open the store at `path`, creating the file if absent
    ///
    /// Replays the entire log to rebuild the index before returning; an
    /// I/O failure during replay aborts the open.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut log = LogFile::open_or_create(path)?;
        let (index, stats) = recovery::replay(&mut log)?;

        info!(
            path = %path.display(),
            records = stats.records_scanned,
            live_keys = stats.live_keys,
            log_bytes = stats.log_bytes,
            "store opened"
        );

        Ok(Self {
            path: path.to_path_buf(),
            inner: Mutex::new(StoreInner { log, index }),
        })
    }

    /// Get the current value for `key`
    ///
    /// Fails with `KeyNotFound` for a key never written, and with
    /// `ChecksumMismatch` if the record's stored checksum disagrees with
    /// the recomputed one — a caller can tell "never written" apart from
    /// "written but corrupted".
    pub fn get(&self, key: &[u8]) -> Result<Vec<u8>> {
        let mut inner = self.inner.lock();

        let offset = inner.index.find(key).ok_or(StoreError::KeyNotFound)?;

        // An indexed offset always names a record whose header and key
        // were on disk at open time. Running off the end here means the
        // file shrank underneath us, or replay indexed a tail record
        // whose value was torn off by a crash.
        let record = match record::decode(&mut inner.log, offset) {
            Err(StoreError::EndOfLog) => {
                return Err(StoreError::Corruption(format!(
                    "indexed offset {offset} points past the end of the log"
                )))
            }
            other => other?,
        };

        trace!(offset, value_len = record.value.len(), "record read");
        Ok(record.value)
    }

    /// Write a key-value pair
    ///
    /// Encodes the record, appends it durably to the log, then points
    /// the index at the new offset. If the append fails the index is
    /// left untouched, so every indexed offset still names a
    /// fully-written record.
    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        if key.len() > record::MAX_KEY_SIZE || value.len() > record::MAX_VALUE_SIZE {
            return Err(StoreError::RecordTooLarge {
                key_len: key.len(),
                value_len: value.len(),
            });
        }

        // Encoding is pure; only the append and index update need the lock.
        let buf = record::encode(key, value);

        let mut inner = self.inner.lock();
        let offset = inner.log.append(&buf)?;
        inner.index.upsert(key, offset);

        trace!(offset, record_len = buf.len(), "record appended");
        Ok(())
    }

    /// Close the store, flushing the log and releasing the file
    pub fn close(self) -> Result<()> {
        let mut inner = self.inner.into_inner();
        inner.log.sync()?;

        info!(path = %self.path.display(), "store closed");
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of live keys in the index
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    /// True if no key has ever been written
    pub fn is_empty(&self) -> bool {
        self.inner.lock().index.is_empty()
    }

    /// All live keys in ascending byte-lexicographic order
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.inner
            .lock()
            .index
            .iter()
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Byte length of the log file
    pub fn log_size(&self) -> u64 {
        self.inner.lock().log.len()
    }
}
