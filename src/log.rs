//! Append log
//!
//! Owns the single on-disk file backing the store. The file is a
//! contiguous, unpadded sequence of records with no header, footer, or
//! magic number; its length always equals the sum of all record lengths.
//! The log only ever grows, and only by appending at the end — no
//! compaction, no segmenting, no truncation.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// The append-only log file
///
/// `end_offset` tracks where the next record will land. It is
/// initialized from the file length at open time and only advances after
/// an append has been fully written and synced, so it always names the
/// end of durable data.
#[derive(Debug)]
pub struct LogFile {
    file: File,
    path: PathBuf,
    end_offset: u64,
}

impl LogFile {
    /// Open the log at `path`, creating an empty file if absent
    pub fn open_or_create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let end_offset = file.metadata()?.len();

        Ok(Self {
            file,
            path: path.to_path_buf(),
            end_offset,
        })
    }

    /// Read exactly `len` bytes starting at `offset`
    ///
    /// A read that starts or runs past the end of the file fails with an
    /// `UnexpectedEof` I/O error; all errors propagate unmodified, with
    /// no internal retries.
    pub fn read_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len];
        self.file.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Append `bytes` at the end of the log, returning their offset
    ///
    /// The write is forced to stable storage before this returns: a
    /// successful append survives a process crash occurring immediately
    /// after. On failure the end offset is left unchanged, so a partial
    /// write past it is simply overwritten by the next append.
    pub fn append(&mut self, bytes: &[u8]) -> Result<u64> {
        let offset = self.end_offset;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(bytes)?;
        self.file.sync_all()?;
        self.end_offset += bytes.len() as u64;
        Ok(offset)
    }

    /// Force any buffered state to stable storage
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    /// Current end offset (the byte length of durable data)
    pub fn len(&self) -> u64 {
        self.end_offset
    }

    /// True if the log contains no records
    pub fn is_empty(&self) -> bool {
        self.end_offset == 0
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}
