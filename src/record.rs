//! Record codec
//!
//! Encoding and decoding functions for on-disk records.
//!
//! ## Record Format
//! ```text
//! ┌──────────┬─────────────┬─────────────┬───────────┬─────────────┐
//! │ CRC (4)  │ KeyLen (4)  │ ValLen (4)  │ Key bytes │ Value bytes │
//! └──────────┴─────────────┴─────────────┴───────────┴─────────────┘
//! ```
//! All integers are big-endian. The CRC32 (IEEE polynomial) covers
//! everything from byte 4 onward: both length fields, the key, and the
//! value. Records are packed back to back with no padding; a record's
//! total length is `12 + key_len + val_len`.
//!
//! Two decode paths are provided:
//! - [`decode`] reads the whole record and verifies the checksum — used
//!   by point reads.
//! - [`scan`] reads only the header and key, skipping the value and all
//!   checksum work — used by the startup replay, which trusts the length
//!   fields and defers integrity checks to the first real read.

use std::io::ErrorKind;

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Result, StoreError};
use crate::log::LogFile;

/// Header size: 4 bytes CRC + 4 bytes key length + 4 bytes value length
pub const HEADER_SIZE: usize = 12;

/// Maximum key size (length field is u32)
pub const MAX_KEY_SIZE: usize = u32::MAX as usize;

/// Maximum value size (length field is u32)
pub const MAX_VALUE_SIZE: usize = u32::MAX as usize;

/// A fully decoded, checksum-verified record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
    /// Total on-disk length of the record, including the header
    pub len: u64,
}

/// The structural portion of a record: header and key only, value unread
/// and checksum unverified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFrame {
    pub key: Vec<u8>,
    /// Total on-disk length of the record, including the header
    pub len: u64,
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a key-value pair into its on-disk form
///
/// Pure function: produces a `12 + key.len() + value.len()` byte buffer
/// with the checksum already filled in. Callers must ensure both lengths
/// fit in a u32 (see [`MAX_KEY_SIZE`] / [`MAX_VALUE_SIZE`]).
pub fn encode(key: &[u8], value: &[u8]) -> Vec<u8> {
    debug_assert!(key.len() <= MAX_KEY_SIZE);
    debug_assert!(value.len() <= MAX_VALUE_SIZE);

    let mut buf = BytesMut::with_capacity(HEADER_SIZE + key.len() + value.len());
    buf.put_u32(0); // checksum placeholder, patched below
    buf.put_u32(key.len() as u32);
    buf.put_u32(value.len() as u32);
    buf.put_slice(key);
    buf.put_slice(value);

    let crc = crc32fast::hash(&buf[4..]);
    buf[0..4].copy_from_slice(&crc.to_be_bytes());

    buf.to_vec()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode and verify the record at `offset`
///
/// Reads the header, key, and value, then recomputes the checksum over
/// the length fields + key + value and compares it against the stored
/// one. Fails with `ChecksumMismatch` if they disagree and with
/// `EndOfLog` if the record starts or runs past the end of the file.
pub fn decode(log: &mut LogFile, offset: u64) -> Result<Record> {
    let (stored_crc, key_len, val_len) = read_header(log, offset)?;

    let key = read_section(log, offset + HEADER_SIZE as u64, key_len)?;
    let value = read_section(log, offset + (HEADER_SIZE + key_len) as u64, val_len)?;

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&(key_len as u32).to_be_bytes());
    hasher.update(&(val_len as u32).to_be_bytes());
    hasher.update(&key);
    hasher.update(&value);
    let computed = hasher.finalize();

    if computed != stored_crc {
        return Err(StoreError::ChecksumMismatch {
            stored: stored_crc,
            computed,
        });
    }

    Ok(Record {
        key,
        value,
        len: (HEADER_SIZE + key_len + val_len) as u64,
    })
}

/// Decode only the structure of the record at `offset`
///
/// Reads the header and key; the value bytes are never touched and no
/// checksum is computed. Returns the total record length so a scanning
/// caller can advance its cursor. Fails with `EndOfLog` when there is no
/// record at `offset`.
pub fn scan(log: &mut LogFile, offset: u64) -> Result<RecordFrame> {
    let (_crc, key_len, val_len) = read_header(log, offset)?;
    let key = read_section(log, offset + HEADER_SIZE as u64, key_len)?;

    Ok(RecordFrame {
        key,
        len: (HEADER_SIZE + key_len + val_len) as u64,
    })
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Read and parse the 12-byte header at `offset`
fn read_header(log: &mut LogFile, offset: u64) -> Result<(u32, usize, usize)> {
    let header = read_section(log, offset, HEADER_SIZE)?;
    let mut header = header.as_slice();

    let crc = header.get_u32();
    let key_len = header.get_u32() as usize;
    let val_len = header.get_u32() as usize;

    Ok((crc, key_len, val_len))
}

/// Random-access read that maps a short read to `EndOfLog`
fn read_section(log: &mut LogFile, offset: u64, len: usize) -> Result<Vec<u8>> {
    match log.read_at(offset, len) {
        Err(StoreError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof => {
            Err(StoreError::EndOfLog)
        }
        other => other,
    }
}
