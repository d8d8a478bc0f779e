//! Startup recovery
//!
//! Rebuilds the in-memory index by replaying the log from the beginning.
//! There is no separate metadata file: the log is the only source of
//! truth.

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::index::Index;
use crate::log::LogFile;
use crate::record;

/// Summary of a completed replay, reported at open time
#[derive(Debug)]
pub struct ReplayStats {
    /// Total records scanned, superseded ones included
    pub records_scanned: u64,

    /// Distinct keys left in the index
    pub live_keys: usize,

    /// Bytes of log consumed by the scan
    pub log_bytes: u64,
}

/// Replay the whole log and build the index
///
/// A single forward pass visits records in write order using the
/// structural scan — headers and keys only, no value reads, no checksum
/// work. Later occurrences of a key overwrite earlier ones in a
/// temporary map, so the surviving offset per key is always the most
/// recently appended record; the map is then bulk-loaded into the sorted
/// index. Value integrity is checked lazily at read time instead.
///
/// The scan ends when `EndOfLog` is reported; any other failure aborts
/// the open. A corrupted length field can desynchronize the cursor and
/// mis-parse everything after it — an accepted limitation of the
/// headerless format.
pub fn replay(log: &mut LogFile) -> Result<(Index, ReplayStats)> {
    let mut latest: HashMap<Vec<u8>, u64> = HashMap::new();
    let mut offset = 0u64;
    let mut records_scanned = 0u64;

    loop {
        match record::scan(log, offset) {
            Ok(frame) => {
                latest.insert(frame.key, offset);
                offset += frame.len;
                records_scanned += 1;
            }
            Err(StoreError::EndOfLog) => break,
            Err(e) => return Err(e),
        }
    }

    let index = Index::bulk_load(latest);
    let stats = ReplayStats {
        records_scanned,
        live_keys: index.len(),
        log_bytes: offset,
    };

    Ok((index, stats))
}
