//! # logkv
//!
//! An embedded, single-file, log-structured key-value store with:
//! - Append-only persistence with per-record CRC32 checksums
//! - A sorted in-memory index for O(log n) point lookups
//! - Index reconstruction at startup by replaying the log
//! - A synchronous, mutex-serialized get/put/close surface
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Store                      │
//! │        (get / put / close, one lock)         │
//! └──────────┬───────────────────┬──────────────┘
//!            │                   │
//!            ▼                   ▼
//!     ┌─────────────┐     ┌─────────────┐
//!     │    Index    │     │   Record    │
//!     │ (sorted Vec)│     │   Codec     │
//!     └──────▲──────┘     └──────┬──────┘
//!            │                   │
//!     ┌──────┴──────┐            ▼
//!     │  Recovery   │     ┌─────────────┐
//!     │  (replay)   │────▶│  Append Log │
//!     └─────────────┘     │ (one file)  │
//!                         └─────────────┘
//! ```
//!
//! The store is a library-style engine: no network protocol, no CLI, and
//! no configuration beyond the file path. Deletes, compaction, and
//! multi-process access are deliberately out of scope — superseded
//! records simply accumulate in the log until the end of time.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;

pub mod index;
pub mod log;
pub mod record;
pub mod recovery;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
