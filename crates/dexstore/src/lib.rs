//! # dexstore
//!
//! Local key-value storage for the dex cache.
//!
//! ## Architecture
//! - **Store**: synchronous string-keyed get/set/remove/keys capability
//! - **Table**: in-memory map with byte-quota accounting (AHash)
//! - **MemoryStore**: a `Table` behind a lock, nothing persisted
//! - **FileStore**: a `Table` replayed from and appended to a log file
//!
//! Writes that would push usage past capacity are rejected with
//! [`Error::QuotaExceeded`] and leave the store untouched.

#![warn(missing_docs)]

mod error;
mod memory;
mod parser;
mod storage;
mod store;
mod table;

pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use storage::{FileStore, FileStoreOptions};
pub use store::Store;

/// Default capacity in bytes, matching the usual browser storage allowance
pub const DEFAULT_CAPACITY: usize = 5 * 1024 * 1024;
