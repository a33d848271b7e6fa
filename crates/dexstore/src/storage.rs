//! FileStore: quota-bounded table persisted as an append-only log
//!
//! File layout:
//! - `dex.log`: header + one record per mutation
//! - `dex.log.tmp`: scratch file used while compacting
//!
//! The table is rebuilt by replaying the log on open. Compaction rewrites the
//! log with one set record per live entry.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::parser::{
    create_header, encode_delete, encode_set, parse_header, parse_records, Record, HEADER_LEN,
    LOG_VERSION,
};
use crate::store::Store;
use crate::table::Table;
use crate::DEFAULT_CAPACITY;

/// Log file name inside the store directory
const LOG_FILE: &str = "dex.log";

/// Scratch file name used by compaction
const TMP_FILE: &str = "dex.log.tmp";

/// Dead records tolerated on open before compacting
const COMPACT_SLACK: usize = 64;

/// Options for opening a [`FileStore`]
#[derive(Debug, Clone)]
pub struct FileStoreOptions {
    /// Byte capacity; `None` disables the quota
    pub capacity: Option<usize>,
    /// fsync after every mutation
    pub sync_writes: bool,
}

impl Default for FileStoreOptions {
    fn default() -> Self {
        Self {
            capacity: Some(DEFAULT_CAPACITY),
            sync_writes: false,
        }
    }
}

impl FileStoreOptions {
    /// Set the byte capacity
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable or disable fsync per mutation
    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }
}

struct State {
    table: Table,
    log: File,
    /// Bytes of the log known to hold complete records
    log_len: u64,
    /// Records in the log, live or dead
    records: usize,
    closed: bool,
}

/// Persistent store backed by an append-only log file
pub struct FileStore {
    dir: PathBuf,
    options: FileStoreOptions,
    state: RwLock<State>,
}

impl FileStore {
    /// Open or create a store in the given directory
    ///
    /// # Arguments
    /// * `dir` - Directory holding the log file
    /// * `options` - Capacity and durability options
    ///
    /// # Returns
    /// * `Result<FileStore>` - Store handle
    pub fn open<P: AsRef<Path>>(dir: P, options: FileStoreOptions) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let log_path = dir.join(LOG_FILE);
        let state = match Self::read_log(&log_path)? {
            Some(data) => Self::open_existing(&log_path, &data, options.capacity)?,
            None => Self::create_new(dir, options.capacity)?,
        };

        let store = FileStore {
            dir: dir.to_path_buf(),
            options,
            state: RwLock::new(state),
        };

        let needs_compaction = {
            let state = store.state.read();
            state.records > state.table.len() * 2 + COMPACT_SLACK
        };
        if needs_compaction {
            store.compact()?;
        }

        Ok(store)
    }

    /// Log contents, or `None` when there is no log worth replaying
    ///
    /// A log cut short inside its header was never written to, and is
    /// replaced with a fresh one.
    fn read_log(log_path: &Path) -> Result<Option<Vec<u8>>> {
        if !log_path.exists() {
            return Ok(None);
        }

        let data = fs::read(log_path)?;
        if data.len() < HEADER_LEN && create_header(LOG_VERSION).starts_with(&data) {
            warn!(
                path = %log_path.display(),
                bytes = data.len(),
                "store log has an incomplete header, starting fresh"
            );
            return Ok(None);
        }
        Ok(Some(data))
    }

    fn open_existing(log_path: &Path, data: &[u8], capacity: Option<usize>) -> Result<State> {
        parse_header(data)?;

        let body = &data[HEADER_LEN..];
        let (records, consumed) = parse_records(body);

        let mut table = Table::new(capacity);
        for record in &records {
            match record {
                Record::Set { key, value } => table.insert(key, value),
                Record::Delete { key } => {
                    table.remove(key);
                }
            }
        }
        let record_count = records.len();

        let log = OpenOptions::new().append(true).open(log_path)?;
        let log_len = (HEADER_LEN + consumed) as u64;

        if consumed < body.len() {
            warn!(
                path = %log_path.display(),
                dropped_bytes = body.len() - consumed,
                "truncating torn tail of store log"
            );
            log.set_len(log_len)?;
        }

        debug!(
            path = %log_path.display(),
            entries = table.len(),
            records = record_count,
            "replayed store log"
        );

        Ok(State {
            table,
            log,
            log_len,
            records: record_count,
            closed: false,
        })
    }

    /// Write a header-only log through the scratch file, then open it
    fn create_new(dir: &Path, capacity: Option<usize>) -> Result<State> {
        let log_path = dir.join(LOG_FILE);
        let tmp_path = dir.join(TMP_FILE);

        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(&create_header(LOG_VERSION))?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &log_path)?;

        let log = OpenOptions::new().append(true).open(&log_path)?;

        Ok(State {
            table: Table::new(capacity),
            log,
            log_len: HEADER_LEN as u64,
            records: 0,
            closed: false,
        })
    }

    /// Append a record, rolling the file back if the write is partial
    fn append(state: &mut State, line: &[u8], sync: bool) -> Result<()> {
        let written = state.log.write_all(line).and_then(|_| {
            if sync {
                state.log.sync_data()
            } else {
                Ok(())
            }
        });

        if let Err(e) = written {
            let _ = state.log.set_len(state.log_len);
            return Err(Error::Io(e));
        }

        state.log_len += line.len() as u64;
        state.records += 1;
        Ok(())
    }

    /// Rewrite the log so it holds exactly one record per live entry
    pub fn compact(&self) -> Result<()> {
        let mut state = self.state.write();
        if state.closed {
            return Err(Error::Closed);
        }

        let log_path = self.dir.join(LOG_FILE);
        let tmp_path = self.dir.join(TMP_FILE);

        let mut buf = create_header(LOG_VERSION);
        for (key, value) in state.table.iter() {
            buf.extend(encode_set(key, value));
        }

        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(&buf)?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &log_path)?;

        let before = state.records;
        state.log = OpenOptions::new().append(true).open(&log_path)?;
        state.log_len = buf.len() as u64;
        state.records = state.table.len();

        debug!(before, after = state.records, "compacted store log");
        Ok(())
    }

    /// Bytes currently occupied by keys and values
    pub fn usage(&self) -> usize {
        self.state.read().table.used()
    }

    /// Configured capacity, if any
    pub fn capacity(&self) -> Option<usize> {
        self.options.capacity
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.state.read().table.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sync the log and reject further mutations. Reads keep working.
    pub fn close(&self) -> Result<()> {
        let mut state = self.state.write();
        if state.closed {
            return Ok(());
        }

        state.log.sync_all()?;
        state.closed = true;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.state.read().table.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Table::validate(key, value)?;

        let mut state = self.state.write();
        if state.closed {
            return Err(Error::Closed);
        }

        state.table.check_capacity(key, value)?;
        Self::append(&mut state, &encode_set(key, value), self.options.sync_writes)?;
        state.table.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut state = self.state.write();
        if state.closed {
            return Err(Error::Closed);
        }

        if state.table.get(key).is_none() {
            return Ok(());
        }

        Self::append(&mut state, &encode_delete(key), self.options.sync_writes)?;
        state.table.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.state.read().table.keys()
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> FileStore {
        FileStore::open(dir.path(), FileStoreOptions::default()).unwrap()
    }

    #[test]
    fn test_create_and_open() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);

        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        store.close().unwrap();

        // Reopen
        let store = open(&dir);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_persistence() {
        let dir = TempDir::new().unwrap();

        {
            let store = open(&dir);
            store.set("poke_cache_pk_1", "{\"timestamp\":1,\"data\":{}}").unwrap();
            store.set("poke_favs", "[]").unwrap();
            store.set("poke_favs", "[{\"id\":25}]").unwrap();
            store.remove("poke_cache_pk_1").unwrap();
            store.close().unwrap();
        }

        {
            let store = open(&dir);
            assert_eq!(store.len(), 1);
            assert_eq!(store.get("poke_favs").as_deref(), Some("[{\"id\":25}]"));
            assert_eq!(store.get("poke_cache_pk_1"), None);
        }
    }

    #[test]
    fn test_quota_exceeded() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(
            dir.path(),
            FileStoreOptions::default().with_capacity(Some(20)),
        )
        .unwrap();

        store.set("a", "0123456789").unwrap();
        let result = store.set("b", "0123456789");
        assert!(matches!(result, Err(Error::QuotaExceeded { .. })));

        // Rejected write is not persisted either
        drop(store);
        let store = open(&dir);
        assert_eq!(store.get("b"), None);
        assert_eq!(store.usage(), 11);
    }

    #[test]
    fn test_torn_tail_is_truncated() {
        let dir = TempDir::new().unwrap();
        {
            let store = open(&dir);
            store.set("kept", "1").unwrap();
        }

        let log_path = dir.path().join(LOG_FILE);
        let before = fs::read(&log_path).unwrap().len();
        {
            let mut log = OpenOptions::new().append(true).open(&log_path).unwrap();
            log.write_all(b"S\tlost\t{\"half").unwrap();
        }

        let store = open(&dir);
        assert_eq!(store.get("kept").as_deref(), Some("1"));
        assert_eq!(store.get("lost"), None);
        assert_eq!(fs::read(&log_path).unwrap().len(), before);

        // Appends after recovery replay cleanly
        store.set("after", "2").unwrap();
        drop(store);
        let store = open(&dir);
        assert_eq!(store.get("after").as_deref(), Some("2"));
    }

    #[test]
    fn test_compact_keeps_live_entries() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);

        for i in 0..10 {
            store.set("counter", &i.to_string()).unwrap();
        }
        store.set("other", "x").unwrap();
        store.compact().unwrap();

        let log = fs::read(dir.path().join(LOG_FILE)).unwrap();
        let (records, _) = parse_records(&log[HEADER_LEN..]);
        assert_eq!(records.len(), 2);

        drop(store);
        let store = open(&dir);
        assert_eq!(store.get("counter").as_deref(), Some("9"));
        assert_eq!(store.get("other").as_deref(), Some("x"));
    }

    #[test]
    fn test_set_after_close() {
        let dir = TempDir::new().unwrap();
        let store = open(&dir);
        store.set("k", "v").unwrap();

        store.close().unwrap();
        store.close().unwrap(); // Should not error

        assert!(matches!(store.set("k", "w"), Err(Error::Closed)));
        assert!(matches!(store.remove("k"), Err(Error::Closed)));
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_rejects_invalid_header() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(LOG_FILE), b"not a log").unwrap();

        let result = FileStore::open(dir.path(), FileStoreOptions::default());
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_empty_log_is_recreated() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join(LOG_FILE);
        fs::write(&log_path, b"").unwrap();

        let store = open(&dir);
        assert!(store.is_empty());
        store.set("k", "v").unwrap();
        drop(store);

        let store = open(&dir);
        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert!(!dir.path().join(TMP_FILE).exists());
    }

    #[test]
    fn test_partial_header_is_recreated() {
        let dir = TempDir::new().unwrap();
        let log_path = dir.path().join(LOG_FILE);
        fs::write(&log_path, &create_header(LOG_VERSION)[..5]).unwrap();

        let store = open(&dir);
        assert!(store.is_empty());
        assert_eq!(fs::read(&log_path).unwrap(), create_header(LOG_VERSION));
    }

    #[test]
    fn test_sync_writes_persist() {
        let dir = TempDir::new().unwrap();
        let options = FileStoreOptions::default().with_sync_writes(true);
        {
            let store = FileStore::open(dir.path(), options.clone()).unwrap();
            store.set("poke_history", "[]").unwrap();
            store.remove("poke_history").unwrap();
            store.set("poke_favs", "[]").unwrap();
        }

        let store = FileStore::open(dir.path(), options).unwrap();
        assert_eq!(store.keys(), vec!["poke_favs".to_string()]);
    }
}
