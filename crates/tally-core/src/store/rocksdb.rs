use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use rocksdb::{ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded, Options};

use crate::error::{StoreError, StoreResult};
use crate::store::traits::QueueStore;

/// Column family holding queue entries, keyed by push sequence number.
const CF_REQUESTS: &str = "requests";

type DB = DBWithThreadMode<MultiThreaded>;

/// RocksDB-backed durable queue store.
///
/// Entries are keyed by a monotonically increasing big-endian u64, so
/// iteration order is FIFO push order and the backlog survives process
/// restarts. The sequence counter and the backlog count are both recovered
/// by a single scan on open; afterwards `len` is a plain counter read, never
/// a column-family scan.
pub struct RocksDbStore {
    db: DB,
    next_seq: AtomicU64,
    backlog: AtomicU64,
}

impl RocksDbStore {
    /// Open or create the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        let cf_descriptor = ColumnFamilyDescriptor::new(CF_REQUESTS, Options::default());
        let db = DB::open_cf_descriptors(&db_opts, path, vec![cf_descriptor])?;

        let (next_seq, backlog) = {
            let cf = db.cf_handle(CF_REQUESTS).ok_or_else(|| {
                StoreError::Unavailable(format!("column family not found: {CF_REQUESTS}"))
            })?;
            let mut backlog = 0u64;
            let mut last_key = None;
            for item in db.iterator_cf(&cf, IteratorMode::Start) {
                let (key, _) = item?;
                backlog += 1;
                last_key = Some(key);
            }
            let next_seq = last_key
                .as_deref()
                .and_then(parse_seq)
                .map(|seq| seq + 1)
                .unwrap_or(0);
            (next_seq, backlog)
        };

        Ok(Self {
            db,
            next_seq: AtomicU64::new(next_seq),
            backlog: AtomicU64::new(backlog),
        })
    }

    fn cf(&self) -> StoreResult<std::sync::Arc<rocksdb::BoundColumnFamily<'_>>> {
        self.db.cf_handle(CF_REQUESTS).ok_or_else(|| {
            StoreError::Unavailable(format!("column family not found: {CF_REQUESTS}"))
        })
    }
}

fn parse_seq(key: &[u8]) -> Option<u64> {
    key.try_into().ok().map(u64::from_be_bytes)
}

impl QueueStore for RocksDbStore {
    fn push_back(&self, entry: &[u8]) -> StoreResult<()> {
        let cf = self.cf()?;
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.db.put_cf(&cf, seq.to_be_bytes(), entry)?;
        self.backlog.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn pop_front(&self) -> StoreResult<Option<Vec<u8>>> {
        let cf = self.cf()?;
        match self.db.iterator_cf(&cf, IteratorMode::Start).next() {
            Some(item) => {
                let (key, value) = item?;
                self.db.delete_cf(&cf, &key)?;
                self.backlog.fetch_sub(1, Ordering::SeqCst);
                Ok(Some(value.into_vec()))
            }
            None => Ok(None),
        }
    }

    fn len(&self) -> StoreResult<u64> {
        Ok(self.backlog.load(Ordering::SeqCst))
    }
}
