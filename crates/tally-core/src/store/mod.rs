mod memory;
mod rocksdb;
mod traits;

pub use memory::MemoryStore;
pub use self::rocksdb::RocksDbStore;
pub use traits::QueueStore;
