pub mod config;
pub mod error;
pub mod event;
pub mod metrics;
pub mod queue;
pub mod store;
pub mod submit;
pub mod telemetry;

pub use config::QueueConfig;
pub use error::{QueueError, StoreError, SubmitError};
pub use event::{
    AcceptStat, AchievementStat, EventTime, PinPurchaseStat, PlaceStat, RatingStat, RequestStat,
    StatEvent,
};
pub use queue::{DrainOutcome, DrainReport, StatsQueue};
pub use store::{MemoryStore, QueueStore, RocksDbStore};
pub use submit::StatsSubmitter;
