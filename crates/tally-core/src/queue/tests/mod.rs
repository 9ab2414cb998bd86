use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult, SubmitError};
use crate::event::{
    AcceptStat, AchievementStat, PinPurchaseStat, PlaceStat, RatingStat, RequestStat, StatEvent,
};
use crate::queue::command::{DrainOutcome, DrainReport, QueueCommand};
use crate::queue::worker::Worker;
use crate::store::{MemoryStore, QueueStore, RocksDbStore};
use crate::submit::StatsSubmitter;

mod common;

use common::*;
