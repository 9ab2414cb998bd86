pub mod command;
mod worker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tracing::info;

use crate::config::QueueConfig;
use crate::error::QueueError;
use crate::event::StatEvent;
use crate::store::QueueStore;
use crate::submit::StatsSubmitter;

pub use command::{DrainOutcome, DrainReport, QueueCommand};

use worker::Worker;

/// Handle to the durable stats queue.
///
/// Owns the worker thread and the inbound command channel. Producer threads
/// call `record()` from arbitrary request-handling contexts; any caller (a
/// periodic scheduler, typically) triggers `drain()`. The single worker
/// thread serializes everything, so at most one drain runs at a time and a
/// concurrent trigger simply queues behind it.
pub struct StatsQueue {
    command_tx: crossbeam_channel::Sender<QueueCommand>,
    stop: Arc<AtomicBool>,
    worker_thread: Option<thread::JoinHandle<()>>,
}

impl StatsQueue {
    /// Create a queue over the given store and submitter, spawning the
    /// worker on a dedicated OS thread.
    #[tracing::instrument(skip_all)]
    pub fn new(
        config: &QueueConfig,
        store: Arc<dyn QueueStore>,
        submitter: Arc<dyn StatsSubmitter>,
    ) -> Result<Self, QueueError> {
        let (tx, rx) =
            crossbeam_channel::bounded::<QueueCommand>(config.worker.command_channel_capacity);
        let stop = Arc::new(AtomicBool::new(false));

        let worker_stop = stop.clone();
        let handle = thread::Builder::new()
            .name("tally-worker".to_string())
            .spawn(move || {
                let mut worker = Worker::new(store, submitter, rx, worker_stop);
                worker.run();
            })
            .map_err(|e| QueueError::WorkerSpawn(e.to_string()))?;

        info!("stats queue started");

        Ok(Self {
            command_tx: tx,
            stop,
            worker_thread: Some(handle),
        })
    }

    /// Buffer one event. Blocks only while the channel is full (e.g. behind
    /// a long drain); store failures never surface here — the event is
    /// silently dropped and counted instead.
    pub fn record(&self, event: impl Into<StatEvent>) -> Result<(), QueueError> {
        self.command_tx
            .send(QueueCommand::Record {
                event: event.into(),
            })
            .map_err(|_| QueueError::ChannelDisconnected)
    }

    /// Current backlog size. An unreachable store reads as zero.
    pub fn len(&self) -> Result<u64, QueueError> {
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.command_tx
            .send(QueueCommand::Len { reply: reply_tx })
            .map_err(|_| QueueError::ChannelDisconnected)?;
        reply_rx
            .blocking_recv()
            .map_err(|_| QueueError::ChannelDisconnected)
    }

    /// Trigger a drain pass and wait for its outcome. Idempotent: with
    /// nothing pending this returns `DrainOutcome::Idle` without touching
    /// the store or the submitter.
    #[tracing::instrument(skip_all)]
    pub fn drain(&self) -> Result<DrainOutcome, QueueError> {
        let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
        self.command_tx
            .send(QueueCommand::Drain { reply: reply_tx })
            .map_err(|_| QueueError::ChannelDisconnected)?;
        reply_rx
            .blocking_recv()
            .map_err(|_| QueueError::ChannelDisconnected)
    }

    /// Request that an in-progress drain halt at the next iteration
    /// boundary. Entries still queued stay in the store for a later drain.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Graceful shutdown: stop the worker and wait for it to finish.
    #[tracing::instrument(skip_all)]
    pub fn shutdown(mut self) -> Result<(), QueueError> {
        info!("initiating stats queue shutdown");

        // Send shutdown command (ignore error if channel already closed)
        let _ = self.command_tx.send(QueueCommand::Shutdown);

        if let Some(handle) = self.worker_thread.take() {
            handle.join().map_err(|_| QueueError::WorkerPanicked)?;
        }

        info!("stats queue shutdown complete");
        Ok(())
    }
}

impl Drop for StatsQueue {
    fn drop(&mut self) {
        // If shutdown wasn't called explicitly, attempt to stop the worker
        if self.worker_thread.is_some() {
            let _ = self.command_tx.send(QueueCommand::Shutdown);
            if let Some(handle) = self.worker_thread.take() {
                let _ = handle.join();
            }
        }
    }
}

#[cfg(test)]
mod tests;
