use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};

use crate::event::StatEvent;
use crate::metrics::Metrics;
use crate::queue::command::QueueCommand;
use crate::store::QueueStore;
use crate::submit::StatsSubmitter;

mod drain;

/// Single-threaded queue worker. Owns the backing store handle and all
/// mutable queue state; producers and the drain trigger reach it only
/// through the command channel, so there is exactly one mutator and drains
/// are single-flight by construction.
pub(super) struct Worker {
    store: Arc<dyn QueueStore>,
    submitter: Arc<dyn StatsSubmitter>,
    inbound: Receiver<QueueCommand>,
    /// True when at least one record landed in the store since the last
    /// drain started. Cleared only at drain start.
    pending: bool,
    /// Cooperative cancellation shared with the handle; checked between
    /// drain iterations.
    stop: Arc<AtomicBool>,
    running: bool,
    metrics: Metrics,
}

impl Worker {
    pub(super) fn new(
        store: Arc<dyn QueueStore>,
        submitter: Arc<dyn StatsSubmitter>,
        inbound: Receiver<QueueCommand>,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self {
            store,
            submitter,
            inbound,
            pending: false,
            stop,
            running: true,
            metrics: Metrics::new(),
        }
    }

    /// Run the worker event loop. This blocks the current thread until a
    /// `Shutdown` command is received or the command channel is disconnected.
    pub(super) fn run(&mut self) {
        info!("stats queue worker started");
        self.recover();

        while self.running {
            match self.inbound.recv() {
                Ok(cmd) => self.handle_command(cmd),
                Err(_) => {
                    info!("command channel disconnected, shutting down");
                    self.running = false;
                }
            }
        }

        info!("stats queue worker stopped");
    }

    /// A backlog that survived a restart must be picked up by the next
    /// `drain()` call, so startup seeds the pending flag from the store.
    fn recover(&mut self) {
        match self.store.len() {
            Ok(0) => {}
            Ok(backlog) => {
                info!(backlog, "recovered backlog from store");
                self.pending = true;
                self.metrics.set_queue_depth(backlog);
            }
            Err(e) => warn!(error = %e, "failed to read backlog during recovery"),
        }
    }

    pub(super) fn handle_command(&mut self, cmd: QueueCommand) {
        match cmd {
            QueueCommand::Record { event } => {
                debug!(kind = event.kind(), "record command received");
                self.handle_record(event);
            }
            QueueCommand::Len { reply } => {
                let _ = reply.send(self.backlog());
            }
            QueueCommand::Drain { reply } => {
                debug!("drain command received");
                let outcome = self.handle_drain();
                let _ = reply.send(outcome);
            }
            QueueCommand::Shutdown => {
                info!("shutdown command received");
                self.running = false;
            }
        }
    }

    /// Encode and append one event. Store failure is absorbed here: the
    /// event is dropped, counted, and the producer never sees an error.
    fn handle_record(&mut self, event: StatEvent) {
        let kind = event.kind();
        let encoded = match serde_json::to_vec(&event) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(kind, error = %e, "failed to encode event, dropping");
                self.metrics.record_dropped(kind, "encode_failed");
                return;
            }
        };

        match self.store.push_back(&encoded) {
            Ok(()) => {
                self.pending = true;
                self.metrics.record_event(kind);
                self.metrics.set_queue_depth(self.backlog());
            }
            Err(e) => {
                warn!(kind, error = %e, "store unavailable, dropping event");
                self.metrics.record_dropped(kind, "store_unavailable");
            }
        }
    }

    /// Backlog length; an unreachable store reads as empty.
    fn backlog(&self) -> u64 {
        match self.store.len() {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "failed to read backlog, treating as empty");
                0
            }
        }
    }
}
