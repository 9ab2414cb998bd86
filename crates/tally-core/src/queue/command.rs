use crate::event::StatEvent;

/// Summary of one completed drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Entries decoded and accepted by the submitter.
    pub submitted: u64,
    /// Entries whose submission call failed. Lost — never retried.
    pub failed: u64,
    /// Iterations where the pop or decode failed. The entry, if any, is lost.
    pub skipped: u64,
    /// True when the pass was halted early, by a stop request or by a
    /// store that kept failing. Remaining work stays pending either way.
    pub halted: bool,
}

/// Result of a `drain()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Nothing was pending; no store access or submissions occurred.
    Idle,
    /// A drain pass ran (to completion, or until halted).
    Completed(DrainReport),
}

/// Commands sent from producer threads to the single-threaded queue worker.
///
/// Variants that expect a response carry a `tokio::sync::oneshot::Sender`
/// for the reply. `Record` is fire-and-forget: producers never learn about
/// store outcomes, by contract.
pub enum QueueCommand {
    Record {
        event: StatEvent,
    },
    Len {
        reply: tokio::sync::oneshot::Sender<u64>,
    },
    Drain {
        reply: tokio::sync::oneshot::Sender<DrainOutcome>,
    },
    Shutdown,
}
