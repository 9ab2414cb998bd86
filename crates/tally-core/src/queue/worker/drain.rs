use std::sync::atomic::Ordering;

use tracing::{info, warn};

use super::Worker;
use crate::event::StatEvent;
use crate::queue::command::{DrainOutcome, DrainReport};

/// Consecutive pop failures tolerated before a pass is abandoned. A store
/// can fail asymmetrically (reads fine, deletes failing), and without a
/// bound such a pass would spin forever.
const MAX_CONSECUTIVE_POP_FAILURES: u32 = 8;

impl Worker {
    /// One full drain pass: pop, decode, dispatch, until the store runs
    /// empty or a stop is requested.
    ///
    /// Entries leave the store before their submission is attempted, so a
    /// failed submission loses exactly that entry and never stalls the loop.
    /// A pop or decode failure is a skipped iteration, not an abort, but
    /// too many pop failures in a row abandon the pass with the remaining
    /// work still pending.
    pub(in crate::queue) fn handle_drain(&mut self) -> DrainOutcome {
        if !self.pending {
            self.metrics.record_drain("idle");
            return DrainOutcome::Idle;
        }

        info!("drain started");
        self.pending = false;
        // A stop request left over from an earlier pass must not cancel
        // this one.
        self.stop.store(false, Ordering::SeqCst);

        let mut report = DrainReport::default();
        let mut pop_failures = 0u32;
        loop {
            if self.stop.load(Ordering::SeqCst) {
                report.halted = true;
                break;
            }

            match self.store.pop_front() {
                Ok(Some(raw)) => {
                    pop_failures = 0;
                    match serde_json::from_slice::<StatEvent>(&raw) {
                        Ok(event) => self.dispatch(event, &mut report),
                        Err(e) => {
                            warn!(error = %e, "corrupt entry, skipping");
                            self.metrics.record_dropped("unknown", "decode_failed");
                            report.skipped += 1;
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "store unavailable mid-drain, skipping");
                    self.metrics.record_dropped("unknown", "store_unavailable");
                    report.skipped += 1;
                    pop_failures += 1;
                    if pop_failures >= MAX_CONSECUTIVE_POP_FAILURES {
                        warn!(
                            failures = pop_failures,
                            "store failing repeatedly, abandoning drain pass"
                        );
                        report.halted = true;
                        break;
                    }
                }
            }
        }

        if report.halted {
            // Work remains in the store; the next drain must pick it up.
            self.pending = true;
        }

        self.metrics.set_queue_depth(self.backlog());
        self.metrics
            .record_drain(if report.halted { "halted" } else { "completed" });
        info!(
            submitted = report.submitted,
            failed = report.failed,
            skipped = report.skipped,
            halted = report.halted,
            "drain finished"
        );
        DrainOutcome::Completed(report)
    }

    /// Closed dispatch table: each kind routes to exactly one submitter
    /// call, and a kind without a route is a compile error.
    fn dispatch(&self, event: StatEvent, report: &mut DrainReport) {
        let kind = event.kind();
        let result = match &event {
            StatEvent::Request(stat) => self.submitter.submit_request_stat(stat),
            StatEvent::Place(stat) => self.submitter.submit_place_stat(stat),
            StatEvent::Accept(stat) => self.submitter.submit_accept_stat(stat),
            StatEvent::Rating(stat) => self.submitter.submit_rating_stat(stat),
            StatEvent::PinPurchase(stat) => self.submitter.submit_pin_purchase_stat(stat),
            StatEvent::Achievement(stat) => self.submitter.submit_achievement_stat(stat),
        };

        match result {
            Ok(()) => {
                self.metrics.record_submitted(kind);
                report.submitted += 1;
            }
            Err(e) => {
                warn!(kind, error = %e, "submission failed, event lost");
                self.metrics.record_dropped(kind, "submit_failed");
                report.failed += 1;
            }
        }
    }
}
