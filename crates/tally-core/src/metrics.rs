use opentelemetry::metrics::{Counter, Gauge, Meter};
use opentelemetry::KeyValue;

/// OTel instruments for the stats queue. Created once during worker init;
/// no-op when no meter provider is configured.
///
/// Every lost event increments `tally.events.dropped` with the reason it was
/// lost, so sustained loss is visible to operators even though producers
/// never see an error.
pub struct Metrics {
    events_recorded: Counter<u64>,
    events_submitted: Counter<u64>,
    events_dropped: Counter<u64>,
    drains: Counter<u64>,
    queue_depth: Gauge<u64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create metrics from the global meter provider.
    pub fn new() -> Self {
        let meter = opentelemetry::global::meter("tally");
        Self::from_meter(&meter)
    }

    /// Create metrics from a specific meter (used in tests with an in-memory
    /// exporter).
    pub fn from_meter(meter: &Meter) -> Self {
        Self {
            events_recorded: meter
                .u64_counter("tally.events.recorded")
                .with_description("Events accepted into the durable queue")
                .build(),
            events_submitted: meter
                .u64_counter("tally.events.submitted")
                .with_description("Events handed to the statistics service")
                .build(),
            events_dropped: meter
                .u64_counter("tally.events.dropped")
                .with_description("Events lost, by reason")
                .build(),
            drains: meter
                .u64_counter("tally.drains")
                .with_description("Drain passes by outcome")
                .build(),
            queue_depth: meter
                .u64_gauge("tally.queue.depth")
                .with_description("Current backlog in the durable queue")
                .build(),
        }
    }

    pub fn record_event(&self, kind: &str) {
        self.events_recorded
            .add(1, &[KeyValue::new("kind", kind.to_string())]);
    }

    pub fn record_submitted(&self, kind: &str) {
        self.events_submitted
            .add(1, &[KeyValue::new("kind", kind.to_string())]);
    }

    /// Reasons: `store_unavailable`, `encode_failed`, `decode_failed`,
    /// `submit_failed`. Kind is `unknown` when the entry never decoded.
    pub fn record_dropped(&self, kind: &str, reason: &'static str) {
        self.events_dropped.add(
            1,
            &[
                KeyValue::new("kind", kind.to_string()),
                KeyValue::new("reason", reason),
            ],
        );
    }

    /// Outcomes: `completed`, `halted`, `idle`.
    pub fn record_drain(&self, outcome: &'static str) {
        self.drains
            .add(1, &[KeyValue::new("outcome", outcome)]);
    }

    pub fn set_queue_depth(&self, depth: u64) {
        self.queue_depth.record(depth, &[]);
    }
}
