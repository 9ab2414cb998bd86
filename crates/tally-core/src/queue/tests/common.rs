use super::*;

/// Submitter double that records every call it receives. Kinds listed in
/// `fail_kinds` fail after being recorded — delivery was still attempted.
#[derive(Default)]
pub(super) struct RecordingSubmitter {
    calls: Mutex<Vec<StatEvent>>,
    fail_kinds: Vec<&'static str>,
}

impl RecordingSubmitter {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn failing_on(kinds: &[&'static str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_kinds: kinds.to_vec(),
        }
    }

    pub(super) fn calls(&self) -> Vec<StatEvent> {
        self.calls.lock().unwrap().clone()
    }

    fn submit(&self, event: StatEvent) -> Result<(), SubmitError> {
        let kind = event.kind();
        self.calls.lock().unwrap().push(event);
        if self.fail_kinds.contains(&kind) {
            return Err(SubmitError::Transport(format!(
                "injected failure for {kind}"
            )));
        }
        Ok(())
    }
}

impl StatsSubmitter for RecordingSubmitter {
    fn submit_request_stat(&self, stat: &RequestStat) -> Result<(), SubmitError> {
        self.submit(StatEvent::Request(stat.clone()))
    }

    fn submit_place_stat(&self, stat: &PlaceStat) -> Result<(), SubmitError> {
        self.submit(StatEvent::Place(stat.clone()))
    }

    fn submit_accept_stat(&self, stat: &AcceptStat) -> Result<(), SubmitError> {
        self.submit(StatEvent::Accept(stat.clone()))
    }

    fn submit_rating_stat(&self, stat: &RatingStat) -> Result<(), SubmitError> {
        self.submit(StatEvent::Rating(stat.clone()))
    }

    fn submit_pin_purchase_stat(&self, stat: &PinPurchaseStat) -> Result<(), SubmitError> {
        self.submit(StatEvent::PinPurchase(stat.clone()))
    }

    fn submit_achievement_stat(&self, stat: &AchievementStat) -> Result<(), SubmitError> {
        self.submit(StatEvent::Achievement(stat.clone()))
    }
}

/// Submitter that requests a stop on its first call, then delegates to the
/// recorder. Models an operator halting a drain while it is running.
pub(super) struct HaltingSubmitter {
    pub(super) stop: Arc<AtomicBool>,
    pub(super) inner: RecordingSubmitter,
    armed: AtomicBool,
}

impl HaltingSubmitter {
    pub(super) fn new(stop: Arc<AtomicBool>) -> Self {
        Self {
            stop,
            inner: RecordingSubmitter::new(),
            armed: AtomicBool::new(true),
        }
    }

    fn maybe_halt(&self) {
        if self.armed.swap(false, Ordering::SeqCst) {
            self.stop.store(true, Ordering::SeqCst);
        }
    }
}

impl StatsSubmitter for HaltingSubmitter {
    fn submit_request_stat(&self, stat: &RequestStat) -> Result<(), SubmitError> {
        self.maybe_halt();
        self.inner.submit_request_stat(stat)
    }

    fn submit_place_stat(&self, stat: &PlaceStat) -> Result<(), SubmitError> {
        self.maybe_halt();
        self.inner.submit_place_stat(stat)
    }

    fn submit_accept_stat(&self, stat: &AcceptStat) -> Result<(), SubmitError> {
        self.maybe_halt();
        self.inner.submit_accept_stat(stat)
    }

    fn submit_rating_stat(&self, stat: &RatingStat) -> Result<(), SubmitError> {
        self.maybe_halt();
        self.inner.submit_rating_stat(stat)
    }

    fn submit_pin_purchase_stat(&self, stat: &PinPurchaseStat) -> Result<(), SubmitError> {
        self.maybe_halt();
        self.inner.submit_pin_purchase_stat(stat)
    }

    fn submit_achievement_stat(&self, stat: &AchievementStat) -> Result<(), SubmitError> {
        self.maybe_halt();
        self.inner.submit_achievement_stat(stat)
    }
}

/// Store double with an asymmetric failure mode: pushes and length reads
/// work, every pop fails. Models a backing store whose delete path is
/// broken while reads still succeed.
#[derive(Default)]
pub(super) struct BrokenPopStore {
    pub(super) inner: MemoryStore,
}

impl QueueStore for BrokenPopStore {
    fn push_back(&self, entry: &[u8]) -> StoreResult<()> {
        self.inner.push_back(entry)
    }

    fn pop_front(&self) -> StoreResult<Option<Vec<u8>>> {
        Err(StoreError::Unavailable("delete path failing".to_string()))
    }

    fn len(&self) -> StoreResult<u64> {
        self.inner.len()
    }
}

pub(super) fn test_worker(
    store: Arc<dyn QueueStore>,
    submitter: Arc<dyn StatsSubmitter>,
) -> (
    crossbeam_channel::Sender<QueueCommand>,
    Worker,
    Arc<AtomicBool>,
) {
    let (tx, rx) = crossbeam_channel::bounded(256);
    let stop = Arc::new(AtomicBool::new(false));
    let worker = Worker::new(store, submitter, rx, stop.clone());
    (tx, worker, stop)
}

pub(super) fn request_stat() -> RequestStat {
    RequestStat {
        method: "GET".to_string(),
        user_id: 1,
        endpoint: "api".to_string(),
        process_time: 0.02,
        status_code: 200,
        request_dt: "2024-01-01T00:00:00".into(),
        token: "t".to_string(),
    }
}

pub(super) fn place_stat() -> PlaceStat {
    PlaceStat {
        action: "visit".to_string(),
        user_id: 2,
        place_id: 10,
        action_dt: "2024-01-02T08:15:00".into(),
        token: "t".to_string(),
    }
}

pub(super) fn rating_stat() -> RatingStat {
    RatingStat {
        old_rating: 4.5,
        new_rating: 4.75,
        user_id: 3,
        place_id: 10,
        action_dt: "2024-01-03T20:00:00".into(),
        token: "t".to_string(),
    }
}

pub(super) fn send_record(
    tx: &crossbeam_channel::Sender<QueueCommand>,
    event: impl Into<StatEvent>,
) {
    tx.send(QueueCommand::Record {
        event: event.into(),
    })
    .unwrap();
}

pub(super) fn send_len(
    tx: &crossbeam_channel::Sender<QueueCommand>,
) -> tokio::sync::oneshot::Receiver<u64> {
    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    tx.send(QueueCommand::Len { reply: reply_tx }).unwrap();
    reply_rx
}

pub(super) fn send_drain(
    tx: &crossbeam_channel::Sender<QueueCommand>,
) -> tokio::sync::oneshot::Receiver<DrainOutcome> {
    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    tx.send(QueueCommand::Drain { reply: reply_tx }).unwrap();
    reply_rx
}
