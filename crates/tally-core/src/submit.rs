use crate::error::SubmitError;
use crate::event::{
    AcceptStat, AchievementStat, PinPurchaseStat, PlaceStat, RatingStat, RequestStat,
};

/// Client for the remote statistics service, one call per event kind.
///
/// The drain loop treats every call as a single delivery attempt: by the time
/// a submission runs, the entry has already left the durable queue, so a
/// failure loses that one event and is never retried.
pub trait StatsSubmitter: Send + Sync {
    fn submit_request_stat(&self, stat: &RequestStat) -> Result<(), SubmitError>;

    fn submit_place_stat(&self, stat: &PlaceStat) -> Result<(), SubmitError>;

    fn submit_accept_stat(&self, stat: &AcceptStat) -> Result<(), SubmitError>;

    fn submit_rating_stat(&self, stat: &RatingStat) -> Result<(), SubmitError>;

    fn submit_pin_purchase_stat(&self, stat: &PinPurchaseStat) -> Result<(), SubmitError>;

    fn submit_achievement_stat(&self, stat: &AchievementStat) -> Result<(), SubmitError>;
}
