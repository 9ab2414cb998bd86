use serde::{Deserialize, Serialize};

/// Canonical textual timestamp carried by every stat event.
///
/// Producers hand over either an already-formatted ISO-8601 string or a
/// `chrono` datetime; both normalize to the same textual form, so re-encoding
/// a decoded event yields identical JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EventTime(String);

impl EventTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<chrono::NaiveDateTime> for EventTime {
    fn from(dt: chrono::NaiveDateTime) -> Self {
        // The fractional part is omitted when zero, matching the textual
        // form the statistics service already accepts.
        Self(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for EventTime {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        dt.naive_utc().into()
    }
}

impl From<&str> for EventTime {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EventTime {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Timing sample for one handled request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestStat {
    pub method: String,
    pub user_id: i64,
    pub endpoint: String,
    pub process_time: f64,
    pub status_code: u16,
    pub request_dt: EventTime,
    pub token: String,
}

/// User action on a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceStat {
    pub action: String,
    pub user_id: i64,
    pub place_id: i64,
    pub action_dt: EventTime,
    pub token: String,
}

/// Accept/decline action on a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptStat {
    pub action: String,
    pub user_id: i64,
    pub place_id: i64,
    pub action_dt: EventTime,
    pub token: String,
}

/// Rating change on a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingStat {
    pub old_rating: f64,
    pub new_rating: f64,
    pub user_id: i64,
    pub place_id: i64,
    pub action_dt: EventTime,
    pub token: String,
}

/// Pin purchase by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PinPurchaseStat {
    pub pin_id: i64,
    pub user_id: i64,
    pub purchase_dt: EventTime,
    pub token: String,
}

/// Achievement unlocked by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AchievementStat {
    pub achievement_id: i64,
    pub user_id: i64,
    pub achievement_dt: EventTime,
    pub token: String,
}

/// A queued telemetry event. Internally tagged on `type`, so the encoded
/// form is a flat JSON object carrying the discriminator alongside the
/// fields — the shape the statistics service expects.
///
/// Decoding is a closed match: an entry with an unknown or missing `type`
/// fails to decode, and the drain loop skips it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatEvent {
    Request(RequestStat),
    Place(PlaceStat),
    Accept(AcceptStat),
    Rating(RatingStat),
    PinPurchase(PinPurchaseStat),
    Achievement(AchievementStat),
}

impl StatEvent {
    /// Wire discriminator for this event, also used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            StatEvent::Request(_) => "request",
            StatEvent::Place(_) => "place",
            StatEvent::Accept(_) => "accept",
            StatEvent::Rating(_) => "rating",
            StatEvent::PinPurchase(_) => "pin_purchase",
            StatEvent::Achievement(_) => "achievement",
        }
    }
}

impl From<RequestStat> for StatEvent {
    fn from(stat: RequestStat) -> Self {
        Self::Request(stat)
    }
}

impl From<PlaceStat> for StatEvent {
    fn from(stat: PlaceStat) -> Self {
        Self::Place(stat)
    }
}

impl From<AcceptStat> for StatEvent {
    fn from(stat: AcceptStat) -> Self {
        Self::Accept(stat)
    }
}

impl From<RatingStat> for StatEvent {
    fn from(stat: RatingStat) -> Self {
        Self::Rating(stat)
    }
}

impl From<PinPurchaseStat> for StatEvent {
    fn from(stat: PinPurchaseStat) -> Self {
        Self::PinPurchase(stat)
    }
}

impl From<AchievementStat> for StatEvent {
    fn from(stat: AchievementStat) -> Self {
        Self::Achievement(stat)
    }
}
