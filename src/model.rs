use crate::ids::ReviewId;
use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Wire and storage format of every review timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Creation time of a review with second precision.
///
/// Always rendered as `YYYY-MM-DD HH:MM:SS`. Ordering is chronological,
/// which is what the date-range filter relies on.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Current local wall-clock time, truncated to whole seconds.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().naive_local().trunc_subsecs(0))
    }

    #[must_use]
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT).map(Timestamp)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<Timestamp>().map_err(|e| {
            serde::de::Error::custom(format!("invalid timestamp '{s}': {e}"))
        })
    }
}

/// A stored, location-tagged piece of feedback text.
///
/// Reviews are immutable once created. The serde names match the dataset
/// column headers and the JSON keys clients see.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review {
    #[serde(rename = "ReviewId")]
    pub review_id: ReviewId,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: Timestamp,
    #[serde(rename = "ReviewBody")]
    pub review_body: String,
}

impl Review {
    /// Build a brand-new review with a generated id and the current time.
    ///
    /// Callers validate `location` and `review_body` first.
    #[must_use]
    pub fn create(location: String, review_body: String) -> Self {
        Self {
            review_id: ReviewId::generate(),
            location,
            timestamp: Timestamp::now(),
            review_body,
        }
    }
}
