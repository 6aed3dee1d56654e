use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Strongly typed review identifier.
///
/// Reviews created through the API get a freshly generated ULID. Reviews
/// loaded from the seed dataset keep whatever identifier the dataset
/// carries, so the only structural requirement is that it is non-empty.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct ReviewId(String);

/// Returned when an identifier is empty or whitespace only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyReviewId;

impl Display for EmptyReviewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "review id must not be empty")
    }
}

impl std::error::Error for EmptyReviewId {}

impl ReviewId {
    /// Generate a new globally unique identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ReviewId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReviewId {
    type Err = EmptyReviewId;

    /// Kept verbatim; only blank input is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(EmptyReviewId);
        }
        Ok(ReviewId(s.to_string()))
    }
}

impl Serialize for ReviewId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ReviewId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<ReviewId>().map_err(serde::de::Error::custom)
    }
}
