//! # Review Filter
//!
//! Narrows a collection of reviews by optional location and date-range
//! criteria. The filter is a pure predicate pass: it neither scores nor
//! reorders.
//!
//! Criteria arrive as raw strings in a [`ReviewQuery`] and are validated
//! into a [`ReviewFilter`] before any review is inspected, so a malformed
//! criterion fails the whole request instead of silently matching nothing.
//!
//! Date bounds are calendar dates (`YYYY-MM-DD`) and compare against the
//! review timestamp at midnight of that date. Both bounds are inclusive,
//! which means `end_date=2024-01-01` keeps `2024-01-01 00:00:00` and drops
//! anything later on that day.

use crate::locations::is_allowed_location;
use crate::model::Review;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// Format accepted for `start_date` and `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, optional filter criteria as supplied by a client.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Filter validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The `location` criterion is not on the allow-list.
    InvalidLocation(String),
    /// A date criterion is not a `YYYY-MM-DD` calendar date.
    InvalidDateFormat {
        field: &'static str,
        value: String,
    },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::InvalidLocation(location) => {
                write!(f, "'{location}' is not an allowed location.")
            }
            FilterError::InvalidDateFormat { field, value } => {
                write!(f, "Invalid {field} '{value}': expected YYYY-MM-DD.")
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Validated, typed filter criteria.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewFilter {
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl ReviewFilter {
    /// Validate raw criteria. Location is checked before the dates.
    pub fn from_query(query: &ReviewQuery) -> Result<Self, FilterError> {
        let location = match &query.location {
            Some(location) if !is_allowed_location(location) => {
                return Err(FilterError::InvalidLocation(location.clone()));
            }
            other => other.clone(),
        };
        let start = parse_bound("start_date", query.start_date.as_deref())?;
        let end = parse_bound("end_date", query.end_date.as_deref())?;
        Ok(Self {
            location,
            start,
            end,
        })
    }

    /// True when no criterion is set and [`ReviewFilter::apply`] is the identity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.location.is_none() && self.start.is_none() && self.end.is_none()
    }

    /// Whether a single review satisfies every criterion.
    #[must_use]
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(location) = &self.location {
            if review.location != *location {
                return false;
            }
        }
        let at = review.timestamp.as_naive();
        if let Some(start) = self.start {
            if at < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if at > end {
                return false;
            }
        }
        true
    }

    /// Keep the matching reviews, preserving their relative order.
    #[must_use]
    pub fn apply(&self, reviews: Vec<Review>) -> Vec<Review> {
        if self.is_empty() {
            return reviews;
        }
        reviews.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Validate `query` and filter `reviews` in one step.
pub fn filter_reviews(
    reviews: Vec<Review>,
    query: &ReviewQuery,
) -> Result<Vec<Review>, FilterError> {
    let filter = ReviewFilter::from_query(query)?;
    Ok(filter.apply(reviews))
}

fn parse_bound(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDateTime>, FilterError> {
    let Some(value) = value else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| Some(date.and_time(NaiveTime::MIN)))
        .map_err(|_| FilterError::InvalidDateFormat {
            field,
            value: value.to_string(),
        })
}
