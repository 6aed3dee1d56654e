//! # Review Store
//!
//! In-memory, append-only collection of [`Review`] records.
//!
//! ## Seeding
//!
//! The store is seeded once at startup from a CSV dataset whose header row
//! names the `ReviewId`, `Location`, `Timestamp` and `ReviewBody` columns
//! (extra columns are ignored). Any failure to read or parse the dataset is
//! logged and the service starts with an empty store instead of aborting.
//! Rows tagged with a location outside the allow-list, or with an empty
//! body, are skipped with a warning so that every stored review satisfies
//! the same rules as one created through the API.
//!
//! ## Concurrency
//!
//! may_minihttp serves every connection on its own coroutine, so the
//! collection sits behind an [`RwLock`]. [`ReviewStore::append`] holds the
//! write lock for the push only; [`ReviewStore::all`] clones a snapshot
//! under the read lock. A reader therefore never observes a half-applied
//! append, and iteration over a snapshot is unaffected by later appends.

use crate::locations::is_allowed_location;
use crate::model::Review;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::RwLock;
use tracing::{error, info, warn};

/// Authoritative collection of reviews.
#[derive(Debug, Default)]
pub struct ReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl ReviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews: RwLock::new(reviews),
        }
    }

    /// Seed a store from the dataset at `path`.
    ///
    /// Never fails: on any error the failure is logged and an empty store
    /// is returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match read_dataset(path) {
            Ok(reviews) => {
                info!(path = %path.display(), count = reviews.len(), "Reviews loaded successfully");
                Self::with_reviews(reviews)
            }
            Err(e) => {
                error!(path = %path.display(), error = %format!("{e:#}"), "Error loading reviews");
                Self::new()
            }
        }
    }

    /// Add a review to the end of the collection.
    pub fn append(&self, review: Review) -> Result<()> {
        let mut reviews = self
            .reviews
            .write()
            .map_err(|_| anyhow!("review store lock poisoned"))?;
        reviews.push(review);
        Ok(())
    }

    /// Snapshot of every review currently stored, in insertion order.
    pub fn all(&self) -> Result<Vec<Review>> {
        let reviews = self
            .reviews
            .read()
            .map_err(|_| anyhow!("review store lock poisoned"))?;
        Ok(reviews.clone())
    }

    /// Number of stored reviews; `0` if the lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviews.read().map(|r| r.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Poison the lock by panicking while holding the write guard.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.reviews.write();
            panic!("poisoning review store");
        }));
    }
}

/// Read and validate the CSV dataset at `path`.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<Review>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open review dataset: {}", path.display()))?;
    read_reviews(file)
        .with_context(|| format!("Failed to parse review dataset: {}", path.display()))
}

/// Parse reviews from any CSV source.
pub fn read_reviews<R: Read>(source: R) -> Result<Vec<Review>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);
    let mut reviews = Vec::new();

    for (index, row) in reader.deserialize::<Review>().enumerate() {
        // header is line 1
        let line = index + 2;
        let review = row.with_context(|| format!("Invalid review on line {line}"))?;

        if !is_allowed_location(&review.location) {
            warn!(line, location = %review.location, "Skipping review with disallowed location");
            continue;
        }
        if review.review_body.trim().is_empty() {
            warn!(line, review_id = %review.review_id, "Skipping review with empty body");
            continue;
        }
        reviews.push(review);
    }

    Ok(reviews)
}
