//! # Sentiment
//!
//! Scoring of review text and ranking of reviews by that score.
//!
//! The scoring algorithm is a replaceable capability behind the
//! [`SentimentScorer`] trait. The service ships with [`LexiconScorer`], a
//! rule-based valence scorer, and tests plug in deterministic stubs. Any
//! `Fn(&str) -> SentimentScore` closure is a scorer too.
//!
//! Scores are derived data: they are computed on every read and never
//! stored on a [`crate::model::Review`].

mod lexicon;
mod ranker;

pub use lexicon::LexiconScorer;
pub use ranker::{rank, ScoredReview};

use serde::{Deserialize, Serialize};

/// Four-axis sentiment assessment of a text.
///
/// `negative`, `neutral` and `positive` are proportions in `[0, 1]`;
/// `compound` is the normalised overall polarity in `[-1, 1]` and is the
/// ranking key.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    #[serde(alias = "neg")]
    pub negative: f64,
    #[serde(alias = "neu")]
    pub neutral: f64,
    #[serde(alias = "pos")]
    pub positive: f64,
    pub compound: f64,
}

/// Maps text to a [`SentimentScore`].
///
/// A scorer error is an unexpected failure and surfaces to clients as a
/// generic internal error.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> anyhow::Result<SentimentScore>;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> SentimentScore + Send + Sync,
{
    fn score(&self, text: &str) -> anyhow::Result<SentimentScore> {
        Ok(self(text))
    }
}
