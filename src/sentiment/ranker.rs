use super::{SentimentScore, SentimentScorer};
use crate::model::Review;
use anyhow::{Context, Result};
use serde::Serialize;

/// A review annotated with the sentiment of its body.
///
/// Serializes as the review's own fields plus a `sentiment` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: SentimentScore,
}

/// Score every review and order the result by descending `compound`.
///
/// The sort is stable: reviews with equal compound scores keep the order
/// they had in `reviews`.
pub fn rank(reviews: Vec<Review>, scorer: &dyn SentimentScorer) -> Result<Vec<ScoredReview>> {
    let mut scored = reviews
        .into_iter()
        .map(|review| {
            let sentiment = scorer
                .score(&review.review_body)
                .with_context(|| format!("Failed to score review {}", review.review_id))?;
            Ok(ScoredReview { review, sentiment })
        })
        .collect::<Result<Vec<_>>>()?;

    scored.sort_by(|a, b| b.sentiment.compound.total_cmp(&a.sentiment.compound));
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    fn review(id: &str, body: &str) -> Review {
        Review {
            review_id: id.parse().unwrap(),
            location: "Denver, Colorado".into(),
            timestamp: "2023-01-01 00:00:00".parse().unwrap(),
            review_body: body.into(),
        }
    }

    /// Reads the compound score straight out of the body text.
    fn numeric(text: &str) -> SentimentScore {
        SentimentScore {
            compound: text.parse().unwrap_or(0.0),
            ..SentimentScore::default()
        }
    }

    fn ids(scored: &[ScoredReview]) -> Vec<&str> {
        scored.iter().map(|s| s.review.review_id.as_str()).collect()
    }

    #[test]
    fn test_rank_orders_by_descending_compound() {
        let reviews = vec![review("a", "-0.5"), review("b", "0.9"), review("c", "0.1")];
        let ranked = rank(reviews, &numeric).unwrap();
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        assert_eq!(ranked[0].sentiment.compound, 0.9);
    }

    #[test]
    fn test_rank_is_stable_for_ties() {
        let reviews = vec![
            review("first", "0.3"),
            review("top", "0.8"),
            review("second", "0.3"),
            review("third", "0.3"),
        ];
        let ranked = rank(reviews, &numeric).unwrap();
        assert_eq!(ids(&ranked), vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new(), &numeric).unwrap().is_empty());
    }

    #[test]
    fn test_rank_does_not_touch_reviews() {
        let original = review("a", "0.2");
        let ranked = rank(vec![original.clone()], &numeric).unwrap();
        assert_eq!(ranked[0].review, original);
    }

    #[test]
    fn test_scorer_failure_propagates() {
        struct Broken;
        impl SentimentScorer for Broken {
            fn score(&self, _text: &str) -> Result<SentimentScore> {
                bail!("lexicon unavailable")
            }
        }
        let err = rank(vec![review("a", "x")], &Broken).unwrap_err();
        assert!(format!("{err:#}").contains("lexicon unavailable"));
    }

    #[test]
    fn test_scored_review_json_shape() {
        let ranked = rank(vec![review("a", "0.25")], &numeric).unwrap();
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["ReviewId"], "a");
        assert_eq!(value["ReviewBody"], "0.25");
        assert_eq!(value["sentiment"]["compound"], 0.25);
        assert!(value.get("review").is_none());
    }
}
