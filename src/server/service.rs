use super::request::{parse_request, NewReview, ParsedRequest, ReviewRequest};
use super::response::{write_handler_response, write_internal_error, HandlerResponse};
use crate::error::ApiError;
use crate::filter::{FilterError, ReviewFilter, ReviewQuery};
use crate::locations::is_allowed_location;
use crate::model::Review;
use crate::sentiment::{rank, SentimentScorer};
use crate::store::ReviewStore;
use anyhow::Context;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The review endpoint.
///
/// Routing is by method only: `GET` lists, `POST` creates, anything else
/// is rejected with 405. Each request moves through parse, validate,
/// execute and encode; the first failure short-circuits to its error
/// response.
///
/// may_minihttp clones the service per connection, so all state is shared
/// through `Arc`s.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<ReviewStore>,
    scorer: Arc<dyn SentimentScorer>,
}

impl ReviewService {
    #[must_use]
    pub fn new(store: Arc<ReviewStore>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { store, scorer }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<ReviewStore> {
        &self.store
    }

    /// Handle one parsed request, mapping every failure to its response.
    #[must_use]
    pub fn handle(&self, req: &ParsedRequest) -> HandlerResponse {
        let outcome = match ReviewRequest::from_parsed(req) {
            ReviewRequest::List(query) => self.list_reviews(&query),
            ReviewRequest::Create(new_review) => self.create_review(new_review),
            ReviewRequest::Unsupported(_) => Err(ApiError::MethodNotAllowed),
        };

        match outcome {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    ApiError::Internal(cause) => {
                        error!(
                            method = %req.method,
                            error = %format!("{cause:#}"),
                            "Error handling request"
                        );
                    }
                    client => {
                        warn!(
                            method = %req.method,
                            status = client.status(),
                            error = %client,
                            "Request rejected"
                        );
                    }
                }
                HandlerResponse::from_error(&err)
            }
        }
    }

    /// Filter, score and rank the stored reviews.
    fn list_reviews(&self, query: &ReviewQuery) -> Result<HandlerResponse, ApiError> {
        let filter = ReviewFilter::from_query(query)?;
        let reviews = filter.apply(self.store.all()?);
        let ranked = rank(reviews, self.scorer.as_ref())?;
        let body = serde_json::to_value(&ranked).context("Failed to encode ranked reviews")?;
        info!(count = ranked.len(), "Returning ranked reviews");
        Ok(HandlerResponse::new(200, body))
    }

    /// Validate the form fields, then store and echo a new review.
    fn create_review(&self, new_review: NewReview) -> Result<HandlerResponse, ApiError> {
        let (Some(location), Some(review_body)) =
            (new_review.location, new_review.review_body)
        else {
            return Err(ApiError::MissingFields);
        };
        if !is_allowed_location(&location) {
            return Err(FilterError::InvalidLocation(location).into());
        }

        let review = Review::create(location, review_body);
        let body = serde_json::to_value(&review).context("Failed to encode created review")?;
        let (review_id, location) = (review.review_id.clone(), review.location.clone());
        self.store.append(review)?;
        info!(review_id = %review_id, location = %location, "Review created");
        Ok(HandlerResponse::new(201, body))
    }
}

impl HttpService for ReviewService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            parse_request(req).map(|parsed| self.handle(&parsed))
        }));

        match outcome {
            Ok(Ok(response)) => write_handler_response(res, &response),
            Ok(Err(e)) => {
                error!(error = %e, "Failed to read request");
                write_internal_error(res);
            }
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(error = %detail, "Request handler panicked");
                write_internal_error(res);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::SentimentScore;
    use anyhow::bail;
    use serde_json::json;

    fn request(method: &str, path: &str, body: &str) -> ParsedRequest {
        ParsedRequest {
            method: method.into(),
            path: "/".into(),
            query_params: crate::server::request::parse_query_params(path),
            body: body.into(),
            ..ParsedRequest::default()
        }
    }

    fn review(id: &str, location: &str, ts: &str, body: &str) -> Review {
        Review {
            review_id: id.parse().unwrap(),
            location: location.into(),
            timestamp: ts.parse().unwrap(),
            review_body: body.into(),
        }
    }

    fn service(reviews: Vec<Review>) -> ReviewService {
        let scorer = |text: &str| SentimentScore {
            compound: text.parse().unwrap_or(0.0),
            ..SentimentScore::default()
        };
        ReviewService::new(Arc::new(ReviewStore::with_reviews(reviews)), Arc::new(scorer))
    }

    #[test]
    fn test_list_ranks_full_store() {
        let svc = service(vec![
            review("a", "Denver, Colorado", "2023-01-01 00:00:00", "0.1"),
            review("b", "Tucson, Arizona", "2023-01-02 00:00:00", "0.9"),
        ]);
        let res = svc.handle(&request("GET", "/", ""));
        assert_eq!(res.status, 200);
        assert_eq!(res.body[0]["ReviewId"], "b");
        assert_eq!(res.body[1]["ReviewId"], "a");
        assert_eq!(res.body[0]["sentiment"]["compound"], 0.9);
    }

    #[test]
    fn test_list_rejects_unknown_location() {
        let req = request("GET", "/?location=Nowhere%2C+Nowhere", "");
        let res = service(Vec::new()).handle(&req);
        assert_eq!(res.status, 400);
        assert_eq!(
            res.body,
            json!({"error": "'Nowhere, Nowhere' is not an allowed location."})
        );
    }

    #[test]
    fn test_list_rejects_malformed_date() {
        let res = service(Vec::new()).handle(&request("GET", "/?start_date=01%2F02%2F2023", ""));
        assert_eq!(res.status, 400);
        assert_eq!(
            res.body,
            json!({"error": "Invalid start_date '01/02/2023': expected YYYY-MM-DD."})
        );
    }

    #[test]
    fn test_create_then_list() {
        let svc = service(Vec::new());
        let res = svc.handle(&request(
            "POST",
            "/",
            "Location=Denver%2C+Colorado&ReviewBody=0.5",
        ));
        assert_eq!(res.status, 201);
        assert!(res.body.get("sentiment").is_none());
        let id = res.body["ReviewId"].clone();

        let listed = svc.handle(&request("GET", "/", ""));
        assert_eq!(listed.body[0]["ReviewId"], id);
        assert_eq!(listed.body[0]["Timestamp"], res.body["Timestamp"]);
        assert_eq!(svc.store().len(), 1);
    }

    #[test]
    fn test_create_requires_both_fields() {
        let svc = service(Vec::new());
        let bodies = [
            "",
            "Location=Denver%2C+Colorado",
            "ReviewBody=hi",
            "Location=&ReviewBody=hi",
        ];
        for body in bodies {
            let res = svc.handle(&request("POST", "/", body));
            assert_eq!(res.status, 400, "{body}");
            assert_eq!(
                res.body,
                json!({"error": "Both 'Location' and 'ReviewBody' are required."})
            );
        }
        assert!(svc.store().is_empty());
    }

    #[test]
    fn test_create_rejects_unknown_location() {
        let svc = service(Vec::new());
        let res = svc.handle(&request("POST", "/", "Location=Atlantis&ReviewBody=wet"));
        assert_eq!(res.status, 400);
        assert_eq!(res.body, json!({"error": "'Atlantis' is not an allowed location."}));
        assert!(svc.store().is_empty());
    }

    #[test]
    fn test_create_on_poisoned_store_is_500() {
        let svc = service(Vec::new());
        svc.store().poison();
        let res = svc.handle(&request(
            "POST",
            "/",
            "Location=Denver%2C+Colorado&ReviewBody=lost",
        ));
        assert_eq!(res.status, 500);
        assert_eq!(res.body, json!({"error": "Internal server error."}));
        assert!(svc.store().all().is_err());
    }

    #[test]
    fn test_other_methods_are_405() {
        let res = service(Vec::new()).handle(&request("PUT", "/", ""));
        assert_eq!(res.status, 405);
        assert_eq!(res.body, json!({"error": "Method not allowed."}));
    }

    #[test]
    fn test_scorer_failure_is_generic_500() {
        struct Broken;
        impl SentimentScorer for Broken {
            fn score(&self, _text: &str) -> anyhow::Result<SentimentScore> {
                bail!("secret lexicon path /opt/lexicon missing")
            }
        }
        let store = ReviewStore::with_reviews(vec![review(
            "a",
            "Denver, Colorado",
            "2023-01-01 00:00:00",
            "x",
        )]);
        let svc = ReviewService::new(Arc::new(store), Arc::new(Broken));
        let res = svc.handle(&request("GET", "/", ""));
        assert_eq!(res.status, 500);
        assert_eq!(res.body, json!({"error": "Internal server error."}));
    }

    #[test]
    fn test_validation_precedes_scoring() {
        struct Unreachable;
        impl SentimentScorer for Unreachable {
            fn score(&self, _text: &str) -> anyhow::Result<SentimentScore> {
                bail!("scorer must not run")
            }
        }
        let store = ReviewStore::with_reviews(vec![review(
            "a",
            "Denver, Colorado",
            "2023-01-01 00:00:00",
            "x",
        )]);
        let svc = ReviewService::new(Arc::new(store), Arc::new(Unreachable));
        let res = svc.handle(&request("GET", "/?location=Atlantis", ""));
        assert_eq!(res.status, 400);
    }
}
