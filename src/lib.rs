//! # Review Analyzer
//!
//! **Review Analyzer** is a small HTTP service that stores customer reviews of
//! locations and returns them ranked by the sentiment of their text.
//!
//! ## Overview
//!
//! A single endpoint supports two operations:
//!
//! - `GET` lists reviews, optionally filtered by `location`, `start_date` and
//!   `end_date`, scored and sorted from most positive to most negative
//! - `POST` accepts `Location` and `ReviewBody` form fields and stores a new
//!   review with a generated id and the current local timestamp
//!
//! Any other method is answered with 405. The store lives in memory and is
//! seeded once at startup from a CSV dataset.
//!
//! ## Architecture
//!
//! - **[`model`]** - The [`Review`] record and its timestamp format
//! - **[`ids`]** - Review identifiers
//! - **[`locations`]** - The fixed allow-list of locations
//! - **[`store`]** - Thread-safe in-memory review collection and CSV seeding
//! - **[`filter`]** - Query validation and location/date filtering
//! - **[`sentiment`]** - The [`SentimentScorer`] trait, the lexicon scorer and ranking
//! - **[`server`]** - HTTP server built on `may_minihttp`, request parsing and JSON responses
//! - **[`error`]** - The [`ApiError`] taxonomy and its status mapping
//! - **[`runtime_config`]** / **[`logging`]** - Environment configuration and `tracing` setup
//! - **[`cli`]** - The `review-analyzer` command line
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Service as ReviewService
//!     participant Filter as ReviewFilter
//!     participant Store as ReviewStore
//!     participant Scorer as SentimentScorer
//!
//!     Client->>Server: GET /?location=...
//!     Server->>Service: call(req, res)
//!     Service->>Service: parse_request
//!     Service->>Filter: from_query(&query)
//!     Filter-->>Service: ReviewFilter or 400
//!     Service->>Store: all()
//!     Store-->>Service: snapshot Vec<Review>
//!     Service->>Scorer: score(review_body) per review
//!     Scorer-->>Service: SentimentScore
//!     Service->>Service: stable sort by compound desc
//!     Service-->>Client: 200 JSON array
//!
//!     Client->>Server: POST / (form body)
//!     Server->>Service: call(req, res)
//!     Service->>Service: require Location + ReviewBody
//!     Service->>Store: append(review)
//!     Service-->>Client: 201 JSON review
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use review_analyzer::sentiment::LexiconScorer;
//! use review_analyzer::server::{HttpServer, ReviewService};
//! use review_analyzer::store::ReviewStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(ReviewStore::load("data/reviews.csv"));
//! let service = ReviewService::new(store, Arc::new(LexiconScorer::new()));
//! let handle = HttpServer(service).start("0.0.0.0:8000").unwrap();
//! handle.join().unwrap();
//! ```

pub mod cli;
pub mod error;
pub mod filter;
pub mod ids;
pub mod locations;
pub mod logging;
pub mod model;
pub mod runtime_config;
pub mod sentiment;
pub mod server;
pub mod store;

pub use error::ApiError;
pub use filter::{ReviewFilter, ReviewQuery};
pub use ids::ReviewId;
pub use model::{Review, Timestamp};
pub use sentiment::{rank, LexiconScorer, ScoredReview, SentimentScore, SentimentScorer};
pub use store::ReviewStore;
