//! HTTP boundary: request parsing, the review service and response encoding,
//! all on top of `may_minihttp`.

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, NewReview, ParsedRequest, ReviewRequest};
pub use response::HandlerResponse;
pub use service::ReviewService;
