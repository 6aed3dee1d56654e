use crate::filter::ReviewQuery;
use http::Method;
use may_minihttp::Request;
use std::collections::HashMap;
use std::io::{self, Read};
use tracing::{debug, info};

/// Raw HTTP request data extracted by [`parse_request`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Decoded query string parameters, first occurrence of each key
    pub query_params: HashMap<String, String>,
    /// Request body decoded as UTF-8 (lossy)
    pub body: String,
}

/// A request after the typed parse step, before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewRequest {
    /// Read-query: filter, score and rank.
    List(ReviewQuery),
    /// Create a review from form fields.
    Create(NewReview),
    /// Any other method; carries the method as received.
    Unsupported(String),
}

/// Form fields of a create request. Empty values are `None`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub location: Option<String>,
    pub review_body: Option<String>,
}

impl ReviewRequest {
    /// Classify by method and pull out the typed parameters.
    #[must_use]
    pub fn from_parsed(req: &ParsedRequest) -> Self {
        match req.method.parse::<Method>() {
            Ok(Method::GET) => ReviewRequest::List(ReviewQuery {
                location: non_empty(&req.query_params, "location"),
                start_date: non_empty(&req.query_params, "start_date"),
                end_date: non_empty(&req.query_params, "end_date"),
            }),
            Ok(Method::POST) => {
                let form = parse_form_body(&req.body);
                ReviewRequest::Create(NewReview {
                    location: non_empty(&form, "Location"),
                    review_body: non_empty(&form, "ReviewBody"),
                })
            }
            _ => ReviewRequest::Unsupported(req.method.clone()),
        }
    }
}

fn non_empty(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params.get(key).filter(|v| !v.is_empty()).cloned()
}

/// Decode `application/x-www-form-urlencoded` pairs, keeping the first
/// value when a key repeats.
fn first_values(input: &[u8]) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (k, v) in url::form_urlencoded::parse(input) {
        params
            .entry(k.into_owned())
            .or_insert_with(|| v.into_owned());
    }
    params
}

/// Parse query string parameters from a URL path
///
/// Extracts everything after the `?` character and URL-decodes parameter
/// names and values. A key supplied more than once keeps its first value.
#[must_use]
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    match path.split_once('?') {
        Some((_, query)) => first_values(query.as_bytes()),
        None => HashMap::new(),
    }
}

/// Parse a form-encoded request body. Same first-wins rule as the query.
#[must_use]
pub fn parse_form_body(body: &str) -> HashMap<String, String> {
    first_values(body.trim().as_bytes())
}

/// Extract method, path, headers, query and body from a `may_minihttp::Request`.
///
/// # Errors
///
/// Returns the I/O error if the request body cannot be read.
pub fn parse_request(req: Request) -> io::Result<ParsedRequest> {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let query_params = parse_query_params(&raw_path);
    debug!(
        param_count = query_params.len(),
        query_params = ?query_params,
        "Query params parsed"
    );

    let mut raw_body = Vec::new();
    let size = req.body().read_to_end(&mut raw_body)?;
    if size > 0 {
        debug!(
            content_length = size,
            content_type = %headers.get("content-type").map(String::as_str).unwrap_or(""),
            "Request body read"
        );
    }
    let body = String::from_utf8_lossy(&raw_body).into_owned();

    info!(
        method = %method,
        path = %path,
        headers_count = headers.len(),
        "HTTP request parsed"
    );

    Ok(ParsedRequest {
        method,
        path,
        headers,
        query_params,
        body,
    })
}
