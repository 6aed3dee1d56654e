use crate::error::ApiError;
use may_minihttp::Response;
use serde_json::Value;

/// Status and JSON body produced by [`crate::server::ReviewService::handle`].
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        Self::new(err.status(), err.body())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Encode a handler result onto the wire.
///
/// Successful bodies are pretty-printed; error bodies are compact.
pub fn write_handler_response(res: &mut Response, response: &HandlerResponse) {
    let encoded = if response.is_success() {
        serde_json::to_vec_pretty(&response.body)
    } else {
        serde_json::to_vec(&response.body)
    };
    match encoded {
        Ok(bytes) => write_json(res, response.status, bytes),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode response body");
            write_internal_error(res);
        }
    }
}

/// The fixed 500 answer, used when nothing better can be produced.
pub fn write_internal_error(res: &mut Response) {
    let body = ApiError::Internal(anyhow::anyhow!("unencodable")).body();
    write_json(res, 500, body.to_string().into_bytes());
}

fn write_json(res: &mut Response, status: u16, bytes: Vec<u8>) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(bytes);
}
