use crate::filter::FilterError;
use serde_json::{json, Value};
use std::fmt;

/// Every way a request can fail.
///
/// Client-facing variants render their message verbatim into the error
/// body. [`ApiError::Internal`] carries the underlying cause for the
/// server log only; clients always see the generic message.
#[derive(Debug)]
pub enum ApiError {
    /// `Location` or `ReviewBody` missing or empty on create.
    MissingFields,
    /// A location outside the allow-list, or a `start_date` / `end_date`
    /// that is not `YYYY-MM-DD`. Renders the [`FilterError`] message.
    Filter(FilterError),
    /// Any method other than read-query or create.
    MethodNotAllowed,
    /// Anything not explicitly classified.
    Internal(anyhow::Error),
}

impl ApiError {
    /// HTTP status code for this error.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ApiError::MissingFields | ApiError::Filter(_) => 400,
            ApiError::MethodNotAllowed => 405,
            ApiError::Internal(_) => 500,
        }
    }

    /// JSON error body, `{"error": "<message>"}`.
    #[must_use]
    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }

    /// True for failures caused by the client's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingFields => {
                write!(f, "Both 'Location' and 'ReviewBody' are required.")
            }
            ApiError::Filter(e) => fmt::Display::fmt(e, f),
            ApiError::MethodNotAllowed => write!(f, "Method not allowed."),
            ApiError::Internal(_) => write!(f, "Internal server error."),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Internal(e) => {
                let source: &(dyn std::error::Error + 'static) = e.as_ref();
                Some(source)
            }
            _ => None,
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(e: FilterError) -> Self {
        ApiError::Filter(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFields.status(), 400);
        assert_eq!(
            ApiError::Filter(FilterError::InvalidLocation("x".into())).status(),
            400
        );
        assert_eq!(
            ApiError::Filter(FilterError::InvalidDateFormat {
                field: "start_date",
                value: "x".into()
            })
            .status(),
            400
        );
        assert_eq!(ApiError::MethodNotAllowed.status(), 405);
        assert_eq!(ApiError::Internal(anyhow!("boom")).status(), 500);
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(
            ApiError::MissingFields.body(),
            json!({"error": "Both 'Location' and 'ReviewBody' are required."})
        );
        assert_eq!(
            ApiError::Filter(FilterError::InvalidLocation("Nowhere, Nowhere".into())).body(),
            json!({"error": "'Nowhere, Nowhere' is not an allowed location."})
        );
        assert_eq!(
            ApiError::MethodNotAllowed.body(),
            json!({"error": "Method not allowed."})
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = ApiError::Internal(anyhow!("disk on fire at /var/data"));
        assert_eq!(err.body(), json!({"error": "Internal server error."}));
        assert!(!err.is_client_error());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk on fire at /var/data"));
    }

    #[test]
    fn test_filter_error_conversion_keeps_message() {
        let filter_err = FilterError::InvalidDateFormat {
            field: "end_date",
            value: "2024/01/01".into(),
        };
        let expected = filter_err.to_string();
        let api: ApiError = filter_err.into();
        assert_eq!(api.status(), 400);
        assert_eq!(api.to_string(), expected);
        assert_eq!(
            api.body(),
            json!({"error": "Invalid end_date '2024/01/01': expected YYYY-MM-DD."})
        );
    }
}
