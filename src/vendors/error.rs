//! Error taxonomy for vendor adapter operations

use thiserror::Error;

/// Errors a vendor adapter can produce.
///
/// Adapters never panic and never bypass this taxonomy; the orchestrator
/// converts these into degraded response text so one agent's failure never
/// aborts a round.
#[derive(Debug, Error)]
pub enum VendorError {
    /// Missing or rejected API key (401/403, or key env var unset)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The vendor rejected the request shape (400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Endpoint or model not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited (429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The request exceeded its deadline
    #[error("Request timed out")]
    Timeout,

    /// Could not reach the vendor at all
    #[error("Network error: {0}")]
    Network(String),

    /// The vendor answered but produced no usable text
    #[error("Empty response from vendor")]
    EmptyResponse,

    /// The vendor's response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Any other vendor-side failure
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl VendorError {
    /// Categorize a non-success HTTP status from a vendor.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            400 => VendorError::InvalidRequest(body),
            401 | 403 => VendorError::Authentication(body),
            404 => VendorError::NotFound(body),
            429 => VendorError::RateLimited,
            _ => VendorError::Api {
                status,
                message: body,
            },
        }
    }
}

impl From<reqwest::Error> for VendorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VendorError::Timeout
        } else if err.is_connect() {
            VendorError::Network(format!("Connection error: {}", err))
        } else {
            VendorError::Network(err.to_string())
        }
    }
}

/// Result type alias for vendor adapter operations
pub type VendorResult<T> = Result<T, VendorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_http_statuses() {
        assert!(matches!(
            VendorError::from_status(400, "bad".into()),
            VendorError::InvalidRequest(_)
        ));
        assert!(matches!(
            VendorError::from_status(401, "no key".into()),
            VendorError::Authentication(_)
        ));
        assert!(matches!(
            VendorError::from_status(403, "denied".into()),
            VendorError::Authentication(_)
        ));
        assert!(matches!(
            VendorError::from_status(404, "gone".into()),
            VendorError::NotFound(_)
        ));
        assert!(matches!(
            VendorError::from_status(429, "slow down".into()),
            VendorError::RateLimited
        ));
        assert!(matches!(
            VendorError::from_status(500, "boom".into()),
            VendorError::Api { status: 500, .. }
        ));
    }
}
