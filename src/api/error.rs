//! Error types for the remote game service

use thiserror::Error;

/// Errors from calls to the game-hosting service
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 429 from any endpoint
    #[error("Rate limited by {endpoint}")]
    RateLimited { endpoint: String },

    /// Any other non-success HTTP status
    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        status: u16,
        endpoint: String,
        body: String,
    },

    /// Connection, TLS or body read failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Bounded retries gave up
    #[error("{operation} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        operation: String,
        attempts: u32,
        last: Box<ApiError>,
    },
}

impl ApiError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }

    /// Errors worth a bounded number of retries.
    ///
    /// Rate limiting is handled separately and decode errors never improve
    /// on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Http { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Result type alias for service calls
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let limited = ApiError::RateLimited {
            endpoint: "move".to_string(),
        };
        assert!(limited.is_rate_limited());
        assert!(!limited.is_transient());

        let http = ApiError::Http {
            status: 502,
            endpoint: "move".to_string(),
            body: String::new(),
        };
        assert!(http.is_transient());

        assert!(ApiError::Transport("reset".into()).is_transient());
        assert!(!ApiError::Decode("eof".into()).is_transient());
    }
}
