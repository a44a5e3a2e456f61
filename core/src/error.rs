//! Error types for the Foundation API client.
//!
//! # Design
//! Transports return every response they receive, so `RequestFailed` is only
//! ever produced by the client's status check. It carries the raw status and
//! body for diagnostics.

/// Errors returned by `FoundationClient` and `ApiClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The base URL or endpoint could not be parsed or resolved.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Caller input was rejected before a request was built.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// No complete response was received.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The server answered with a non-success status.
    #[error("request failed with HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("decode failed: {0}")]
    DecodeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display_includes_status_and_body() {
        let err = ApiError::RequestFailed {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with HTTP 500: internal error");
    }

    #[test]
    fn decode_error_display() {
        let err = ApiError::DecodeError("expected value at line 1 column 1".to_string());
        assert_eq!(err.to_string(), "decode failed: expected value at line 1 column 1");
    }
}
