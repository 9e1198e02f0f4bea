//! Export pipeline errors and their HTTP presentation.
//!
//! Every failure during an export is fatal to that export; there is no retry.
//! The variants stay distinguishable so the HTTP layer can map gateway-side
//! failures (timeout, non-2xx from Teamtailor) to 502 and everything else
//! to 500.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while fetching, flattening, or encoding an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The remote request exceeded the configured deadline.
    #[error("Teamtailor API request timed out after {timeout:?}")]
    RemoteTimeout { timeout: Duration },

    /// Teamtailor answered with a non-success status.
    ///
    /// `body` is the response body parsed as JSON when possible, otherwise the
    /// raw text wrapped in a JSON string. The body is read exactly once.
    #[error("{message}")]
    RemoteApi {
        message: String,
        status: u16,
        body: serde_json::Value,
    },

    /// The response body was not a JSON:API collection envelope.
    #[error("Malformed Teamtailor response: {0}")]
    MalformedResponse(String),

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Connection to Teamtailor failed: {0}")]
    ConnectionFailed(String),

    /// CSV encoding or output write failure.
    #[error("CSV output error: {0}")]
    Sink(String),
}

/// Structured JSON body returned when an export fails before streaming starts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// 502 payload carrying the remote status through to the caller.
    BadGateway {
        error: &'static str,
        message: String,
        status: u16,
    },
    /// 500 payload for everything that is not the remote API's fault.
    Internal {
        error: &'static str,
        message: String,
    },
}

impl ExportError {
    /// True for failures that should surface as 502 Bad Gateway.
    pub fn is_gateway_error(&self) -> bool {
        matches!(
            self,
            ExportError::RemoteTimeout { .. } | ExportError::RemoteApi { .. }
        )
    }

    /// Converts the error into the JSON body for a pre-stream failure
    /// response. A timeout has no remote status to pass through, so it
    /// reports 408.
    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            ExportError::RemoteTimeout { .. } => ErrorBody::BadGateway {
                error: "Bad Gateway",
                message: self.to_string(),
                status: 408,
            },
            ExportError::RemoteApi {
                message, status, ..
            } => ErrorBody::BadGateway {
                error: "Bad Gateway",
                message: message.clone(),
                status: *status,
            },
            other => ErrorBody::Internal {
                error: "Internal Server Error",
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns one instance of every variant for exhaustive checks.
    fn all_variants() -> Vec<ExportError> {
        vec![
            ExportError::RemoteTimeout {
                timeout: Duration::from_secs(30),
            },
            ExportError::RemoteApi {
                message: "Teamtailor API request failed: 404 Not Found".into(),
                status: 404,
                body: serde_json::json!({"errors": []}),
            },
            ExportError::MalformedResponse("missing field `data`".into()),
            ExportError::ConnectionFailed("dns error".into()),
            ExportError::Sink("broken pipe".into()),
        ]
    }

    #[test]
    fn gateway_classification() {
        assert!(ExportError::RemoteTimeout {
            timeout: Duration::from_secs(30)
        }
        .is_gateway_error());
        assert!(ExportError::RemoteApi {
            message: "x".into(),
            status: 500,
            body: serde_json::Value::Null,
        }
        .is_gateway_error());
        assert!(!ExportError::MalformedResponse("x".into()).is_gateway_error());
        assert!(!ExportError::ConnectionFailed("x".into()).is_gateway_error());
        assert!(!ExportError::Sink("x".into()).is_gateway_error());
    }

    #[test]
    fn timeout_body_reports_408() {
        let err = ExportError::RemoteTimeout {
            timeout: Duration::from_secs(30),
        };
        match err.to_error_body() {
            ErrorBody::BadGateway {
                error,
                message,
                status,
            } => {
                assert_eq!(error, "Bad Gateway");
                assert_eq!(status, 408);
                assert!(message.contains("timed out"), "message: {message}");
            }
            other => panic!("expected BadGateway body, got {other:?}"),
        }
    }

    #[test]
    fn remote_api_body_passes_status_through() {
        let err = ExportError::RemoteApi {
            message: "Teamtailor API request failed: 404 Not Found".into(),
            status: 404,
            body: serde_json::Value::Null,
        };
        match err.to_error_body() {
            ErrorBody::BadGateway {
                message, status, ..
            } => {
                assert_eq!(status, 404);
                assert!(message.contains("404 Not Found"));
            }
            other => panic!("expected BadGateway body, got {other:?}"),
        }
    }

    #[test]
    fn non_gateway_errors_use_internal_body() {
        for err in [
            ExportError::MalformedResponse("bad envelope".into()),
            ExportError::ConnectionFailed("refused".into()),
            ExportError::Sink("closed".into()),
        ] {
            match err.to_error_body() {
                ErrorBody::Internal { error, message } => {
                    assert_eq!(error, "Internal Server Error");
                    assert!(!message.is_empty());
                }
                other => panic!("expected Internal body, got {other:?}"),
            }
        }
    }

    #[test]
    fn error_bodies_serialize_flat() {
        let json = serde_json::to_value(
            ExportError::RemoteApi {
                message: "boom".into(),
                status: 503,
                body: serde_json::Value::Null,
            }
            .to_error_body(),
        )
        .unwrap();
        assert_eq!(json["error"], "Bad Gateway");
        assert_eq!(json["message"], "boom");
        assert_eq!(json["status"], 503);

        let json =
            serde_json::to_value(ExportError::Sink("closed".into()).to_error_body()).unwrap();
        assert_eq!(json["error"], "Internal Server Error");
        assert!(json.get("status").is_none());
    }

    #[test]
    fn all_variants_have_nonempty_display() {
        for variant in all_variants() {
            assert!(!variant.to_string().trim().is_empty(), "{variant:?}");
        }
    }
}
