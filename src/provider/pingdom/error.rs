//! # Pingdom Errors

use serde::Deserialize;
use thiserror::Error;

/// Status code, description and message Pingdom answers with when a check
/// identifier does not (or no longer) exist
const INVALID_IDENTIFIER: (u16, &str, &str) = (403, "Forbidden", "Invalid check identifier");

/// Errors returned by the Pingdom client
#[derive(Debug, Error)]
pub enum PingdomError {
    /// Error reported by the API itself
    #[error("{status_code} {status_desc}: {message}")]
    Api {
        status_code: u16,
        status_desc: String,
        message: String,
    },

    /// Transport failure (connection, TLS, timeout)
    #[error("Pingdom request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("Unexpected Pingdom response (HTTP {status}): {reason}")]
    Decode { status: u16, reason: String },
}

impl PingdomError {
    /// True for the error Pingdom returns for an unknown check identifier
    pub fn is_invalid_identifier(&self) -> bool {
        match self {
            PingdomError::Api {
                status_code,
                status_desc,
                message,
            } => {
                let (code, desc, msg) = INVALID_IDENTIFIER;
                *status_code == code && status_desc == desc && message == msg
            }
            _ => false,
        }
    }

    /// Shorthand used by tests and fakes
    pub fn invalid_identifier() -> Self {
        let (code, desc, msg) = INVALID_IDENTIFIER;
        PingdomError::Api {
            status_code: code,
            status_desc: desc.to_string(),
            message: msg.to_string(),
        }
    }
}

/// Error envelope: `{"error": {"statuscode": .., "statusdesc": .., "errormessage": ..}}`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(rename = "statuscode")]
    pub status_code: u16,
    #[serde(rename = "statusdesc")]
    pub status_desc: String,
    #[serde(rename = "errormessage")]
    pub error_message: String,
}

impl From<ErrorBody> for PingdomError {
    fn from(body: ErrorBody) -> Self {
        PingdomError::Api {
            status_code: body.status_code,
            status_desc: body.status_desc,
            message: body.error_message,
        }
    }
}
