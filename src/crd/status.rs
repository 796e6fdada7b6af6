//! # Check Status
//!
//! Observed state of a check as last read from Pingdom.

use crate::crd::params::CheckParameters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of the latest test, as reported by Pingdom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CheckResult {
    Up,
    Down,
    UnconfirmedDown,
    Unknown,
    Paused,
}

impl CheckResult {
    /// Map the provider's status string; anything unexpected becomes `Unknown`
    pub fn from_provider(value: &str) -> Self {
        match value {
            "up" => CheckResult::Up,
            "down" => CheckResult::Down,
            "unconfirmed_down" => CheckResult::UnconfirmedDown,
            "paused" => CheckResult::Paused,
            _ => CheckResult::Unknown,
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckResult::Up => "up",
            CheckResult::Down => "down",
            CheckResult::UnconfirmedDown => "unconfirmed_down",
            CheckResult::Unknown => "unknown",
            CheckResult::Paused => "paused",
        })
    }
}

/// Observed state of a `Check`
///
/// Timestamps are RFC3339 strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatus {
    #[serde(flatten)]
    pub params: CheckParameters,

    /// Check identifier on Pingdom; 0 until the check has been created
    #[serde(default)]
    pub id: i64,

    /// Current check status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CheckResult>,

    /// Timestamp of last error (if any)
    #[serde(rename = "lasterrortime", default, skip_serializing_if = "Option::is_none")]
    pub last_error_time: Option<String>,

    /// Timestamp of last test (if any)
    #[serde(rename = "lasttesttime", default, skip_serializing_if = "Option::is_none")]
    pub last_test_time: Option<String>,

    /// Response time (milliseconds) of last test
    #[serde(rename = "lastresponsetime", default, skip_serializing_if = "Option::is_none")]
    pub last_response_time_millis: Option<i64>,

    /// Check creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_from_provider() {
        assert_eq!(CheckResult::from_provider("up"), CheckResult::Up);
        assert_eq!(
            CheckResult::from_provider("unconfirmed_down"),
            CheckResult::UnconfirmedDown
        );
        assert_eq!(CheckResult::from_provider("paused"), CheckResult::Paused);
        assert_eq!(CheckResult::from_provider("whatever"), CheckResult::Unknown);
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::json!({
            "id": 85975,
            "name": "My check",
            "host": "example.com",
            "type": "http",
            "status": "unconfirmed_down",
            "lasterrortime": "2020-01-02T03:04:05Z",
            "lastresponsetime": 355,
            "created": "2020-01-01T00:00:00Z"
        });
        let status: CheckStatus = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(status.id, 85975);
        assert_eq!(status.status, Some(CheckResult::UnconfirmedDown));
        assert_eq!(status.last_response_time_millis, Some(355));
        assert_eq!(serde_json::to_value(&status).unwrap(), json);
    }

    #[test]
    fn test_empty_status_decodes() {
        let status: CheckStatus = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(status.id, 0);
        assert!(status.params.r#type.is_unset());
    }
}
