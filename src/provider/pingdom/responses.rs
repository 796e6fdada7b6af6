//! # Response Types
//!
//! Pingdom REST API 2.1 response structures.
//!
//! References:
//! - [Pingdom API 2.1 checks](https://docs.pingdom.com/api/#tag/Checks)

use serde::Deserialize;
use std::collections::BTreeMap;

/// Response to `POST /checks`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateCheckResponse {
    pub check: CreatedCheck,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedCheck {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// Response to `PUT /checks/{id}` and `DELETE /checks/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Response to `GET /checks/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckDetails {
    pub check: CheckResponse,
}

/// Detailed description of a check
///
/// Times are unix timestamps (seconds); absent or 0 when not applicable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CheckResponse {
    pub id: i64,
    pub name: String,
    pub hostname: String,
    /// Minutes between tests
    pub resolution: i32,
    pub status: String,
    pub paused: bool,
    pub created: i64,
    #[serde(rename = "lasterrortime")]
    pub last_error_time: i64,
    #[serde(rename = "lasttesttime")]
    pub last_test_time: i64,
    /// Milliseconds
    #[serde(rename = "lastresponsetime")]
    pub last_response_time: i64,
    #[serde(rename = "userids")]
    pub user_ids: Option<Vec<i64>>,
    #[serde(rename = "type")]
    pub check_type: CheckResponseType,
}

/// `type` of a check
///
/// List endpoints return a bare string (`"http"`); the detail endpoint
/// returns a single-key object whose value carries type specific settings
/// (`{"http": {"url": "/", ...}}`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawCheckType")]
pub struct CheckResponseType {
    pub name: String,
    pub http: Option<HttpDetails>,
    pub tcp: Option<TcpDetails>,
    /// Port from the detail block of the remaining types (smtp, udp, ...)
    pub port: Option<i32>,
}

/// Settings of an HTTP check
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpDetails {
    pub url: String,
    pub encryption: bool,
    pub port: i32,
}

/// Settings of a TCP check
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TcpDetails {
    pub port: i32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCheckType {
    Name(String),
    Detailed(BTreeMap<String, serde_json::Value>),
}

impl TryFrom<RawCheckType> for CheckResponseType {
    type Error = String;

    fn try_from(raw: RawCheckType) -> Result<Self, Self::Error> {
        let details = match raw {
            RawCheckType::Name(name) => {
                return Ok(CheckResponseType {
                    name,
                    ..CheckResponseType::default()
                })
            }
            RawCheckType::Detailed(details) => details,
        };

        if details.len() != 1 {
            return Err(format!(
                "check `type` must contain exactly one object, got {}",
                details.len()
            ));
        }

        let mut result = CheckResponseType::default();
        for (name, value) in details {
            match name.as_str() {
                "http" => {
                    result.http = serde_json::from_value(value).map_err(|e| e.to_string())?;
                }
                "tcp" => {
                    result.tcp = serde_json::from_value(value).map_err(|e| e.to_string())?;
                }
                _ => {
                    result.port = value
                        .get("port")
                        .and_then(serde_json::Value::as_i64)
                        .and_then(|port| i32::try_from(port).ok());
                }
            }
            result.name = name;
        }
        Ok(result)
    }
}
