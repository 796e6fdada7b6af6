//! # Check Parameters
//!
//! Fields shared between the desired (`spec`) and observed (`status`) halves
//! of a `Check`, plus validation against what the Pingdom API accepts.

use schemars::{json_schema, Schema, SchemaGenerator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Form parameters sent to the Pingdom API when creating or updating a check
pub type RequestParams = BTreeMap<&'static str, String>;

/// Poll intervals (minutes) accepted by Pingdom
pub const VALID_RESOLUTIONS: [i32; 5] = [1, 5, 15, 30, 60];

/// Type of check
///
/// Unrecognised values are kept as [`CheckType::Unknown`] so that an invalid
/// resource still decodes and is rejected by [`CheckParameters::validate`]
/// with a readable message instead of a watch decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CheckType {
    /// Response to an HTTP request
    Http,
    /// Response to a custom HTTP request
    HttpCustom,
    /// Packet sent to a TCP port
    Tcp,
    /// ICMP echo request to the host
    Ping,
    /// Host resolution using a given DNS server
    Dns,
    /// Packet sent to a UDP port
    Udp,
    /// Connection to an SMTP server
    Smtp,
    /// Connection to a POP3 server
    Pop3,
    /// Connection to an IMAP server
    Imap,
    /// Anything else, including the empty string of an unset status
    Unknown(String),
}

impl CheckType {
    /// Wire names of every supported check type, in API documentation order
    pub const VALUES: [&'static str; 9] = [
        "http",
        "httpcustom",
        "tcp",
        "ping",
        "dns",
        "udp",
        "smtp",
        "pop3",
        "imap",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CheckType::Http => "http",
            CheckType::HttpCustom => "httpcustom",
            CheckType::Tcp => "tcp",
            CheckType::Ping => "ping",
            CheckType::Dns => "dns",
            CheckType::Udp => "udp",
            CheckType::Smtp => "smtp",
            CheckType::Pop3 => "pop3",
            CheckType::Imap => "imap",
            CheckType::Unknown(other) => other,
        }
    }

    /// True for the nine types Pingdom knows about
    pub fn is_supported(&self) -> bool {
        !matches!(self, CheckType::Unknown(_))
    }

    /// True when no type has been recorded yet (fresh status)
    pub fn is_unset(&self) -> bool {
        matches!(self, CheckType::Unknown(other) if other.is_empty())
    }
}

impl Default for CheckType {
    fn default() -> Self {
        CheckType::Unknown(String::new())
    }
}

impl From<&str> for CheckType {
    fn from(value: &str) -> Self {
        match value {
            "http" => CheckType::Http,
            "httpcustom" => CheckType::HttpCustom,
            "tcp" => CheckType::Tcp,
            "ping" => CheckType::Ping,
            "dns" => CheckType::Dns,
            "udp" => CheckType::Udp,
            "smtp" => CheckType::Smtp,
            "pop3" => CheckType::Pop3,
            "imap" => CheckType::Imap,
            other => CheckType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for CheckType {
    fn from(value: String) -> Self {
        CheckType::from(value.as_str())
    }
}

impl From<CheckType> for String {
    fn from(value: CheckType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema for the `type` field: a string restricted to the supported values
pub fn check_type_schema(_gen: &mut SchemaGenerator) -> Schema {
    json_schema!({
        "type": "string",
        "enum": CheckType::VALUES,
        "description": "Type of check, one of: http, httpcustom, tcp, ping, dns, udp, smtp, pop3, imap"
    })
}

/// `host` and `type` decode to empty values on a fresh status but the API
/// server must always require them
fn require_host_and_type(schema: &mut Schema) {
    const REQUIRED: [&str; 2] = ["host", "type"];

    if let Some(properties) = schema
        .get_mut("properties")
        .and_then(serde_json::Value::as_object_mut)
    {
        for field in REQUIRED {
            if let Some(property) = properties
                .get_mut(field)
                .and_then(serde_json::Value::as_object_mut)
            {
                property.remove("default");
            }
        }
    }

    let required = schema
        .ensure_object()
        .entry("required")
        .or_insert_with(|| serde_json::Value::Array(Vec::new()));
    if let Some(required) = required.as_array_mut() {
        for field in REQUIRED {
            if !required.iter().any(|r| r == field) {
                required.push(field.into());
            }
        }
    }
}

/// Parameters of a Pingdom check
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(transform = require_host_and_type)]
pub struct CheckParameters {
    /// Check name; defaults to the name of the Kubernetes object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Target host
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    #[schemars(schema_with = "check_type_schema")]
    pub r#type: CheckType,

    /// Target port
    /// Required for: tcp, udp
    /// Optional for: http(80), httpcustom(80), smtp(25), pop3(110), imap(143)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 65535))]
    pub port: Option<i32>,

    /// How often the check runs (minutes): 1, 5, 15, 30 or 60
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_minutes: Option<i32>,

    /// Pingdom user identifiers that receive alerts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<i64>>,

    /// Target path on server (HTTP checks); defaults to `/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Connection encryption (HTTP checks); defaults to false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption: Option<bool>,
}

/// Desired parameters the Pingdom API would reject
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("check `Name` must be set and not empty")]
    MissingName,
    #[error("check `Host` must not be empty")]
    MissingHost,
    #[error("check `Type` must be one of: http, httpcustom, tcp, ping, dns, udp, smtp, pop3, imap")]
    InvalidType,
    #[error("check `Port` must be between 1-65535")]
    InvalidPort,
    #[error("check `ResolutionMinutes` must be one of 1, 5, 15, 30 or 60")]
    InvalidResolution,
}

impl CheckParameters {
    /// Validate parameters in terms of what the Pingdom API accepts
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_deref().is_none_or(str::is_empty) {
            return Err(ValidationError::MissingName);
        }

        if self.host.is_empty() {
            return Err(ValidationError::MissingHost);
        }

        if !self.r#type.is_supported() {
            return Err(ValidationError::InvalidType);
        }

        if self.port.is_some_and(|port| !(1..=65535).contains(&port)) {
            return Err(ValidationError::InvalidPort);
        }

        if self
            .resolution_minutes
            .is_some_and(|res| !VALID_RESOLUTIONS.contains(&res))
        {
            return Err(ValidationError::InvalidResolution);
        }

        Ok(())
    }
}

/// Join user identifiers the way the Pingdom API expects them (`1,2,3`)
pub(crate) fn comma_separated(ids: &[i64]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
