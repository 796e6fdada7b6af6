//! # Defaults
//!
//! Fills in values a freshly created `Check` leaves unset.
//!
//! The status defaults exist only so that the status passes schema
//! validation before Pingdom has been read for the first time.

use crate::crd::{Check, CheckResult, CheckType};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use kube::ResourceExt;
use tracing::debug;

/// Apply defaults to `check`
///
/// - `spec.name` defaults to the object name
/// - `status.created` defaults to the object creation timestamp
/// - `status.name` defaults to `spec.name`
/// - `status.status` defaults to `unknown`
/// - `status.type` defaults to `ping`
pub fn apply_defaults(mut check: Check) -> Check {
    let object_name = check.name_any();
    let creation_timestamp = check.metadata.creation_timestamp.as_ref().and_then(time_to_rfc3339);

    if check.spec.params.name.is_none() {
        debug!(name = %object_name, "using default Name");
        check.spec.params.name = Some(object_name);
    }
    let spec_name = check.spec.params.name.clone();

    let status = check.status.get_or_insert_with(Default::default);
    if status.created.is_none() {
        debug!(created = ?creation_timestamp, "using default CreatedTime");
        status.created = creation_timestamp;
    }
    if status.params.name.is_none() {
        status.params.name = spec_name;
    }
    if status.status.is_none() {
        debug!("using default Status");
        status.status = Some(CheckResult::Unknown);
    }
    if status.params.r#type.is_unset() {
        debug!("using default Type");
        status.params.r#type = CheckType::Ping;
    }

    check
}

/// Kubernetes serializes `Time` as an RFC3339 string
fn time_to_rfc3339(time: &Time) -> Option<String> {
    serde_json::to_value(time)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
}
