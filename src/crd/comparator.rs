//! # State Comparator
//!
//! Decides whether the check on Pingdom has drifted from its spec.
//!
//! A field left unset in the spec is not compared: the observed value is a
//! provider default and carries no intent. A field set in the spec but not
//! observed counts as drift.

use crate::crd::{Check, CheckResult, CheckSpec, CheckStatus};

/// True when the check on Pingdom must be updated to match `spec`
pub fn needs_update(spec: &CheckSpec, status: &CheckStatus) -> bool {
    let desired = &spec.params;
    let observed = &status.params;

    differs(desired.name.as_ref(), observed.name.as_ref())
        || desired.host != observed.host
        || desired.r#type != observed.r#type
        || differs(desired.port.as_ref(), observed.port.as_ref())
        || differs(
            desired.resolution_minutes.as_ref(),
            observed.resolution_minutes.as_ref(),
        )
        || differs(desired.user_ids.as_ref(), observed.user_ids.as_ref())
        || differs(desired.url.as_ref(), observed.url.as_ref())
        || differs(desired.encryption.as_ref(), observed.encryption.as_ref())
        || pause_differs(spec.paused, status.status)
}

/// Desired value, when set, must equal the observed one
fn differs<T: PartialEq>(desired: Option<&T>, observed: Option<&T>) -> bool {
    desired.is_some_and(|want| observed != Some(want))
}

/// Pingdom reports a paused check through its status rather than a flag
fn pause_differs(paused: Option<bool>, status: Option<CheckResult>) -> bool {
    let observed_paused = status == Some(CheckResult::Paused);
    paused.is_some_and(|want| want != observed_paused)
}

impl Check {
    /// True when the check on Pingdom must be updated to match the spec
    pub fn needs_update(&self) -> bool {
        match &self.status {
            Some(status) => needs_update(&self.spec, status),
            None => needs_update(&self.spec, &CheckStatus::default()),
        }
    }
}
