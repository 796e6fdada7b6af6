//! # Check Resource
//!
//! The `Check` custom resource: the desired state of a Pingdom uptime check.

use crate::crd::params::{comma_separated, CheckParameters, RequestParams, ValidationError};
use kube::CustomResource;
use serde::{Deserialize, Serialize};

/// API group of the `Check` resource
pub const GROUP: &str = "observability.pingdom.mig4.gitlab.io";

/// Desired state of a Pingdom check
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[kube(
    kind = "Check",
    group = "observability.pingdom.mig4.gitlab.io",
    version = "v1alpha1",
    namespaced,
    status = "crate::crd::CheckStatus",
    shortname = "chk",
    derive = "PartialEq",
    printcolumn = r#"{"name":"ID", "type":"string", "jsonPath":".status.id", "description":"Check ID"}, {"name":"Type", "type":"string", "jsonPath":".status.type", "description":"Check type"}, {"name":"Status", "type":"string", "jsonPath":".status.status", "description":"Check status"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct CheckSpec {
    #[serde(flatten)]
    pub params: CheckParameters,

    /// Paused; the Pingdom API defaults this to false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,

    /// Secret in the same namespace holding Pingdom API credentials
    /// (keys `user` and `password`)
    pub credentials_secret: SecretReference,
}

/// Reference to a Secret in the same namespace as the referring object
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SecretReference {
    pub name: String,
}

impl CheckSpec {
    /// Parameters for the create (POST) request
    ///
    /// Only set fields are included. Fails without producing anything when
    /// the spec would be rejected by the API.
    pub fn post_params(&self) -> Result<RequestParams, ValidationError> {
        self.params.validate()?;

        let mut params = RequestParams::new();
        params.insert("name", self.params.name.clone().unwrap_or_default());
        params.insert("type", self.params.r#type.to_string());
        params.insert("host", self.params.host.clone());

        if let Some(paused) = self.paused {
            params.insert("paused", paused.to_string());
        }
        if let Some(port) = self.params.port {
            params.insert("port", port.to_string());
        }
        if let Some(resolution) = self.params.resolution_minutes {
            params.insert("resolution", resolution.to_string());
        }
        if let Some(user_ids) = &self.params.user_ids {
            params.insert("userids", comma_separated(user_ids));
        }
        if let Some(url) = &self.params.url {
            params.insert("url", url.clone());
        }
        if let Some(encryption) = self.params.encryption {
            params.insert("encryption", encryption.to_string());
        }

        Ok(params)
    }

    /// Parameters for the update (PUT) request; the type of an existing check
    /// cannot be changed so it is never sent
    pub fn put_params(&self) -> Result<RequestParams, ValidationError> {
        let mut params = self.post_params()?;
        params.remove("type");
        Ok(params)
    }
}

impl Check {
    /// True once the object has been marked for deletion
    pub fn is_being_deleted(&self) -> bool {
        self.metadata.deletion_timestamp.is_some()
    }

    /// Identifier of the check on Pingdom, 0 when not created yet
    pub fn check_id(&self) -> i64 {
        self.status.as_ref().map_or(0, |s| s.id)
    }
}
