//! # Check Store
//!
//! Access to `Check` objects in the Kubernetes API.

use crate::constants::FIELD_MANAGER;
use crate::crd::Check;
use async_trait::async_trait;
use kube::api::{Patch, PatchParams, PostParams};
use kube::{Api, Client, ResourceExt};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("object has no {0}")]
    MissingMetadata(&'static str),

    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

/// Read and write `Check` objects
#[async_trait]
pub trait CheckStore: Send + Sync {
    /// Fetch a check; `None` when it no longer exists
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<Check>, StoreError>;

    /// Persist metadata and spec; returns the stored object
    async fn update(&self, check: &Check) -> Result<Check, StoreError>;

    /// Persist the status subresource
    async fn update_status(&self, check: &Check) -> Result<(), StoreError>;
}

/// [`CheckStore`] backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeCheckStore {
    client: Client,
}

impl std::fmt::Debug for KubeCheckStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeCheckStore").finish_non_exhaustive()
    }
}

impl KubeCheckStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api_for(&self, check: &Check) -> Result<(Api<Check>, String), StoreError> {
        let namespace = check
            .namespace()
            .ok_or(StoreError::MissingMetadata("namespace"))?;
        let name = check
            .metadata
            .name
            .clone()
            .ok_or(StoreError::MissingMetadata("name"))?;
        Ok((Api::namespaced(self.client.clone(), &namespace), name))
    }
}

#[async_trait]
impl CheckStore for KubeCheckStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<Option<Check>, StoreError> {
        let api: Api<Check> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?)
    }

    async fn update(&self, check: &Check) -> Result<Check, StoreError> {
        let (api, name) = self.api_for(check)?;
        Ok(api.replace(&name, &PostParams::default(), check).await?)
    }

    async fn update_status(&self, check: &Check) -> Result<(), StoreError> {
        let (api, name) = self.api_for(check)?;
        let patch = status_merge_patch(check);
        api.patch_status(
            &name,
            &PatchParams::apply(FIELD_MANAGER),
            &Patch::Merge(patch),
        )
        .await?;
        Ok(())
    }
}

/// Optional status fields; absent ones are sent as `null` so a merge patch
/// clears what Pingdom stopped reporting
const OPTIONAL_STATUS_FIELDS: [&str; 11] = [
    "name",
    "port",
    "resolutionMinutes",
    "userIds",
    "url",
    "encryption",
    "status",
    "lasterrortime",
    "lasttesttime",
    "lastresponsetime",
    "created",
];

/// JSON merge patch replacing the whole status of `check`
pub fn status_merge_patch(check: &Check) -> serde_json::Value {
    let mut status = serde_json::to_value(&check.status).unwrap_or_default();
    if let Some(fields) = status.as_object_mut() {
        for field in OPTIONAL_STATUS_FIELDS {
            fields.entry(field).or_insert(serde_json::Value::Null);
        }
    }
    serde_json::json!({ "status": status })
}
