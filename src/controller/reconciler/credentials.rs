//! # Pingdom Credentials
//!
//! Loads the Pingdom account referenced by a `Check` from a Kubernetes Secret.

use crate::constants::{CREDENTIALS_PASSWORD_KEY, CREDENTIALS_USER_KEY};
use crate::provider::PingdomCredentials;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{Api, Client};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("secret {namespace}/{name} not found")]
    SecretNotFound { namespace: String, name: String },

    #[error("Pingdom API {key} not found in secret {namespace}/{name}")]
    MissingKey {
        key: &'static str,
        namespace: String,
        name: String,
    },

    #[error("Pingdom API {key} in secret {namespace}/{name} is not valid UTF-8")]
    InvalidUtf8 {
        key: &'static str,
        namespace: String,
        name: String,
    },

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),
}

/// Resolves credential references to Pingdom credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, namespace: &str, name: &str) -> Result<PingdomCredentials, CredentialsError>;
}

/// [`CredentialStore`] reading Kubernetes Secrets
#[derive(Clone)]
pub struct KubeCredentialStore {
    client: Client,
}

impl std::fmt::Debug for KubeCredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeCredentialStore").finish_non_exhaustive()
    }
}

impl KubeCredentialStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CredentialStore for KubeCredentialStore {
    async fn get(&self, namespace: &str, name: &str) -> Result<PingdomCredentials, CredentialsError> {
        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret = secrets
            .get_opt(name)
            .await?
            .ok_or_else(|| CredentialsError::SecretNotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
            })?;

        let data: BTreeMap<String, Vec<u8>> = secret
            .data
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| (key, value.0))
            .collect();

        debug!(namespace, secret = name, "loaded Pingdom credentials secret");
        credentials_from_data(&data, namespace, name)
    }
}

/// Extract the `user` and `password` keys of a Secret's data
pub fn credentials_from_data(
    data: &BTreeMap<String, Vec<u8>>,
    namespace: &str,
    name: &str,
) -> Result<PingdomCredentials, CredentialsError> {
    let value = |key: &'static str| -> Result<String, CredentialsError> {
        let bytes = data.get(key).ok_or_else(|| CredentialsError::MissingKey {
            key,
            namespace: namespace.to_string(),
            name: name.to_string(),
        })?;
        String::from_utf8(bytes.clone()).map_err(|_| CredentialsError::InvalidUtf8 {
            key,
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    };

    Ok(PingdomCredentials {
        user: value(CREDENTIALS_USER_KEY)?,
        password: value(CREDENTIALS_PASSWORD_KEY)?,
    })
}
