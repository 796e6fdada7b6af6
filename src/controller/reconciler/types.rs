//! # Reconciler Types
//!
//! Core types for the reconciler.

use crate::config::ControllerConfig;
use crate::controller::finalizer::FinalizerError;
use crate::controller::reconciler::credentials::{
    CredentialStore, CredentialsError, KubeCredentialStore,
};
use crate::controller::reconciler::store::{CheckStore, KubeCheckStore, StoreError};
use crate::controller::resources::check::CheckError;
use crate::provider::{PingdomClientFactory, PingdomError, ProviderFactory};
use kube::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Check {0} has no namespace")]
    MissingNamespace(String),

    #[error("Failed to access Check: {0}")]
    Store(#[from] StoreError),

    #[error("Unable to load Pingdom credentials: {0}")]
    Credentials(#[from] CredentialsError),

    #[error("Unable to initialise Pingdom client: {0}")]
    ProviderClient(#[source] PingdomError),

    #[error("Finalizer handling failed: {0}")]
    Finalizer(#[from] FinalizerError),

    #[error("Unable to reconcile Pingdom check: {0}")]
    Check(#[from] CheckError),
}

/// Result of a successful reconciliation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The Pingdom check was created or updated during the pass
    pub did_work: bool,
    /// When to run again; `None` waits for the next change event
    pub requeue_after: Option<Duration>,
}

impl ReconcileOutcome {
    /// Nothing left to reconcile (the object is gone)
    pub fn finished() -> Self {
        Self {
            did_work: false,
            requeue_after: None,
        }
    }
}

/// Shared controller context
///
/// Holds no per-check state: every pass builds its own Pingdom client and
/// resource reconciler from these collaborators.
#[derive(Clone)]
pub struct Reconciler {
    pub store: Arc<dyn CheckStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub providers: Arc<dyn ProviderFactory>,
    pub config: ControllerConfig,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    /// Reconciler talking to the Kubernetes API and the Pingdom API
    pub fn new(client: Client, config: ControllerConfig) -> Self {
        let providers =
            PingdomClientFactory::new(config.pingdom_app_key.clone(), config.pingdom_base_url.clone());
        Self {
            store: Arc::new(KubeCheckStore::new(client.clone())),
            credentials: Arc::new(KubeCredentialStore::new(client)),
            providers: Arc::new(providers),
            config,
        }
    }

    /// Reconciler built from explicit collaborators
    pub fn from_parts(
        store: Arc<dyn CheckStore>,
        credentials: Arc<dyn CredentialStore>,
        providers: Arc<dyn ProviderFactory>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            store,
            credentials,
            providers,
            config,
        }
    }
}
