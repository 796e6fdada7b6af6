//! # Finalizer Lifecycle
//!
//! Idempotent registration and removal of the finalizer that keeps a
//! `Check` around until its Pingdom check has been deleted.

use crate::controller::reconciler::store::{CheckStore, StoreError};
use crate::controller::resources::ResourceReconciler;
use crate::crd::{Check, GROUP};
use kube::ResourceExt;
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum FinalizerError {
    #[error("unable to update object: {0}")]
    Update(#[from] StoreError),
}

/// Manages the finalizer of a single resource reconciler
///
/// A reconciler that does no finalization (no finalizer name) makes both
/// operations no-ops.
pub struct FinalizerManager<'a> {
    store: &'a dyn CheckStore,
    finalizer_name: Option<String>,
}

impl std::fmt::Debug for FinalizerManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinalizerManager")
            .field("finalizer_name", &self.finalizer_name)
            .finish_non_exhaustive()
    }
}

impl<'a> FinalizerManager<'a> {
    pub fn new<R: ResourceReconciler + ?Sized>(store: &'a dyn CheckStore, reconciler: &R) -> Self {
        Self {
            store,
            finalizer_name: reconciler.finalizer_name().map(finalizer_name),
        }
    }

    /// Full finalizer name, if the reconciler uses one
    pub fn finalizer_name(&self) -> Option<&str> {
        self.finalizer_name.as_deref()
    }

    /// Make sure the finalizer is registered on `check`, persisting the
    /// object when it had to be added
    pub async fn ensure_attached(&self, check: &mut Check) -> Result<(), FinalizerError> {
        let Some(name) = self.finalizer_name.as_deref() else {
            debug!("reconciler has no finalizer, skipping registration");
            return Ok(());
        };

        if slice_contains(check.finalizers(), name) {
            return Ok(());
        }

        info!(finalizer = name, "registering finalizer");
        check.finalizers_mut().push(name.to_string());
        self.update_object(check).await
    }

    /// Make sure the finalizer is no longer registered on `check`,
    /// persisting the object when it had to be removed
    pub async fn ensure_detached(&self, check: &mut Check) -> Result<(), FinalizerError> {
        let Some(name) = self.finalizer_name.as_deref() else {
            debug!("reconciler has no finalizer, skipping de-registration");
            return Ok(());
        };

        if !slice_contains(check.finalizers(), name) {
            return Ok(());
        }

        info!(finalizer = name, "removing the finalizer");
        let remaining = slice_remove(check.finalizers(), name);
        check.metadata.finalizers = Some(remaining);
        self.update_object(check).await
    }

    async fn update_object(&self, check: &mut Check) -> Result<(), FinalizerError> {
        match self.store.update(check).await {
            Ok(updated) => {
                // Keep the in-memory status, only pick up the new resourceVersion
                check.metadata = updated.metadata;
                info!(check = %check.name_any(), "check object updated");
                Ok(())
            }
            Err(e) => {
                error!(check = %check.name_any(), error = %e, "unable to update object");
                Err(e.into())
            }
        }
    }
}

fn finalizer_name(base_name: &str) -> String {
    format!("{GROUP}/{base_name}")
}

/// True if `slice` contains `element`
pub fn slice_contains(slice: &[String], element: &str) -> bool {
    slice.iter().any(|item| item == element)
}

/// Copy of `slice` without any occurrence of `element`
pub fn slice_remove(slice: &[String], element: &str) -> Vec<String> {
    slice
        .iter()
        .filter(|item| *item != element)
        .cloned()
        .collect()
}
