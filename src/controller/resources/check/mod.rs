//! # Check Resource Reconciler
//!
//! Keeps the Pingdom check behind a `Check` object in line with its spec.
//!
//! `ensure_state` picks exactly one action per pass, by priority:
//!
//! 1. delete, when the object is being deleted
//! 2. create, when the check does not exist on Pingdom yet (id 0)
//! 3. update, when the spec differs from the observed status
//! 4. nothing otherwise

mod create;
mod delete;
mod error;
mod read;
mod update;

pub use error::CheckError;
pub use read::status_from_response;

use crate::constants::CHECK_FINALIZER_BASE_NAME;
use crate::controller::resources::ResourceReconciler;
use crate::crd::Check;
use crate::provider::PingdomApi;
use async_trait::async_trait;
use kube::ResourceExt;
use tracing::{debug, info};

/// Resource reconciler for a single `Check`, valid for one pass
pub struct CheckReconciler<'a> {
    check: Check,
    api: &'a dyn PingdomApi,
    did_work: bool,
    /// The observed status was read from Pingdom during this pass
    refreshed: bool,
}

impl std::fmt::Debug for CheckReconciler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckReconciler")
            .field("check", &self.check.name_any())
            .field("did_work", &self.did_work)
            .field("refreshed", &self.refreshed)
            .finish_non_exhaustive()
    }
}

impl<'a> CheckReconciler<'a> {
    pub fn new(check: Check, api: &'a dyn PingdomApi) -> Self {
        Self {
            check,
            api,
            did_work: false,
            refreshed: false,
        }
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn check_mut(&mut self) -> &mut Check {
        &mut self.check
    }

    fn name(&self) -> String {
        self.check.name_any()
    }
}

#[async_trait]
impl<'a> ResourceReconciler for CheckReconciler<'a> {
    type Error = CheckError;

    async fn refresh_state(&mut self) -> Result<(), CheckError> {
        let id = self.check.check_id();
        if id == 0 {
            info!(check = %self.name(), "Pingdom resource doesn't exist yet, nothing to refresh");
            return Ok(());
        }
        self.read().await
    }

    async fn ensure_state(&mut self) -> Result<(), CheckError> {
        debug!(check = %self.name(), "entered reconciling external resource state");

        if self.check.is_being_deleted() {
            self.delete().await?;
        } else if self.check.check_id() == 0 {
            self.create().await?;
        } else if self.check.needs_update() {
            self.update().await?;
        } else {
            debug!(
                check = %self.name(),
                id = self.check.check_id(),
                "check is up-to-date with regards to its spec"
            );
        }

        debug!(check = %self.name(), "finished reconciling external resource state");
        Ok(())
    }

    fn finalizer_name(&self) -> Option<&'static str> {
        Some(CHECK_FINALIZER_BASE_NAME)
    }

    fn did_work(&self) -> bool {
        self.did_work
    }
}
