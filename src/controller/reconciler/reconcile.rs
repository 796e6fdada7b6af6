//! # Reconcile
//!
//! One reconciliation pass for one `Check`:
//!
//! 1. fetch the object (gone means fully cleaned up, nothing to do)
//! 2. apply defaults
//! 3. load credentials and build a Pingdom client for this pass
//! 4. attach the finalizer
//! 5. refresh the observed status from Pingdom (best-effort)
//! 6. create, update or delete the Pingdom check
//! 7. detach the finalizer once a deleted object's check is gone
//! 8. persist the observed status, unless the object is being deleted
//! 9. requeue soon after changes, at the idle cadence otherwise

use crate::controller::finalizer::FinalizerManager;
use crate::controller::reconciler::defaults::apply_defaults;
use crate::controller::reconciler::types::{ReconcileOutcome, Reconciler, ReconcilerError};
use crate::controller::resources::check::CheckReconciler;
use crate::controller::resources::ResourceReconciler;
use crate::crd::Check;
use crate::observability::metrics;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Entry point used by the kube controller
pub async fn reconcile(check: Arc<Check>, ctx: Arc<Reconciler>) -> Result<Action, ReconcilerError> {
    let name = check.name_any();
    let namespace = check
        .namespace()
        .ok_or_else(|| ReconcilerError::MissingNamespace(name.clone()))?;

    let span = info_span!("controller.reconcile", check = %name, namespace = %namespace);
    let start = Instant::now();
    metrics::increment_reconciliations();

    let result = ctx.reconcile_check(&namespace, &name).instrument(span).await;
    metrics::observe_reconciliation_duration(start.elapsed().as_secs_f64());

    let outcome = result?;
    Ok(match outcome.requeue_after {
        Some(delay) => {
            let reason = if outcome.did_work { "work" } else { "idle" };
            info!(check = %name, namespace = %namespace, "Next scheduled reconciliation in {}s", delay.as_secs());
            metrics::increment_requeues_total(reason);
            Action::requeue(delay)
        }
        None => Action::await_change(),
    })
}

impl Reconciler {
    /// Run one reconciliation pass for the `Check` `namespace/name`
    pub async fn reconcile_check(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReconcileOutcome, ReconcilerError> {
        debug!("entered reconcile");

        let Some(check) = self.store.get(namespace, name).await? else {
            debug!("Check not found, nothing to reconcile");
            return Ok(ReconcileOutcome::finished());
        };

        let check = apply_defaults(check);

        let secret_name = check.spec.credentials_secret.name.clone();
        let credentials = self
            .credentials
            .get(namespace, &secret_name)
            .await
            .inspect_err(|e| error!(error = %e, "Unable to load Pingdom credentials"))?;
        let api = self.providers.create(credentials).map_err(|e| {
            error!(error = %e, "Unable to initialise Pingdom client");
            ReconcilerError::ProviderClient(e)
        })?;

        let mut resource = CheckReconciler::new(check, api.as_ref());
        let finalizers = FinalizerManager::new(self.store.as_ref(), &resource);

        // No new finalizers may be added to an object already being deleted
        if !resource.check().is_being_deleted() {
            finalizers.ensure_attached(resource.check_mut()).await?;
        }

        if let Err(e) = resource.refresh_state().await {
            warn!(error = %e, "Updating Check.Status from Pingdom state failed, attempting to continue");
        }

        let ensured = resource.ensure_state().await;
        let deleting = resource.check().is_being_deleted();

        let detached = match &ensured {
            Ok(()) if deleting => finalizers.ensure_detached(resource.check_mut()).await,
            _ => Ok(()),
        };

        let persisted = if deleting {
            Ok(())
        } else {
            self.store
                .update_status(resource.check())
                .await
                .inspect_err(|e| error!(error = %e, "unable to update Check status"))
        };

        ensured?;
        detached?;
        persisted?;

        let did_work = resource.did_work();
        let delay = if did_work {
            self.config.requeue_after_work_duration()
        } else {
            self.config.requeue_idle_duration()
        };
        debug!(did_work, "exiting reconcile");

        Ok(ReconcileOutcome {
            did_work,
            requeue_after: Some(delay),
        })
    }
}
