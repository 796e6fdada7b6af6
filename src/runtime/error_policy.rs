//! # Error Policy
//!
//! Handling of failed reconciliation passes.

use crate::controller::reconciler::{Reconciler, ReconcilerError};
use crate::crd::Check;
use crate::observability::metrics;
use kube::ResourceExt;
use kube_runtime::controller::Action;
use std::sync::Arc;
use tracing::{error, info};

/// Log the error and retry after the configured error requeue interval
///
/// Errors are not escalated with backoff; a failing check is retried at a
/// fixed cadence until the cause (spec, credentials, Pingdom) is fixed.
pub fn handle_reconciliation_error(
    check: Arc<Check>,
    error: &ReconcilerError,
    ctx: Arc<Reconciler>,
) -> Action {
    let name = check.name_any();
    let namespace = check.namespace().unwrap_or_default();

    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.reconciliation_error",
        check = %name,
        namespace = %namespace,
        error = %error
    );
    let _error_guard = error_span.enter();

    error!("Reconciliation error for {}/{}: {}", namespace, name, error);
    metrics::increment_reconciliation_errors();
    metrics::increment_requeues_total("error");

    let delay = ctx.config.reconciliation_error_requeue_duration();
    info!("Retrying in {}s", delay.as_secs());
    Action::requeue(delay)
}
