//! # Watch Loop
//!
//! Watches `Check` resources and triggers reconciliation when they change.
//!
//! The kube controller runs at most one pass per object at a time, so
//! passes for the same `Check` never overlap.

use crate::controller::reconciler::{reconcile, Reconciler};
use crate::controller::server::ServerState;
use crate::crd::Check;
use crate::runtime::error_policy::handle_reconciliation_error;
use futures::StreamExt;
use kube::Api;
use kube_runtime::{watcher, Controller};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Run the controller until a shutdown signal is received
pub async fn run_watch_loop(
    checks: Api<Check>,
    reconciler: Arc<Reconciler>,
    server_state: Arc<ServerState>,
) {
    info!("Starting controller watch loop...");
    server_state.set_ready(true);

    let shutdown_state = Arc::clone(&server_state);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal, initiating graceful shutdown...");
            shutdown_state.set_ready(false);
        }
    });

    Controller::new(checks, watcher::Config::default().any_semantic())
        .shutdown_on_signal()
        .run(reconcile, handle_reconciliation_error, reconciler)
        .for_each(|result| async move {
            match result {
                Ok((object, _)) => debug!(check = %object.name, "reconciled"),
                Err(e) => warn!("Controller event error: {}", e),
            }
        })
        .await;

    server_state.set_ready(false);
    info!("Controller watch loop stopped");
}
