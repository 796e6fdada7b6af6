//! # Pingdom Operator
//!
//! Kubernetes controller reconciling `Check` resources against Pingdom.

use anyhow::Result;
use pingdom_operator::runtime::initialization::initialize;
use pingdom_operator::runtime::watch_loop::run_watch_loop;

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize().await?;

    run_watch_loop(init.checks, init.reconciler, init.server_state).await;

    Ok(())
}
