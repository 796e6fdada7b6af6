//! # Resource Reconcilers
//!
//! A resource reconciler owns one external resource for one `Check` and
//! brings it in line with the spec.
//!
//! Reconcilers are built per reconciliation pass and dropped at its end so
//! nothing leaks between passes.

pub mod check;

use async_trait::async_trait;

#[async_trait]
pub trait ResourceReconciler: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the external resource and update the observed status
    async fn refresh_state(&mut self) -> Result<(), Self::Error>;

    /// Create, update or delete the external resource as needed
    async fn ensure_state(&mut self) -> Result<(), Self::Error>;

    /// Base name of the finalizer this reconciler relies on, if any
    fn finalizer_name(&self) -> Option<&'static str>;

    /// Whether `ensure_state` changed the external resource in this pass
    fn did_work(&self) -> bool;
}
