//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use pingdom_operator::prelude::*;
//! ```

// CRD types
pub use crate::crd::*;

// Provider boundary
pub use crate::provider::{PingdomApi, PingdomCredentials, PingdomError, ProviderFactory};

// Reconciler types
pub use crate::controller::finalizer::{FinalizerError, FinalizerManager};
pub use crate::controller::reconciler::{
    apply_defaults, reconcile, CheckStore, CredentialStore, CredentialsError, ReconcileOutcome,
    Reconciler, ReconcilerError, StoreError,
};
pub use crate::controller::resources::check::{CheckError, CheckReconciler};
pub use crate::controller::resources::ResourceReconciler;

// Config types
pub use crate::config::ControllerConfig;
