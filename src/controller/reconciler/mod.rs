//! # Reconciler
//!
//! Reconciliation of `Check` objects against Pingdom.
//!
//! - `reconcile.rs` - the per-pass control loop
//! - `defaults.rs` - defaulting of fresh objects
//! - `store.rs` - `Check` persistence
//! - `credentials.rs` - Pingdom credentials from Secrets
//! - `types.rs` - context, outcome and error types

pub mod credentials;
pub mod defaults;
mod reconcile;
pub mod store;
mod types;

pub use credentials::{credentials_from_data, CredentialStore, CredentialsError, KubeCredentialStore};
pub use defaults::apply_defaults;
pub use reconcile::reconcile;
pub use store::{CheckStore, KubeCheckStore, StoreError};
pub use types::{ReconcileOutcome, Reconciler, ReconcilerError};
