//! # Provider
//!
//! Boundary to the external monitoring provider (Pingdom).
//!
//! The reconciler only talks to [`PingdomApi`]. A fresh implementation is
//! built for every reconciliation pass through a [`ProviderFactory`], from
//! the credentials referenced by the `Check` being reconciled, so no client
//! state survives between passes.

pub mod pingdom;

use crate::crd::RequestParams;
use async_trait::async_trait;

pub use pingdom::{
    CheckDetails, CheckResponse, CheckResponseType, CreateCheckResponse, CreatedCheck,
    HttpDetails, MessageResponse, PingdomClient, PingdomClientFactory, PingdomError, TcpDetails,
};

/// Pingdom checks API
#[async_trait]
pub trait PingdomApi: Send + Sync {
    /// Create a new check; returns its identifier
    async fn create_check(&self, params: &RequestParams)
        -> Result<CreateCheckResponse, PingdomError>;

    /// Read detailed state of a check
    async fn read_check(&self, id: i64) -> Result<CheckResponse, PingdomError>;

    /// Modify an existing check
    async fn update_check(
        &self,
        id: i64,
        params: &RequestParams,
    ) -> Result<MessageResponse, PingdomError>;

    /// Delete a check
    async fn delete_check(&self, id: i64) -> Result<MessageResponse, PingdomError>;
}

/// Pingdom account credentials, read from the Secret a `Check` references
#[derive(Clone, PartialEq, Eq)]
pub struct PingdomCredentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for PingdomCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingdomCredentials")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Builds a provider client for a single reconciliation pass
pub trait ProviderFactory: Send + Sync {
    fn create(&self, credentials: PingdomCredentials) -> Result<Box<dyn PingdomApi>, PingdomError>;
}
