//! # Check Reconciler Errors

use crate::crd::ValidationError;
use crate::provider::PingdomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid check spec: {0}")]
    Validation(#[from] ValidationError),

    #[error("unable to create check resource on Pingdom: {0}")]
    Create(#[source] PingdomError),

    #[error("unable to fetch check resource from Pingdom: {0}")]
    Read(#[source] PingdomError),

    #[error("unable to update check resource on Pingdom: {0}")]
    Update(#[source] PingdomError),

    #[error("unable to delete check resource from Pingdom: {0}")]
    Delete(#[source] PingdomError),

    /// Pingdom returned a check of a type that always carries a detail block,
    /// without that block
    #[error("check type is {0} but details not available")]
    MissingDetails(String),

    /// The spec asks for a different type than the existing Pingdom check has
    #[error("check type cannot be changed from {observed} to {desired}, recreate the Check instead")]
    TypeChange { observed: String, desired: String },
}

impl CheckError {
    /// True when the error comes from Pingdom not knowing the check identifier
    pub fn is_invalid_identifier(&self) -> bool {
        match self {
            CheckError::Create(e)
            | CheckError::Read(e)
            | CheckError::Update(e)
            | CheckError::Delete(e) => e.is_invalid_identifier(),
            CheckError::Validation(_)
            | CheckError::MissingDetails(_)
            | CheckError::TypeChange { .. } => false,
        }
    }
}
