//! # Custom Resource Definitions
//!
//! The `Check` custom resource managed by the operator.
//!
//! ## Module Structure
//!
//! - `check.rs` - `Check` CRD, its spec and the Pingdom request parameters
//! - `params.rs` - Parameters shared by spec and status, validation
//! - `status.rs` - Observed state read back from Pingdom
//! - `comparator.rs` - Spec vs status drift detection

mod check;
mod comparator;
mod params;
mod status;

pub use check::{Check, CheckSpec, SecretReference, GROUP};
pub use comparator::needs_update;
pub use params::{
    check_type_schema, CheckParameters, CheckType, RequestParams, ValidationError,
    VALID_RESOLUTIONS,
};
pub use status::{CheckResult, CheckStatus};
