//! Pingdom Operator Library
//!
//! Reconciles `Check` custom resources with uptime checks on Pingdom.
//!
//! ## Quick Start
//!
//! ```rust
//! use pingdom_operator::prelude::*;
//! ```

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod prelude;
pub mod provider;
pub mod runtime;
