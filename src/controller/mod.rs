//! # Controller
//!
//! Core controller modules for the Pingdom operator.
//!
//! - `finalizer`: finalizer registration and removal
//! - `reconciler`: the reconciliation control loop and its collaborators
//! - `resources`: resource reconcilers (create/read/update/delete on Pingdom)
//! - `server`: HTTP server for metrics and health checks

pub mod finalizer;
pub mod reconciler;
pub mod resources;
pub mod server;
