//! # Runtime
//!
//! Controller start-up, watch loop and error policy.

pub mod error_policy;
pub mod initialization;
pub mod watch_loop;
