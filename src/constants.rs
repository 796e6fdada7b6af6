//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default HTTP server port for metrics and health endpoints
pub const DEFAULT_METRICS_PORT: u16 = 5000;

/// Default Pingdom REST API base URL
pub const DEFAULT_PINGDOM_BASE_URL: &str = "https://api.pingdom.com/api/2.1";

/// Requeue delay after a pass that created or updated the Pingdom check (seconds)
/// Short, so the new state is read back quickly
pub const DEFAULT_REQUEUE_AFTER_WORK_SECS: u64 = 10;

/// Requeue delay after a pass with nothing to do (seconds)
/// Matches the shortest Pingdom check resolution
pub const DEFAULT_REQUEUE_IDLE_SECS: u64 = 60;

/// Default requeue interval for reconciliation errors (seconds)
pub const DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS: u64 = 60;

/// Base name of the finalizer guarding Pingdom check cleanup
pub const CHECK_FINALIZER_BASE_NAME: &str = "check-resource";

/// Field manager used for status patches
pub const FIELD_MANAGER: &str = "pingdom-operator";

/// Keys of the credentials Secret
pub const CREDENTIALS_USER_KEY: &str = "user";
pub const CREDENTIALS_PASSWORD_KEY: &str = "password";
