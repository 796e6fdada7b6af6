//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use std::time::Duration;

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// Environment variables are populated from a ConfigMap/Secret using `envFrom` in the deployment.
#[derive(Clone)]
pub struct ControllerConfig {
    /// Pingdom application key, sent with every API request
    pub pingdom_app_key: String,
    /// Pingdom REST API base URL
    pub pingdom_base_url: String,
    /// Requeue delay after a pass that changed the Pingdom check (seconds)
    pub requeue_after_work_secs: u64,
    /// Requeue delay after a pass with nothing to do (seconds)
    pub requeue_idle_secs: u64,
    /// Reconciliation error requeue interval (seconds)
    /// How long to wait before retrying a failed reconciliation
    pub reconciliation_error_requeue_secs: u64,
    /// HTTP server port for metrics and health endpoints
    pub metrics_port: u16,
    /// Namespace to watch; all namespaces when unset
    pub watch_namespace: Option<String>,
}

impl std::fmt::Debug for ControllerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerConfig")
            .field("pingdom_app_key_set", &!self.pingdom_app_key.is_empty())
            .field("pingdom_base_url", &self.pingdom_base_url)
            .field("requeue_after_work_secs", &self.requeue_after_work_secs)
            .field("requeue_idle_secs", &self.requeue_idle_secs)
            .field(
                "reconciliation_error_requeue_secs",
                &self.reconciliation_error_requeue_secs,
            )
            .field("metrics_port", &self.metrics_port)
            .field("watch_namespace", &self.watch_namespace)
            .finish()
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            pingdom_app_key: String::new(),
            pingdom_base_url: DEFAULT_PINGDOM_BASE_URL.to_string(),
            requeue_after_work_secs: DEFAULT_REQUEUE_AFTER_WORK_SECS,
            requeue_idle_secs: DEFAULT_REQUEUE_IDLE_SECS,
            reconciliation_error_requeue_secs: DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS,
            metrics_port: DEFAULT_METRICS_PORT,
            watch_namespace: None,
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        use crate::constants::*;
        Self {
            pingdom_app_key: var_or_default_str(&lookup, "PINGDOM_APP_KEY", ""),
            pingdom_base_url: var_or_default_str(
                &lookup,
                "PINGDOM_BASE_URL",
                DEFAULT_PINGDOM_BASE_URL,
            ),
            requeue_after_work_secs: var_or_default(
                &lookup,
                "REQUEUE_AFTER_WORK_SECS",
                DEFAULT_REQUEUE_AFTER_WORK_SECS,
            ),
            requeue_idle_secs: var_or_default(
                &lookup,
                "REQUEUE_IDLE_SECS",
                DEFAULT_REQUEUE_IDLE_SECS,
            ),
            reconciliation_error_requeue_secs: var_or_default(
                &lookup,
                "RECONCILIATION_ERROR_REQUEUE_SECS",
                DEFAULT_RECONCILIATION_ERROR_REQUEUE_SECS,
            ),
            metrics_port: var_or_default(&lookup, "METRICS_PORT", DEFAULT_METRICS_PORT),
            watch_namespace: lookup("WATCH_NAMESPACE").filter(|ns| !ns.is_empty()),
        }
    }

    /// Get requeue duration after a pass that changed the Pingdom check
    pub fn requeue_after_work_duration(&self) -> Duration {
        Duration::from_secs(self.requeue_after_work_secs)
    }

    /// Get requeue duration after an idle pass
    pub fn requeue_idle_duration(&self) -> Duration {
        Duration::from_secs(self.requeue_idle_secs)
    }

    /// Get reconciliation error requeue duration
    pub fn reconciliation_error_requeue_duration(&self) -> Duration {
        Duration::from_secs(self.reconciliation_error_requeue_secs)
    }
}

/// Read variable or return default value
fn var_or_default<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read variable as string or return default
fn var_or_default_str(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}
