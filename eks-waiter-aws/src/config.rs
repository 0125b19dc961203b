//! Waiter configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const ADDON_CREATED_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const ADDON_UPDATED_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const ADDON_DELETED_TIMEOUT: Duration = Duration::from_secs(40 * 60);

/// Timeouts for waiters whose callers do not pass one explicitly.
///
/// Cluster, node group and Fargate profile waiters take the timeout as an
/// argument; add-on waiters read it from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaiterTimeouts {
    pub addon_created: Duration,
    pub addon_updated: Duration,
    pub addon_deleted: Duration,
}

impl Default for WaiterTimeouts {
    fn default() -> Self {
        Self {
            addon_created: ADDON_CREATED_TIMEOUT,
            addon_updated: ADDON_UPDATED_TIMEOUT,
            addon_deleted: ADDON_DELETED_TIMEOUT,
        }
    }
}
