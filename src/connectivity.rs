//! Connectivity probe - reports whether the device is online right now.
//!
//! The catalog asks once per `add` and stamps the answer onto the new product.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// On-demand online/offline status.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `true` when the device currently has a network connection.
    async fn is_online(&self) -> bool;
}

/// Probe whose answer is set by hand: from the `--offline` flag, or by tests.
#[derive(Debug)]
pub struct StaticConnectivity {
    online: AtomicBool,
}

impl StaticConnectivity {
    /// Creates a probe that reports `online`.
    #[must_use]
    pub const fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    /// Probe that always reports online until changed.
    #[must_use]
    pub const fn online() -> Self {
        Self::new(true)
    }

    /// Probe that always reports offline until changed.
    #[must_use]
    pub const fn offline() -> Self {
        Self::new(false)
    }

    /// Changes the reported status.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }
}

#[async_trait]
impl ConnectivityProbe for StaticConnectivity {
    async fn is_online(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_probe_reports_current_flag() {
        let probe = StaticConnectivity::online();
        assert!(probe.is_online().await);
        probe.set_online(false);
        assert!(!probe.is_online().await);
        assert!(!StaticConnectivity::offline().is_online().await);
    }
}
