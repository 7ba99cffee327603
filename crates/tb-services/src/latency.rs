//! Simulated network latency

use std::time::Duration;
use tb_core::config::MockConfig;

/// Delay awaited before every mock API call. Tests use [`Latency::none`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency(Duration);

impl Latency {
    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn fixed(delay: Duration) -> Self {
        Self(delay)
    }

    pub fn from_config(config: &MockConfig) -> Self {
        Self(config.latency())
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub async fn wait(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
