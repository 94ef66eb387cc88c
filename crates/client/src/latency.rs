//! Artificial latency for in-memory services.

use std::time::Duration;

/// Whether in-memory services pause to emulate a network round trip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Latency {
    /// Sleep for the operation's nominal delay.
    #[default]
    Simulated,
    /// Return immediately.
    None,
}

impl Latency {
    /// Sleep for `millis` milliseconds when latency is simulated.
    pub async fn wait(self, millis: u64) {
        if self == Self::Simulated {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency_sleeps() {
        let start = Instant::now();
        Latency::Simulated.wait(300).await;
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_latency_returns_immediately() {
        let start = Instant::now();
        Latency::None.wait(300).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
