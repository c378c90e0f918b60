//! Per-host politeness
//!
//! Workers share one `HostThrottle`. Before fetching, a worker reserves the
//! next slot for the URL's host and sleeps until that slot starts, so two
//! requests to the same host are never closer than the configured delay
//! while unrelated hosts proceed in parallel.

use crate::state::HostState;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::trace;

/// Shared map of host politeness state
#[derive(Debug)]
pub struct HostThrottle {
    delay: Duration,
    hosts: Mutex<HashMap<String, HostState>>,
}

impl HostThrottle {
    /// Creates a throttle enforcing `delay` between requests to one host
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    /// Reserves a request slot for `host` and returns the wait before it
    pub fn reserve(&self, host: &str) -> Duration {
        let mut hosts = match self.hosts.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        hosts
            .entry(host.to_string())
            .or_default()
            .reserve(self.delay, Instant::now())
    }

    /// Waits until a request to `host` is allowed
    pub async fn wait_turn(&self, host: &str) {
        let wait = self.reserve(host);
        if !wait.is_zero() {
            trace!("Waiting {:?} before next request to {}", wait, host);
            tokio::time::sleep(wait).await;
        }
    }

    /// Records a failed fetch for `host`
    pub fn record_failure(&self, host: &str) {
        if let Ok(mut hosts) = self.hosts.lock() {
            hosts.entry(host.to_string()).or_default().record_failure();
        }
    }

    /// Copy of the state for one host
    pub fn host_state(&self, host: &str) -> Option<HostState> {
        self.hosts.lock().ok()?.get(host).cloned()
    }

    /// Number of hosts contacted so far
    pub fn host_count(&self) -> usize {
        self.hosts.lock().map(|hosts| hosts.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_request_per_host_is_free() {
        let throttle = HostThrottle::new(Duration::from_secs(1));
        assert_eq!(throttle.reserve("a.com.tr"), Duration::ZERO);
        assert_eq!(throttle.reserve("b.com.tr"), Duration::ZERO);
        assert_eq!(throttle.host_count(), 2);
    }

    #[test]
    fn test_same_host_is_spaced() {
        let throttle = HostThrottle::new(Duration::from_secs(1));
        throttle.reserve("a.com.tr");
        let wait = throttle.reserve("a.com.tr");
        assert!(wait > Duration::from_millis(900));
        assert!(wait <= Duration::from_secs(1));
        assert_eq!(throttle.host_state("a.com.tr").unwrap().request_count, 2);
    }

    #[test]
    fn test_record_failure() {
        let throttle = HostThrottle::new(Duration::ZERO);
        throttle.record_failure("a.com.tr");
        assert_eq!(throttle.host_state("a.com.tr").unwrap().failure_count, 1);
        assert!(throttle.host_state("b.com.tr").is_none());
    }

    #[tokio::test]
    async fn test_wait_turn_sleeps_for_reserved_slot() {
        let throttle = HostThrottle::new(Duration::from_millis(200));
        let start = Instant::now();

        throttle.wait_turn("a.com.tr").await;
        throttle.wait_turn("a.com.tr").await;

        assert!(start.elapsed() >= Duration::from_millis(150));
    }
}
