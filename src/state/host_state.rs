use std::time::{Duration, Instant};

/// Tracks politeness state for one host during crawling
///
/// Requests to a host are spaced by at least the configured delay. Slots are
/// handed out in advance: a worker that reserves a slot gets the time it must
/// wait, and the next slot moves forward by one delay.
#[derive(Debug, Clone, Default)]
pub struct HostState {
    /// Number of requests reserved for this host in the current crawl
    pub request_count: u32,

    /// Start time of the most recently reserved request
    pub last_request_time: Option<Instant>,

    /// Number of failed fetches from this host
    pub failure_count: u32,
}

impl HostState {
    /// Creates a new HostState with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculates the time until the next request may start
    ///
    /// Returns None if a request can be made now.
    pub fn time_until_next_request(&self, delay: Duration, now: Instant) -> Option<Duration> {
        let next = self.last_request_time? + delay;
        if next > now {
            Some(next - now)
        } else {
            None
        }
    }

    /// Reserves the next request slot and returns how long to wait for it
    ///
    /// # Arguments
    ///
    /// * `delay` - Minimum gap between two requests to this host
    /// * `now` - The current time instant
    ///
    /// # Returns
    ///
    /// `Duration::ZERO` if the request may start immediately
    pub fn reserve(&mut self, delay: Duration, now: Instant) -> Duration {
        let wait = self.time_until_next_request(delay, now).unwrap_or_default();
        self.request_count += 1;
        self.last_request_time = Some(now + wait);
        wait
    }

    /// Records a failed fetch
    pub fn record_failure(&mut self) {
        self.failure_count += 1;
    }
}
