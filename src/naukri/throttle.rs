use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

const MAX_REQUESTS_PER_MINUTE: u32 = 30;

/// Spaces out page loads so the listing site sees a human-paced session.
pub struct PageThrottle {
    page_delay: Duration,
    state: Arc<Mutex<ThrottleState>>,
}

struct ThrottleState {
    last_request: Option<Instant>,
    blocked_until: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

impl PageThrottle {
    pub fn new(page_delay: Duration) -> Self {
        Self {
            page_delay,
            state: Arc::new(Mutex::new(ThrottleState {
                last_request: None,
                blocked_until: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
        }
    }

    /// Waits until the next page load is allowed and records it.
    ///
    /// The lock is released while sleeping, so a `back_off` from another
    /// task lands immediately and is seen when the state is re-checked.
    pub async fn wait(&self) {
        loop {
            let mut state = self.state.lock().await;
            let now = Instant::now();

            if let Some(blocked_until) = state.blocked_until {
                if blocked_until > now {
                    let wait_duration = blocked_until - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    continue;
                }
                state.blocked_until = None;
            }

            if let Some(last) = state.last_request {
                let since = now.saturating_duration_since(last);
                if since < self.page_delay {
                    let wait_duration = self.page_delay - since;
                    drop(state);
                    tracing::debug!("Waiting {:?} before next page", wait_duration);
                    sleep(wait_duration).await;
                    continue;
                }
            }

            let minute_elapsed = now.saturating_duration_since(state.minute_start);
            if minute_elapsed >= Duration::from_secs(60) {
                state.requests_this_minute = 0;
                state.minute_start = now;
            } else if state.requests_this_minute >= MAX_REQUESTS_PER_MINUTE {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                continue;
            }

            state.requests_this_minute += 1;
            state.last_request = Some(now);
            return;
        }
    }

    /// Blocks further page loads for `secs` seconds, e.g. after a 429.
    pub async fn back_off(&self, secs: u64) {
        let mut state = self.state.lock().await;
        let until = Instant::now() + Duration::from_secs(secs);
        state.blocked_until = Some(match state.blocked_until {
            Some(existing) if existing > until => existing,
            _ => until,
        });
    }
}

impl Default for PageThrottle {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
