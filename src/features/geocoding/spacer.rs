use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum gap between the start of consecutive upstream calls.
///
/// Callers queue on the lock, so concurrent requests are released one by one,
/// each at least `min_interval` after the previous one.
pub struct RequestSpacer {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestSpacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until a request may be sent, then record it as sent
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }

        *last = Some(Instant::now());
    }
}
