use std::time::Duration;
use tokio::time::sleep;

/// Default pause before each photo upload.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

/// Fixed-delay pacing between successive upstream requests.
///
/// The delay is injected by the caller so tests can run with `Pacer::none()`
/// instead of real-time waits.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::fixed(DEFAULT_DELAY)
    }
}
