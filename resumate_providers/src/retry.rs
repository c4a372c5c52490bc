use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry schedule for provider requests.
///
/// The operation runs once, then once more after each delay in `delays`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    /// 1s, 2s, 4s: four attempts in total.
    fn default() -> Self {
        Self::new([1, 2, 4].map(Duration::from_secs))
    }
}

impl RetryPolicy {
    pub fn new(delays: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            delays: delays.into_iter().collect(),
        }
    }

    /// Single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self { delays: Vec::new() }
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }

    /// Run `operation` until it succeeds or the schedule is exhausted,
    /// returning the last error in the latter case.
    pub async fn run<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let total = self.max_attempts();
        let mut delays = self.delays.iter();
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => match delays.next() {
                    Some(delay) => {
                        warn!(
                            "Request failed (attempt {attempt}/{total}): {e}. Retrying after {}ms...",
                            delay.as_millis()
                        );
                        sleep(*delay).await;
                        attempt += 1;
                    }
                    None => return Err(e),
                },
            }
        }
    }
}
