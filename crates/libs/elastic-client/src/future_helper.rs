use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::errors::ElasticClientError;

/// Failures worth another attempt, as opposed to errors that will not go
/// away on their own.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for elasticsearch::Error {
    fn is_transient(&self) -> bool {
        self.is_timeout()
    }
}

impl Transient for ElasticClientError {
    fn is_transient(&self) -> bool {
        matches!(self, ElasticClientError::ElasticSearchError(err) if err.is_timeout())
    }
}

/// Runs `action`, retrying transient failures up to `max_retries` more
/// times with a fixed `wait` between attempts. Any other failure is
/// returned immediately. Exhausting the retries returns the final error
/// after logging it, so callers can skip the item and move on.
pub async fn with_backoff<F, Fut, T, E>(mut action: F, max_retries: u8, wait: Duration) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Transient + Display,
{
    let mut attempt: u8 = 0;

    loop {
        match action().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < max_retries => {
                attempt += 1;
                warn!(
                    "Connection timeout ({}), new attempt in {:?} ({}/{})",
                    err, wait, attempt, max_retries
                );
                tokio::time::sleep(wait).await;
            }
            Err(err) => {
                if err.is_transient() {
                    warn!("Retries exhausted after {} attempts: {}", attempt + 1, err);
                }
                return Err(err);
            }
        }
    }
}
