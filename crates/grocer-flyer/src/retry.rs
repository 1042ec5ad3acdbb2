//! Retry with exponential back-off and jitter for flyer searches.
//!
//! Only transient failures are retried: timeouts, connection failures,
//! HTTP 429 and HTTP 5xx. Everything else is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;

use crate::error::FlyerError;

/// Upper bound on any single back-off sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &FlyerError) -> bool {
    match err {
        FlyerError::Http(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status().is_some_and(|s| {
                    s == StatusCode::TOO_MANY_REQUESTS || s.is_server_error()
                })
        }
        FlyerError::InvalidUrl { .. }
        | FlyerError::Deserialize { .. }
        | FlyerError::ArchiveIo { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient
/// errors.
///
/// The sleep before retry `n` is `backoff_base_ms × 2ⁿ⁻¹` with ±25 % jitter,
/// capped at 60 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FlyerError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FlyerError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = jittered_delay_ms(backoff_base_ms, attempt);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "flyer search transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

fn jittered_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt.saturating_sub(1)).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
    delay_ms
}
