use bon::Builder;
use std::time::Duration;
use tracing::{debug, error, info, warn, Instrument};

use super::config::DEFAULT_POLL_INTERVAL_SECS;
use crate::error::{DispatchError, Result};
use crate::protocol::{Receipt, TransactionHandle};
use crate::spans;
use crate::traits::{Clock, ReceiptSource};

/// Smallest delay between receipt lookups, whatever the configuration says
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Waits for submitted transactions to reach a terminal receipt.
///
/// Polls a [`ReceiptSource`] until a receipt appears or the timeout elapses.
/// A reverted receipt is returned like any other; only running out of time is
/// an error. Lookup failures are logged and polling continues.
///
/// # Example
///
/// ```rust
/// use avusd_dispatch::testing::{FakeClock, FakeReceiptSource};
/// use avusd_dispatch::ConfirmationWaiter;
/// use std::time::Duration;
///
/// let waiter = ConfirmationWaiter::builder()
///     .source(FakeReceiptSource::new())
///     .clock(FakeClock::new())
///     .poll_interval(Duration::from_secs(2))
///     .build();
/// ```
#[derive(Builder, Clone, Debug)]
pub struct ConfirmationWaiter<R: ReceiptSource, C: Clock> {
    source: R,
    clock: C,
    #[builder(default = Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS))]
    poll_interval: Duration,
}

impl<R: ReceiptSource, C: Clock> ConfirmationWaiter<R, C> {
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Waits up to `timeout` for `handle` to reach a terminal receipt.
    ///
    /// The source is always consulted at least once, so a zero timeout still
    /// picks up an already-mined transaction. A lookup that is still running
    /// when the deadline passes is abandoned. A timeout too large to add to
    /// the current instant means no deadline at all.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmationTimeout` if no receipt appears in time. The handle
    /// stays valid and can be waited on again.
    pub async fn wait(&self, handle: &TransactionHandle, timeout: Duration) -> Result<Receipt> {
        let span = spans::wait_for_confirmation(handle, timeout, self.poll_interval);
        self.poll_until_terminal(handle, timeout)
            .instrument(span)
            .await
    }

    async fn poll_until_terminal(
        &self,
        handle: &TransactionHandle,
        timeout: Duration,
    ) -> Result<Receipt> {
        let tx_hash = handle.tx_hash();
        let interval = self.poll_interval.max(MIN_POLL_INTERVAL);
        // A timeout past the end of representable time never expires
        let deadline = self.clock.now().checked_add(timeout);
        let mut poll: u64 = 0;

        loop {
            poll += 1;

            // Each lookup only gets the time left before the deadline
            let lookup = self.source.get_receipt(tx_hash);
            let outcome = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(self.clock.now());
                    match tokio::time::timeout(remaining, lookup).await {
                        Ok(outcome) => outcome,
                        Err(_) => {
                            warn!(
                                poll = poll,
                                remaining_ms = remaining.as_millis() as u64,
                                event = "receipt_lookup_timed_out"
                            );
                            break;
                        }
                    }
                }
                None => lookup.await,
            };

            match outcome {
                Ok(Some(receipt)) => {
                    info!(
                        tx_hash = %tx_hash,
                        status = %receipt.status,
                        block_number = receipt.block_number,
                        polls = poll,
                        event = "transaction_confirmed"
                    );
                    return Ok(receipt);
                }
                Ok(None) => {
                    debug!(poll = poll, event = "transaction_pending");
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        poll = poll,
                        event = "receipt_lookup_failed"
                    );
                }
            }

            let now = self.clock.now();
            let pause = match deadline {
                Some(deadline) if now >= deadline => break,
                Some(deadline) => interval.min(deadline - now),
                None => interval,
            };
            self.clock.sleep(pause).await;
        }

        spans::record_error_with_context(
            "confirmation_timeout",
            &format!("No receipt for {tx_hash} after {} polls", poll),
            Some(format!("Timeout: {} seconds", timeout.as_secs()).as_str()),
        );
        error!(
            tx_hash = %tx_hash,
            timeout_secs = timeout.as_secs(),
            polls = poll,
            event = "confirmation_timeout"
        );
        Err(DispatchError::ConfirmationTimeout { tx_hash, timeout })
    }
}
