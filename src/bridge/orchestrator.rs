use bon::bon;
use std::time::Duration;
use tracing::{error, info, warn, Instrument};

use super::config::ConfirmationConfig;
use super::options::OptionsBuilder;
use super::waiter::ConfirmationWaiter;
use crate::error::{DispatchError, Result};
use crate::protocol::{
    DispatchIntent, DispatchResult, ExecutionOptions, FeeQuote, Receipt, TransactionHandle,
    TransportKind,
};
use crate::spans;
use crate::traits::{Clock, ReceiptSource, TransportAdapter};

/// Sends per dispatch: the first attempt plus one re-quote after underfunding
pub const MAX_SEND_ATTEMPTS: u32 = 2;

/// Drives one quote-then-send-then-confirm run per call.
///
/// Holds one adapter per transport and a confirmation waiter. It keeps no
/// per-dispatch state, so a single orchestrator can serve many concurrent
/// dispatches from `&self`.
///
/// # Example
///
/// ```rust
/// use avusd_dispatch::testing::{FakeClock, FakeReceiptSource, FakeTransportAdapter};
/// use avusd_dispatch::{BridgeOrchestrator, ConfirmationConfig, TransportKind};
///
/// let orchestrator = BridgeOrchestrator::builder()
///     .primary(FakeTransportAdapter::new(TransportKind::Primary))
///     .secondary(FakeTransportAdapter::new(TransportKind::Secondary))
///     .receipt_source(FakeReceiptSource::new())
///     .clock(FakeClock::new())
///     .confirmation(ConfirmationConfig::fast())
///     .build();
/// ```
pub struct BridgeOrchestrator<P, S, R, C>
where
    P: TransportAdapter,
    S: TransportAdapter,
    R: ReceiptSource,
    C: Clock,
{
    primary: P,
    secondary: S,
    waiter: ConfirmationWaiter<R, C>,
    confirmation: ConfirmationConfig,
}

#[bon]
impl<P, S, R, C> BridgeOrchestrator<P, S, R, C>
where
    P: TransportAdapter,
    S: TransportAdapter,
    R: ReceiptSource,
    C: Clock,
{
    #[builder]
    pub fn new(
        primary: P,
        secondary: S,
        receipt_source: R,
        clock: C,
        #[builder(default)] confirmation: ConfirmationConfig,
    ) -> Self {
        let waiter = ConfirmationWaiter::builder()
            .source(receipt_source)
            .clock(clock)
            .poll_interval(confirmation.poll_interval())
            .build();

        Self {
            primary,
            secondary,
            waiter,
            confirmation,
        }
    }
}

impl<P, S, R, C> BridgeOrchestrator<P, S, R, C>
where
    P: TransportAdapter,
    S: TransportAdapter,
    R: ReceiptSource,
    C: Clock,
{
    /// Returns the confirmation settings used by [`dispatch`](Self::dispatch)
    pub fn confirmation(&self) -> &ConfirmationConfig {
        &self.confirmation
    }

    /// Returns the adapter serving `transport`
    pub fn adapter(&self, transport: TransportKind) -> &dyn TransportAdapter {
        match transport {
            TransportKind::Primary => &self.primary,
            TransportKind::Secondary => &self.secondary,
        }
    }

    /// Dispatches `intent` over `transport` and waits for the outcome.
    ///
    /// Steps: validate, build options, quote, attach the quote as value, send,
    /// wait for a receipt. A fresh quote is taken on every call; nothing is
    /// cached between dispatches.
    ///
    /// # Errors
    ///
    /// - `InvalidIntent` before any adapter is contacted
    /// - `QuoteUnavailable` or `ZeroQuote` from the quote step; nothing is sent
    /// - `SendRejected` from the send step
    /// - `SendUnderfunded` if the send is underfunded twice in a row (the
    ///   first occurrence triggers one re-quote and resend)
    /// - `ConfirmationTimeout` if no receipt arrives in time; the transaction
    ///   may still land, see [`wait_for`](Self::wait_for)
    ///
    /// A reverted transaction is not an error: it is reported through
    /// `receipt.status`.
    pub async fn dispatch(
        &self,
        intent: &DispatchIntent,
        transport: TransportKind,
    ) -> Result<DispatchResult> {
        let span = spans::dispatch(intent, transport);
        async {
            let result = self.run(intent, transport).await;
            match &result {
                Ok(dispatched) => info!(
                    tx_hash = %dispatched.receipt.tx_hash,
                    fee = %dispatched.quote.amount(),
                    status = %dispatched.receipt.status,
                    event = "dispatch_completed"
                ),
                Err(e) => {
                    spans::record_error(e);
                    error!(error = %e, error_kind = e.kind(), event = "dispatch_failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Waits again on a handle whose earlier wait timed out.
    pub async fn wait_for(&self, handle: &TransactionHandle, timeout: Duration) -> Result<Receipt> {
        self.waiter.wait(handle, timeout).await
    }

    async fn run(&self, intent: &DispatchIntent, transport: TransportKind) -> Result<DispatchResult> {
        intent.validate()?;
        let options = OptionsBuilder::build(intent, transport)?;
        let adapter = self.adapter(transport);

        let mut attempt = 1;
        let (quote, handle) = loop {
            let quote = self.fresh_quote(adapter, intent, &options).await?;
            let funded = options.with_native_value(quote.amount());

            let send_span = spans::send(transport, attempt, &quote);
            match adapter
                .send(intent, &funded, &quote)
                .instrument(send_span)
                .await
            {
                Ok(handle) => break (quote, handle),
                Err(DispatchError::SendUnderfunded { attached, .. })
                    if attempt < MAX_SEND_ATTEMPTS =>
                {
                    warn!(
                        attached = %attached,
                        attempt = attempt,
                        event = "send_underfunded_requoting"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            tx_hash = %handle.tx_hash(),
            value = %quote.amount(),
            attempt = attempt,
            event = "dispatch_sent"
        );

        let receipt = self.waiter.wait(&handle, self.confirmation.timeout()).await?;

        Ok(DispatchResult {
            transport,
            quote,
            receipt,
        })
    }

    async fn fresh_quote(
        &self,
        adapter: &dyn TransportAdapter,
        intent: &DispatchIntent,
        options: &ExecutionOptions,
    ) -> Result<FeeQuote> {
        let transport = options.transport();
        let quote = adapter
            .quote(intent, options)
            .instrument(spans::quote(intent, transport))
            .await?;

        if quote.is_zero() {
            // Recorded on the dispatch span by the caller
            warn!(
                observed_at = quote.observed_at(),
                event = "zero_fee_quoted"
            );
            return Err(DispatchError::ZeroQuote { transport });
        }

        info!(
            fee = %quote.amount(),
            observed_at = quote.observed_at(),
            event = "fee_quoted"
        );
        Ok(quote)
    }
}
