//! OpenTelemetry span helpers for dispatch operations
//!
//! Span names are static and attributes are structured, so a collector can
//! group every dispatch by transport and destination without parsing
//! messages. The orchestrator and waiter attach these with
//! [`Instrument`](tracing::Instrument); they are public for callers who drive
//! adapters directly.
//!
//! # Example
//!
//! ```rust
//! use avusd_dispatch::{spans, TransactionHandle, TransportKind};
//! use alloy_primitives::TxHash;
//! use std::time::Duration;
//! use tracing::Instrument;
//!
//! # async fn example() {
//! let handle = TransactionHandle::new(TransportKind::Primary, TxHash::ZERO);
//! let span = spans::wait_for_confirmation(
//!     &handle,
//!     Duration::from_secs(180),
//!     Duration::from_secs(3),
//! );
//! async {
//!     // Your custom polling logic here
//! }
//! .instrument(span)
//! .await;
//! # }
//! ```

use std::time::Duration;
use tracing::Span;

use crate::error::DispatchError;
use crate::protocol::{DispatchIntent, FeeQuote, TransactionHandle, TransportKind};

/// Create span for one full quote-then-send-then-confirm run.
///
/// Parent: Caller's span
/// Children: avusd_dispatch.quote, avusd_dispatch.send, avusd_dispatch.wait_for_confirmation
#[inline]
pub fn dispatch(intent: &DispatchIntent, transport: TransportKind) -> Span {
    tracing::info_span!(
        "avusd_dispatch.dispatch",
        transport = transport.protocol_name(),
        destination_id = intent.destination_id().as_u64(),
        recipient = %intent.recipient(),
        amount = %intent.amount(),
        use_alternate_path = intent.use_alternate_path(),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a fee view call.
///
/// Parent: avusd_dispatch.dispatch
/// Children: Provider RPC calls
#[inline]
pub fn quote(intent: &DispatchIntent, transport: TransportKind) -> Span {
    tracing::info_span!(
        "avusd_dispatch.quote",
        transport = transport.protocol_name(),
        destination_id = intent.destination_id().as_u64(),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for submitting the value-bearing transaction.
///
/// Parent: avusd_dispatch.dispatch
/// Children: Provider RPC calls
#[inline]
pub fn send(transport: TransportKind, attempt: u32, quote: &FeeQuote) -> Span {
    tracing::info_span!(
        "avusd_dispatch.send",
        transport = transport.protocol_name(),
        attempt = attempt,
        value = %quote.amount(),
        quoted_at_block = quote.observed_at(),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for waiting on a submitted transaction.
///
/// Parent: avusd_dispatch.dispatch, or none when re-waiting on a handle
/// Children: Receipt lookups
#[inline]
pub fn wait_for_confirmation(
    handle: &TransactionHandle,
    timeout: Duration,
    poll_interval: Duration,
) -> Span {
    tracing::info_span!(
        "avusd_dispatch.wait_for_confirmation",
        tx_hash = %handle.tx_hash(),
        transport = handle.transport().protocol_name(),
        timeout_secs = timeout.as_secs(),
        poll_interval_ms = poll_interval.as_millis() as u64,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record a dispatch error on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error kind, e.g. `send_underfunded`
/// - error.message: Human-readable error message
///
/// # Example
///
/// ```rust
/// use avusd_dispatch::{spans, DispatchError, TransportKind};
///
/// let span = tracing::info_span!("avusd_dispatch.operation");
/// let _guard = span.enter();
///
/// let err = DispatchError::ZeroQuote { transport: TransportKind::Secondary };
/// spans::record_error(&err);
/// ```
pub fn record_error(error: &DispatchError) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error.kind());
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");
}

/// Record error attributes with custom context on the current span.
///
/// This variant allows adding additional context fields to the error.
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
