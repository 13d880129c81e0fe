//! Core trait abstractions for dispatch operations.
//!
//! The orchestrator is written once against these traits. Each messaging
//! protocol provides a [`TransportAdapter`], confirmation is read through a
//! [`ReceiptSource`], and all waiting goes through a [`Clock`], so tests can
//! swap in fakes from [`crate::testing`] and drive every failure mode without
//! a chain.
//!
//! # Example: Implementing a Test Fake
//!
//! ```rust,ignore
//! use avusd_dispatch::{Receipt, ReceiptLookupError, ReceiptSource};
//! use alloy_primitives::TxHash;
//! use std::collections::HashMap;
//!
//! struct StaticReceipts {
//!     receipts: HashMap<TxHash, Receipt>,
//! }
//!
//! #[async_trait::async_trait]
//! impl ReceiptSource for StaticReceipts {
//!     async fn get_receipt(
//!         &self,
//!         tx_hash: TxHash,
//!     ) -> Result<Option<Receipt>, ReceiptLookupError> {
//!         Ok(self.receipts.get(&tx_hash).copied())
//!     }
//! }
//! ```

use alloy_primitives::TxHash;
use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::{ReceiptLookupError, Result};
use crate::protocol::{
    DispatchIntent, ExecutionOptions, FeeQuote, Receipt, TransactionHandle, TransportKind,
};

/// Uniform capability set of one cross-chain messaging protocol.
///
/// Implementations own everything protocol-specific: destination id width,
/// how `extra_options` are threaded into the call, and which reverts count as
/// underfunding. The orchestrator never branches on the concrete type.
///
/// Implementations must hold no per-dispatch state. Any connection they use
/// is acquired per call.
#[async_trait]
pub trait TransportAdapter: Send + Sync {
    /// Which transport this adapter serves
    fn kind(&self) -> TransportKind;

    /// Reads the fee required to deliver `intent` with `options`.
    ///
    /// # Errors
    ///
    /// Returns `QuoteUnavailable` if the fee view reverts, the transport
    /// fails, or the call times out. A zero amount is returned as-is; the
    /// orchestrator decides what it means.
    async fn quote(&self, intent: &DispatchIntent, options: &ExecutionOptions)
        -> Result<FeeQuote>;

    /// Submits the value-bearing transaction, attaching `quote.amount()`.
    ///
    /// # Errors
    ///
    /// Returns `SendUnderfunded` when the revert identifies an insufficient
    /// fee, and `SendRejected` for any other synchronous rejection.
    async fn send(
        &self,
        intent: &DispatchIntent,
        options: &ExecutionOptions,
        quote: &FeeQuote,
    ) -> Result<TransactionHandle>;
}

/// Read access to transaction receipts on the source chain.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    /// Returns the receipt for `tx_hash`, or `None` while it is not yet mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails. Callers treat that as
    /// transient.
    async fn get_receipt(
        &self,
        tx_hash: TxHash,
    ) -> std::result::Result<Option<Receipt>, ReceiptLookupError>;
}

/// Trait for time-based operations.
///
/// Lets tests fast-forward through polling loops and timeouts without
/// actually waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    fn now(&self) -> Instant;
}
