//! Test utilities and fake implementations for dispatch testing
//!
//! This module provides fake implementations of the dispatch traits that
//! enable testing every failure mode of the quote-then-send lifecycle without
//! a chain or an RPC endpoint.
//!
//! These fakes are designed to be used in integration tests to verify the
//! behavior of the [`BridgeOrchestrator`](crate::BridgeOrchestrator) under
//! conditions like zero quotes, underfunded sends, reverted receipts and
//! confirmation timeouts.

use alloy_primitives::{TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::{DispatchError, ReceiptLookupError, Result};
use crate::protocol::{
    DispatchIntent, ExecutionOptions, FeeQuote, Receipt, TransactionHandle, TransportKind,
};
use crate::traits::{Clock, ReceiptSource, TransportAdapter};

// ============================================================================
// Fake Transport Adapter
// ============================================================================

/// Block number reported with the first quote; each later quote adds one.
const FIRST_QUOTE_BLOCK: u64 = 100;

#[derive(Clone, Debug)]
enum SendOutcome {
    Submitted(TxHash),
    Underfunded,
    Rejected(String),
}

/// One recorded `send` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentTransaction {
    /// Value attached, taken from the quote
    pub value: U256,
    /// `native_value` carried by the options passed to send
    pub options_native_value: U256,
    /// Block the quote was observed at
    pub quoted_at: u64,
}

#[derive(Debug, Default)]
struct AdapterState {
    quotes: VecDeque<Result<U256>>,
    sends: VecDeque<SendOutcome>,
    quote_calls: usize,
    sent: Vec<SentTransaction>,
}

/// A fake transport adapter that replays scripted quotes and send outcomes.
///
/// This allows testing scenarios like:
/// - Zero fee quoted for an unsupported route
/// - Fee view failures
/// - Underfunded sends followed by a re-quote
/// - Synchronous send rejections
///
/// Quotes are consumed in order; once the script is exhausted `quote` fails
/// with `QuoteUnavailable`. Sends are consumed in order; once exhausted every
/// send succeeds with a hash derived from the send count.
#[derive(Clone, Debug)]
pub struct FakeTransportAdapter {
    kind: TransportKind,
    state: Arc<Mutex<AdapterState>>,
}

impl FakeTransportAdapter {
    pub fn new(kind: TransportKind) -> Self {
        Self {
            kind,
            state: Arc::default(),
        }
    }

    /// Queue a fee that the next unscripted `quote` call returns
    pub fn add_quote(&self, amount: U256) -> &Self {
        self.state.lock().unwrap().quotes.push_back(Ok(amount));
        self
    }

    /// Queue a fee view failure
    pub fn add_quote_failure(&self, reason: &str) -> &Self {
        let err = DispatchError::QuoteUnavailable {
            transport: self.kind,
            reason: reason.to_string(),
        };
        self.state.lock().unwrap().quotes.push_back(Err(err));
        self
    }

    /// Queue a successful send returning `tx_hash`
    pub fn add_send_success(&self, tx_hash: TxHash) -> &Self {
        self.push_send(SendOutcome::Submitted(tx_hash))
    }

    /// Queue a send that reverts for an insufficient fee
    pub fn add_send_underfunded(&self) -> &Self {
        self.push_send(SendOutcome::Underfunded)
    }

    /// Queue a send that is rejected for any other reason
    pub fn add_send_rejected(&self, reason: &str) -> &Self {
        self.push_send(SendOutcome::Rejected(reason.to_string()))
    }

    fn push_send(&self, outcome: SendOutcome) -> &Self {
        self.state.lock().unwrap().sends.push_back(outcome);
        self
    }

    /// Number of `quote` calls made so far
    pub fn quote_count(&self) -> usize {
        self.state.lock().unwrap().quote_calls
    }

    /// Number of `send` calls made so far
    pub fn send_count(&self) -> usize {
        self.state.lock().unwrap().sent.len()
    }

    /// Every `send` call in order
    pub fn sent(&self) -> Vec<SentTransaction> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Hash the fake assigns to the `n`th unscripted send, counting from one
    pub fn generated_tx_hash(n: usize) -> TxHash {
        let mut bytes = [0xaa; 32];
        bytes[24..].copy_from_slice(&(n as u64).to_be_bytes());
        TxHash::from(bytes)
    }
}

#[async_trait]
impl TransportAdapter for FakeTransportAdapter {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    async fn quote(
        &self,
        _intent: &DispatchIntent,
        _options: &ExecutionOptions,
    ) -> Result<FeeQuote> {
        let mut state = self.state.lock().unwrap();
        let observed_at = FIRST_QUOTE_BLOCK + state.quote_calls as u64;
        state.quote_calls += 1;

        match state.quotes.pop_front() {
            Some(Ok(amount)) => Ok(FeeQuote::new(self.kind, amount, observed_at)),
            Some(Err(e)) => Err(e),
            None => Err(DispatchError::QuoteUnavailable {
                transport: self.kind,
                reason: "no scripted quote".to_string(),
            }),
        }
    }

    async fn send(
        &self,
        _intent: &DispatchIntent,
        options: &ExecutionOptions,
        quote: &FeeQuote,
    ) -> Result<TransactionHandle> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(SentTransaction {
            value: quote.amount(),
            options_native_value: options.native_value(),
            quoted_at: quote.observed_at(),
        });
        let n = state.sent.len();

        match state.sends.pop_front() {
            Some(SendOutcome::Submitted(tx_hash)) => Ok(TransactionHandle::new(self.kind, tx_hash)),
            Some(SendOutcome::Underfunded) => Err(DispatchError::SendUnderfunded {
                transport: self.kind,
                attached: quote.amount(),
            }),
            Some(SendOutcome::Rejected(reason)) => Err(DispatchError::SendRejected {
                transport: self.kind,
                reason,
            }),
            None => Ok(TransactionHandle::new(self.kind, Self::generated_tx_hash(n))),
        }
    }
}

// ============================================================================
// Fake Receipt Source
// ============================================================================

#[derive(Clone, Debug)]
enum Lookup {
    Pending,
    Failure,
    Mined(Receipt),
}

/// A fake receipt source that replays a lookup sequence per transaction.
///
/// This allows testing scenarios like:
/// - Transaction mined on the first lookup
/// - Pending for a few polls, then mined
/// - Transient lookup failures
/// - Never mined (timeout testing)
///
/// Unknown hashes are reported as pending forever. Once a sequence is
/// exhausted its last entry repeats.
#[derive(Clone, Debug, Default)]
pub struct FakeReceiptSource {
    lookups: Arc<Mutex<HashMap<TxHash, Vec<Lookup>>>>,
    call_counts: Arc<Mutex<HashMap<TxHash, usize>>>,
}

impl FakeReceiptSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_sequence(&self, tx_hash: TxHash, sequence: Vec<Lookup>) {
        self.lookups.lock().unwrap().insert(tx_hash, sequence);
        self.call_counts.lock().unwrap().insert(tx_hash, 0);
    }

    /// Report `receipt` from the next lookup on
    pub fn add_receipt(&self, tx_hash: TxHash, receipt: Receipt) {
        self.set_sequence(tx_hash, vec![Lookup::Mined(receipt)]);
    }

    /// Report pending for `pending_count` lookups, then `receipt`
    pub fn add_pending_then_receipt(&self, tx_hash: TxHash, pending_count: usize, receipt: Receipt) {
        let mut sequence = vec![Lookup::Pending; pending_count];
        sequence.push(Lookup::Mined(receipt));
        self.set_sequence(tx_hash, sequence);
    }

    /// Fail `failure_count` lookups, then report `receipt`
    pub fn add_failures_then_receipt(
        &self,
        tx_hash: TxHash,
        failure_count: usize,
        receipt: Receipt,
    ) {
        let mut sequence = vec![Lookup::Failure; failure_count];
        sequence.push(Lookup::Mined(receipt));
        self.set_sequence(tx_hash, sequence);
    }

    /// Get the number of lookups made for a transaction since it was last configured
    pub fn get_call_count(&self, tx_hash: TxHash) -> usize {
        self.call_counts
            .lock()
            .unwrap()
            .get(&tx_hash)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ReceiptSource for FakeReceiptSource {
    async fn get_receipt(
        &self,
        tx_hash: TxHash,
    ) -> std::result::Result<Option<Receipt>, ReceiptLookupError> {
        let lookups = self.lookups.lock().unwrap();
        let mut counts = self.call_counts.lock().unwrap();
        let index = counts.entry(tx_hash).or_insert(0);
        let lookup = lookups
            .get(&tx_hash)
            .and_then(|sequence| sequence.get(*index).or(sequence.last()))
            .cloned()
            .unwrap_or(Lookup::Pending);
        *index += 1;

        match lookup {
            Lookup::Pending => Ok(None),
            Lookup::Failure => Err(ReceiptLookupError("Simulated RPC error".to_string())),
            Lookup::Mined(receipt) => Ok(Some(receipt)),
        }
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
///
/// Sleeping advances the clock instantly, which lets the waiter run through a
/// full confirmation timeout without actually waiting.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }

    /// Clear the sleep log
    pub fn clear_sleep_log(&self) {
        self.sleep_log.lock().unwrap().clear();
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ReceiptStatus;
    use alloy_primitives::Address;

    fn intent() -> DispatchIntent {
        DispatchIntent::builder()
            .destination_id(40232u32)
            .recipient(Address::repeat_byte(0x19).into())
            .amount(U256::from(25))
            .build()
            .unwrap()
    }

    fn options(kind: TransportKind) -> ExecutionOptions {
        ExecutionOptions::new(kind, 200_000, Default::default())
    }

    #[tokio::test]
    async fn test_fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();
        let start = clock.now();

        clock.sleep(Duration::from_secs(60)).await;
        clock.sleep(Duration::from_secs(120)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(180));
        assert_eq!(clock.now() - start, Duration::from_secs(180));
    }

    #[tokio::test]
    async fn test_fake_adapter_replays_quotes_in_order() {
        let adapter = FakeTransportAdapter::new(TransportKind::Secondary);
        adapter.add_quote(U256::from(10)).add_quote(U256::from(12));
        let options = options(TransportKind::Secondary);

        let first = adapter.quote(&intent(), &options).await.unwrap();
        let second = adapter.quote(&intent(), &options).await.unwrap();
        let third = adapter.quote(&intent(), &options).await;

        assert_eq!(first.amount(), U256::from(10));
        assert_eq!(second.amount(), U256::from(12));
        assert!(second.observed_at() > first.observed_at());
        assert!(matches!(third, Err(DispatchError::QuoteUnavailable { .. })));
        assert_eq!(adapter.quote_count(), 3);
    }

    #[tokio::test]
    async fn test_fake_adapter_records_attached_value() {
        let adapter = FakeTransportAdapter::new(TransportKind::Primary);
        adapter.add_send_underfunded();
        let quote = FeeQuote::new(TransportKind::Primary, U256::from(9), 100);
        let options = options(TransportKind::Primary).with_native_value(U256::from(9));

        let first = adapter.send(&intent(), &options, &quote).await;
        let second = adapter.send(&intent(), &options, &quote).await.unwrap();

        assert!(matches!(
            first,
            Err(DispatchError::SendUnderfunded { attached, .. }) if attached == U256::from(9)
        ));
        assert_eq!(second.tx_hash(), FakeTransportAdapter::generated_tx_hash(2));
        assert_eq!(adapter.send_count(), 2);
        assert!(adapter
            .sent()
            .iter()
            .all(|sent| sent.value == sent.options_native_value));
    }

    #[tokio::test]
    async fn test_fake_receipt_source_unknown_hash_is_pending() {
        let source = FakeReceiptSource::new();
        let tx_hash = TxHash::from([1u8; 32]);

        assert_eq!(source.get_receipt(tx_hash).await.unwrap(), None);
        assert_eq!(source.get_call_count(tx_hash), 1);
    }

    #[tokio::test]
    async fn test_fake_receipt_source_failure_then_receipt() {
        let source = FakeReceiptSource::new();
        let tx_hash = TxHash::from([1u8; 32]);
        let receipt = Receipt {
            status: ReceiptStatus::Success,
            block_number: 7,
            tx_hash,
        };
        source.add_failures_then_receipt(tx_hash, 1, receipt);

        assert!(source.get_receipt(tx_hash).await.is_err());
        assert_eq!(source.get_receipt(tx_hash).await.unwrap(), Some(receipt));
        assert_eq!(source.get_receipt(tx_hash).await.unwrap(), Some(receipt));
    }
}
