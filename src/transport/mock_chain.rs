//! Scripted JSON-RPC node for adapter tests
//!
//! Responses are queued on an alloy [`Asserter`] in the order the adapter
//! issues requests. Every transaction the adapter submits is recorded so tests
//! can inspect the attached value and calldata.

use alloy_json_rpc::ErrorPayload;
use alloy_network::{Ethereum, Network};
use alloy_primitives::{hex, Bytes, TxHash, U256};
use alloy_provider::mock::Asserter;
use alloy_provider::{
    DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder, RootProvider, SendableTx,
};
use alloy_transport::TransportResult;
use async_trait::async_trait;
use serde_json::value::RawValue;
use std::sync::{Arc, Mutex};

pub(crate) type TransactionRequest = <Ethereum as Network>::TransactionRequest;

/// A JSON-RPC error carrying `data` as revert bytes, as nodes report reverts.
pub(crate) fn revert_payload(data: &[u8]) -> ErrorPayload {
    let raw = RawValue::from_string(format!("\"{}\"", hex::encode_prefixed(data))).unwrap();
    ErrorPayload {
        code: 3,
        message: "execution reverted".into(),
        data: Some(raw),
    }
}

#[derive(Clone)]
pub(crate) struct MockChain {
    asserter: Asserter,
    inner: DynProvider,
    sent: Arc<Mutex<Vec<TransactionRequest>>>,
}

impl MockChain {
    pub(crate) fn new() -> Self {
        let asserter = Asserter::new();
        let inner = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        Self {
            asserter,
            inner,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues an `eth_call` answer returning a single `uint256`.
    pub(crate) fn push_fee(&self, fee: U256) -> &Self {
        self.asserter
            .push_success(&Bytes::copy_from_slice(&fee.to_be_bytes::<32>()));
        self
    }

    /// Queues an `eth_blockNumber` answer.
    pub(crate) fn push_block_number(&self, block: u64) -> &Self {
        self.asserter.push_success(&block);
        self
    }

    /// Queues an `eth_sendTransaction` answer.
    pub(crate) fn push_tx_hash(&self, tx_hash: TxHash) -> &Self {
        self.asserter.push_success(&tx_hash);
        self
    }

    /// Queues a revert carrying `data`.
    pub(crate) fn push_revert(&self, data: &[u8]) -> &Self {
        self.asserter.push_failure(revert_payload(data));
        self
    }

    /// Transactions submitted so far, in order
    pub(crate) fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockChain {
    fn root(&self) -> &RootProvider {
        self.inner.root()
    }

    async fn send_transaction_internal(
        &self,
        tx: SendableTx<Ethereum>,
    ) -> TransportResult<PendingTransactionBuilder<Ethereum>> {
        if let SendableTx::Builder(request) = &tx {
            self.sent.lock().unwrap().push(request.clone());
        }
        self.inner.send_transaction_internal(tx).await
    }
}
