use alloy_network::Ethereum;
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_sol_types::SolError;
use async_trait::async_trait;
use bon::Builder;
use std::time::Duration;
use tracing::{debug, info};

use super::{quote_within, recipient_address, send_error};
use crate::bridge::DEFAULT_CALL_TIMEOUT_SECS;
use crate::contracts::bridging::{
    AvUsdBridgingContract, IAvUSDBridging::InsufficientFee, InsufficientFeeTokenAmount,
};
use crate::error::Result;
use crate::protocol::{
    DispatchIntent, ExecutionOptions, FeeQuote, TransactionHandle, TransportKind,
};
use crate::traits::TransportAdapter;

/// Reverts that mean the attached value did not cover the CCIP fee.
const UNDERFUNDED_SELECTORS: [[u8; 4]; 2] =
    [InsufficientFeeTokenAmount::SELECTOR, InsufficientFee::SELECTOR];

/// Secondary transport: Chainlink CCIP through `quoteSendFeeWithCCIP` and
/// `sendWithCCIP`.
///
/// Destination ids are 64-bit CCIP chain selectors. The CCIP calls take no
/// executor options, so [`ExecutionOptions::extra_options`] is ignored.
#[derive(Builder, Clone, Debug)]
pub struct CcipAdapter<P: Provider<Ethereum> + Clone> {
    provider: P,
    bridge_address: Address,
    /// Upper bound on the fee view round trip
    #[builder(default = Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS))]
    call_timeout: Duration,
}

impl<P: Provider<Ethereum> + Clone> CcipAdapter<P> {
    pub fn bridge_address(&self) -> Address {
        self.bridge_address
    }

    fn contract(&self) -> AvUsdBridgingContract<P> {
        AvUsdBridgingContract::new(self.bridge_address, self.provider.clone())
    }
}

#[async_trait]
impl<P: Provider<Ethereum> + Clone> TransportAdapter for CcipAdapter<P> {
    fn kind(&self) -> TransportKind {
        TransportKind::Secondary
    }

    async fn quote(
        &self,
        intent: &DispatchIntent,
        _options: &ExecutionOptions,
    ) -> Result<FeeQuote> {
        let selector = intent.destination_id().as_u64();
        let to = recipient_address(intent)?;
        let contract = self.contract();

        debug!(
            chain_selector = selector,
            to = %to,
            amount = %intent.amount(),
            event = "ccip_quote_requested"
        );

        let (fee, observed_at) = quote_within(self.kind(), self.call_timeout, async {
            let fee = contract
                .quote_ccip(selector, to, intent.amount(), intent.use_alternate_path())
                .await?;
            let block = contract.block_number().await?;
            Ok::<_, alloy_contract::Error>((fee, block))
        })
        .await?;

        Ok(FeeQuote::new(self.kind(), fee, observed_at))
    }

    async fn send(
        &self,
        intent: &DispatchIntent,
        _options: &ExecutionOptions,
        quote: &FeeQuote,
    ) -> Result<TransactionHandle> {
        let selector = intent.destination_id().as_u64();
        let to = recipient_address(intent)?;
        let value = quote.amount();

        let tx_hash = self
            .contract()
            .send_ccip(
                selector,
                to,
                intent.amount(),
                intent.use_alternate_path(),
                value,
            )
            .await
            .map_err(|e| send_error(self.kind(), &e, value, &UNDERFUNDED_SELECTORS))?;

        info!(
            tx_hash = %tx_hash,
            chain_selector = selector,
            value = %value,
            event = "ccip_send_submitted"
        );
        Ok(TransactionHandle::new(self.kind(), tx_hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::OptionsBuilder;
    use crate::contracts::bridging::IAvUSDBridging::sendWithCCIPCall;
    use crate::contracts::bridging::LZ_InsufficientFee;
    use crate::error::DispatchError;
    use crate::transport::mock_chain::MockChain;
    use alloy_network::{Ethereum, TransactionBuilder};
    use alloy_primitives::{TxHash, U256};
    use alloy_sol_types::SolCall;

    const OPTIMISM_SEPOLIA: u64 = 5224473277236331295;

    fn adapter(chain: &MockChain) -> CcipAdapter<MockChain> {
        CcipAdapter::builder()
            .provider(chain.clone())
            .bridge_address(Address::repeat_byte(0xb6))
            .build()
    }

    fn intent() -> DispatchIntent {
        DispatchIntent::builder()
            .destination_id(OPTIMISM_SEPOLIA)
            .recipient(Address::repeat_byte(0x19).into())
            .amount(U256::from(25))
            .use_alternate_path(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_underfunded_selectors_exclude_layerzero_error() {
        assert!(UNDERFUNDED_SELECTORS.contains(&InsufficientFeeTokenAmount::SELECTOR));
        assert!(UNDERFUNDED_SELECTORS.contains(&InsufficientFee::SELECTOR));
        assert!(!UNDERFUNDED_SELECTORS.contains(&LZ_InsufficientFee::SELECTOR));
    }

    #[tokio::test]
    async fn test_quote_reads_fee_and_block() {
        let chain = MockChain::new();
        chain.push_fee(U256::from(1_000_000)).push_block_number(512);

        let intent = intent();
        let options = OptionsBuilder::build(&intent, TransportKind::Secondary).unwrap();
        let quote = adapter(&chain).quote(&intent, &options).await.unwrap();

        assert_eq!(quote.transport(), TransportKind::Secondary);
        assert_eq!(quote.amount(), U256::from(1_000_000));
        assert_eq!(quote.observed_at(), 512);
    }

    #[tokio::test]
    async fn test_send_attaches_quoted_fee() {
        let chain = MockChain::new();
        let tx_hash = TxHash::from([0x24; 32]);
        chain.push_tx_hash(tx_hash);

        let intent = intent();
        let options = OptionsBuilder::build(&intent, TransportKind::Secondary).unwrap();
        let quote = FeeQuote::new(TransportKind::Secondary, U256::from(777), 3);
        let handle = adapter(&chain).send(&intent, &options, &quote).await.unwrap();

        assert_eq!(handle.tx_hash(), tx_hash);

        let sent = chain.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(TransactionBuilder::<Ethereum>::value(&sent[0]), Some(U256::from(777)));

        let call = sendWithCCIPCall::abi_decode(TransactionBuilder::<Ethereum>::input(&sent[0]).unwrap()).unwrap();
        assert_eq!(call.destinationChainSelector, OPTIMISM_SEPOLIA);
        assert_eq!(call.to, Address::repeat_byte(0x19));
        assert_eq!(call.amount, U256::from(25));
        assert!(call.useAlternatePath);
    }

    #[tokio::test]
    async fn test_insufficient_fee_token_amount_is_underfunded() {
        let chain = MockChain::new();
        chain.push_revert(&InsufficientFeeTokenAmount::SELECTOR);

        let intent = intent();
        let options = OptionsBuilder::build(&intent, TransportKind::Secondary).unwrap();
        let quote = FeeQuote::new(TransportKind::Secondary, U256::from(4), 3);
        let err = adapter(&chain)
            .send(&intent, &options, &quote)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DispatchError::SendUnderfunded {
                transport: TransportKind::Secondary,
                attached: U256::from(4),
            }
        );
    }

    #[tokio::test]
    async fn test_layerzero_fee_error_is_rejected_on_ccip() {
        let chain = MockChain::new();
        let mut data = LZ_InsufficientFee::SELECTOR.to_vec();
        data.extend_from_slice(&[0u8; 128]);
        chain.push_revert(&data);

        let intent = intent();
        let options = OptionsBuilder::build(&intent, TransportKind::Secondary).unwrap();
        let quote = FeeQuote::new(TransportKind::Secondary, U256::from(4), 3);
        let err = adapter(&chain)
            .send(&intent, &options, &quote)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DispatchError::SendRejected {
                transport: TransportKind::Secondary,
                ..
            }
        ));
    }
}
