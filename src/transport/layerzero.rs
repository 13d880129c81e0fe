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
    AvUsdBridgingContract, IAvUSDBridging::InsufficientFee, LZ_InsufficientFee,
};
use crate::error::{DispatchError, Result};
use crate::protocol::{
    DispatchIntent, ExecutionOptions, FeeQuote, TransactionHandle, TransportKind,
};
use crate::traits::TransportAdapter;

/// Reverts that mean the attached value did not cover the LayerZero fee.
///
/// `LZ_InsufficientFee` comes from the endpoint; `InsufficientFee` is raised
/// by the bridging contract before it forwards the message.
const UNDERFUNDED_SELECTORS: [[u8; 4]; 2] =
    [LZ_InsufficientFee::SELECTOR, InsufficientFee::SELECTOR];

/// Primary transport: LayerZero v2 through `quoteSendFeeWithLayerzero` and
/// `sendWithLayerzero`.
///
/// Destination ids are LayerZero endpoint ids and must fit in `u32`. The
/// encoded executor options from [`ExecutionOptions::extra_options`] are
/// passed to both calls unchanged.
///
/// # Example
///
/// ```rust,no_run
/// use avusd_dispatch::{LayerZeroAdapter, BRIDGE_ADDRESS};
/// use alloy_provider::ProviderBuilder;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect_http("https://sepolia.optimism.io".parse()?);
/// let adapter = LayerZeroAdapter::builder()
///     .provider(provider)
///     .bridge_address(BRIDGE_ADDRESS)
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
pub struct LayerZeroAdapter<P: Provider<Ethereum> + Clone> {
    provider: P,
    bridge_address: Address,
    /// Upper bound on the fee view round trip
    #[builder(default = Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS))]
    call_timeout: Duration,
}

impl<P: Provider<Ethereum> + Clone> LayerZeroAdapter<P> {
    pub fn bridge_address(&self) -> Address {
        self.bridge_address
    }

    fn contract(&self) -> AvUsdBridgingContract<P> {
        AvUsdBridgingContract::new(self.bridge_address, self.provider.clone())
    }
}

/// LayerZero endpoint ids are 32 bits wide.
fn endpoint_id(intent: &DispatchIntent) -> Result<u32> {
    u32::try_from(intent.destination_id().as_u64()).map_err(|_| {
        DispatchError::invalid_intent(format!(
            "destination {} is not a LayerZero endpoint id",
            intent.destination_id()
        ))
    })
}

#[async_trait]
impl<P: Provider<Ethereum> + Clone> TransportAdapter for LayerZeroAdapter<P> {
    fn kind(&self) -> TransportKind {
        TransportKind::Primary
    }

    async fn quote(
        &self,
        intent: &DispatchIntent,
        options: &ExecutionOptions,
    ) -> Result<FeeQuote> {
        let dst_eid = endpoint_id(intent)?;
        let to = recipient_address(intent)?;
        let contract = self.contract();

        debug!(
            dst_eid = dst_eid,
            to = %to,
            amount = %intent.amount(),
            options = %options.extra_options(),
            event = "layerzero_quote_requested"
        );

        let (fee, observed_at) = quote_within(self.kind(), self.call_timeout, async {
            let fee = contract
                .quote_layerzero(
                    dst_eid,
                    to,
                    intent.amount(),
                    intent.use_alternate_path(),
                    options.extra_options().clone(),
                )
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
        options: &ExecutionOptions,
        quote: &FeeQuote,
    ) -> Result<TransactionHandle> {
        let dst_eid = endpoint_id(intent)?;
        let to = recipient_address(intent)?;
        let value = quote.amount();

        let tx_hash = self
            .contract()
            .send_layerzero(
                dst_eid,
                to,
                intent.amount(),
                intent.use_alternate_path(),
                options.extra_options().clone(),
                value,
            )
            .await
            .map_err(|e| send_error(self.kind(), &e, value, &UNDERFUNDED_SELECTORS))?;

        info!(
            tx_hash = %tx_hash,
            dst_eid = dst_eid,
            value = %value,
            event = "layerzero_send_submitted"
        );
        Ok(TransactionHandle::new(self.kind(), tx_hash))
    }
}
