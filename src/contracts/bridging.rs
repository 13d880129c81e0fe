//! AvUSDBridging contract bindings and wrapper
//!
//! The contract exposes one fee view and one payable send per messaging
//! protocol. Both pairs take the same leading parameters; the LayerZero pair
//! additionally takes encoded executor options.

use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use tracing::debug;
use IAvUSDBridging::IAvUSDBridgingInstance;

sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IAvUSDBridging {
        error InsufficientFee(uint256 required, uint256 provided);

        function quoteSendFeeWithLayerzero(
            uint32 dstEid,
            address to,
            uint256 amount,
            bool useAlternatePath,
            bytes calldata options
        ) external view returns (uint256 nativeFee);

        function sendWithLayerzero(
            uint32 dstEid,
            address to,
            uint256 amount,
            bool useAlternatePath,
            bytes calldata options
        ) external payable;

        function quoteSendFeeWithCCIP(
            uint64 destinationChainSelector,
            address to,
            uint256 amount,
            bool useAlternatePath
        ) external view returns (uint256 fee);

        function sendWithCCIP(
            uint64 destinationChainSelector,
            address to,
            uint256 amount,
            bool useAlternatePath
        ) external payable;
    }
);

sol!(
    #[allow(missing_docs)]
    error LZ_InsufficientFee(
        uint256 requiredNative,
        uint256 suppliedNative,
        uint256 requiredLzToken,
        uint256 suppliedLzToken
    );

    #[allow(missing_docs)]
    error InsufficientFeeTokenAmount();
);

/// The AvUSDBridging contract wrapper
///
/// Stateless: adapters build one per call from a cloned provider and drop it
/// when the call returns.
pub struct AvUsdBridgingContract<P: Provider<Ethereum>> {
    instance: IAvUSDBridgingInstance<P>,
}

impl<P: Provider<Ethereum>> AvUsdBridgingContract<P> {
    /// Create a new AvUsdBridgingContract.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "bridging_contract_initialized"
        );
        Self {
            instance: IAvUSDBridgingInstance::new(address, provider),
        }
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Current block number of the chain the contract lives on
    pub async fn block_number(&self) -> Result<u64, alloy_contract::Error> {
        Ok(self.instance.provider().get_block_number().await?)
    }

    /// Calls `quoteSendFeeWithLayerzero`.
    pub async fn quote_layerzero(
        &self,
        dst_eid: u32,
        to: Address,
        amount: U256,
        use_alternate_path: bool,
        options: Bytes,
    ) -> Result<U256, alloy_contract::Error> {
        self.instance
            .quoteSendFeeWithLayerzero(dst_eid, to, amount, use_alternate_path, options)
            .call()
            .await
    }

    /// Submits `sendWithLayerzero` with `value` attached.
    pub async fn send_layerzero(
        &self,
        dst_eid: u32,
        to: Address,
        amount: U256,
        use_alternate_path: bool,
        options: Bytes,
        value: U256,
    ) -> Result<TxHash, alloy_contract::Error> {
        let pending = self
            .instance
            .sendWithLayerzero(dst_eid, to, amount, use_alternate_path, options)
            .value(value)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }

    /// Calls `quoteSendFeeWithCCIP`.
    pub async fn quote_ccip(
        &self,
        chain_selector: u64,
        to: Address,
        amount: U256,
        use_alternate_path: bool,
    ) -> Result<U256, alloy_contract::Error> {
        self.instance
            .quoteSendFeeWithCCIP(chain_selector, to, amount, use_alternate_path)
            .call()
            .await
    }

    /// Submits `sendWithCCIP` with `value` attached.
    pub async fn send_ccip(
        &self,
        chain_selector: u64,
        to: Address,
        amount: U256,
        use_alternate_path: bool,
        value: U256,
    ) -> Result<TxHash, alloy_contract::Error> {
        let pending = self
            .instance
            .sendWithCCIP(chain_selector, to, amount, use_alternate_path)
            .value(value)
            .send()
            .await?;
        Ok(*pending.tx_hash())
    }
}
