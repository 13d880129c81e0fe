//! # avusd-dispatch
//!
//! Quote-then-send dispatch of avUSD transfers through the `AvUSDBridging`
//! contract, over either of two cross-chain messaging protocols.
//!
//! A dispatch builds protocol-specific execution options, asks the chosen
//! transport for a fresh fee quote, submits the transfer with exactly the
//! quoted fee attached, and waits for the source transaction's receipt. An
//! underfunded send is re-quoted and retried once.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use avusd_dispatch::providers::{AlloyReceiptSource, TokioClock};
//! use avusd_dispatch::{
//!     AvUsdNetwork, BridgeOrchestrator, CcipAdapter, DispatchIntent, LayerZeroAdapter,
//!     TransportKind, BRIDGE_ADDRESS,
//! };
//! use alloy_chains::NamedChain;
//! use alloy_primitives::{address, U256};
//! use alloy_provider::ProviderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect_http("https://sepolia-rollup.arbitrum.io/rpc".parse()?);
//!
//! let orchestrator = BridgeOrchestrator::builder()
//!     .primary(
//!         LayerZeroAdapter::builder()
//!             .provider(provider.clone())
//!             .bridge_address(BRIDGE_ADDRESS)
//!             .build(),
//!     )
//!     .secondary(
//!         CcipAdapter::builder()
//!             .provider(provider.clone())
//!             .bridge_address(BRIDGE_ADDRESS)
//!             .build(),
//!     )
//!     .receipt_source(AlloyReceiptSource::new(provider))
//!     .clock(TokioClock::new())
//!     .build();
//!
//! let intent = DispatchIntent::builder()
//!     .destination_id(NamedChain::OptimismSepolia.destination_id(TransportKind::Secondary)?)
//!     .recipient(address!("19596e1D6cd97916514B5DBaA4730781eFE49975").into())
//!     .amount(U256::from(25) * U256::from(10).pow(U256::from(18)))
//!     .use_alternate_path(true)
//!     .build()?;
//!
//! let result = orchestrator.dispatch(&intent, TransportKind::Secondary).await?;
//! println!("fee: {}", result.quote.amount());
//! println!("Done: {}", result.receipt.tx_hash);
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`BridgeOrchestrator`] - Runs one quote-then-send-then-confirm lifecycle per call
//! - [`TransportAdapter`] - One implementation per protocol: [`LayerZeroAdapter`], [`CcipAdapter`]
//! - [`OptionsBuilder`] - Pure construction of [`ExecutionOptions`]
//! - [`ConfirmationWaiter`] and [`ConfirmationConfig`] - Receipt polling with a deadline
//! - [`AvUsdNetwork`] - Per-network protocol identifiers, bridge address and RPC endpoint
//! - [`DispatchError`] and [`Result`] - Error types for error handling
//! - [`testing`] - Scripted fakes for every trait

mod bridge;
mod chain;
mod contracts;
mod error;
mod protocol;
mod traits;
mod transport;

pub use bridge::{
    executor_lz_receive_option, BridgeOrchestrator, ConfirmationConfig, ConfirmationWaiter,
    OptionsBuilder, DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_CONFIRMATION_TIMEOUT_SECS,
    DEFAULT_POLL_INTERVAL_SECS, MAX_SEND_ATTEMPTS, PRIMARY_GAS_LIMIT, SECONDARY_GAS_LIMIT,
};
pub use chain::{
    AvUsdNetwork, ARBITRUM_SEPOLIA_CCIP_SELECTOR, ARBITRUM_SEPOLIA_LZ_EID,
    AVALANCHE_FUJI_CCIP_SELECTOR, AVALANCHE_FUJI_LZ_EID, BRIDGE_ADDRESS,
    OPTIMISM_SEPOLIA_CCIP_SELECTOR, OPTIMISM_SEPOLIA_LZ_EID,
};
pub use contracts::bridging::AvUsdBridgingContract;
pub use error::{ConfigError, DispatchError, ReceiptLookupError, Result};
pub use protocol::{
    DestinationId, DispatchIntent, DispatchResult, ExecutionOptions, FeeQuote, Receipt,
    ReceiptStatus, Recipient, TransactionHandle, TransportKind,
};
pub use traits::{Clock, ReceiptSource, TransportAdapter};
pub use transport::{CcipAdapter, LayerZeroAdapter};

/// Production implementations of [`ReceiptSource`] and [`Clock`]
pub mod providers;

// Public module for advanced users who need custom instrumentation
pub mod spans;

/// Scripted fakes for tests and dry runs
pub mod testing;
