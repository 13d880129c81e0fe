use alloy_chains::NamedChain;
use alloy_primitives::Address;
use url::Url;

use super::addresses::{
    ARBITRUM_SEPOLIA_CCIP_SELECTOR, ARBITRUM_SEPOLIA_LZ_EID, ARBITRUM_SEPOLIA_RPC_URL,
    AVALANCHE_FUJI_CCIP_SELECTOR, AVALANCHE_FUJI_LZ_EID, AVALANCHE_FUJI_RPC_URL, BRIDGE_ADDRESS,
    OPTIMISM_SEPOLIA_CCIP_SELECTOR, OPTIMISM_SEPOLIA_LZ_EID, OPTIMISM_SEPOLIA_RPC_URL,
};
use crate::error::ConfigError;
use crate::protocol::{DestinationId, TransportKind};

/// Trait for chains the avUSD bridge is deployed on
pub trait AvUsdNetwork {
    /// The LayerZero v2 endpoint id of the chain
    fn layerzero_eid(&self) -> Result<u32, ConfigError>;
    /// The CCIP chain selector of the chain
    fn ccip_chain_selector(&self) -> Result<u64, ConfigError>;
    /// The address of the `AvUSDBridging` contract on the chain
    fn bridge_address(&self) -> Result<Address, ConfigError>;
    /// The public RPC endpoint used when no override is set
    fn default_rpc_url(&self) -> Result<&'static str, ConfigError>;
    /// Environment variable that overrides [`default_rpc_url`](Self::default_rpc_url)
    fn rpc_env_var(&self) -> Result<&'static str, ConfigError>;

    /// How `transport` addresses this chain as a destination
    fn destination_id(&self, transport: TransportKind) -> Result<DestinationId, ConfigError> {
        match transport {
            TransportKind::Primary => self.layerzero_eid().map(DestinationId::from),
            TransportKind::Secondary => self.ccip_chain_selector().map(DestinationId::from),
        }
    }

    /// RPC endpoint from the environment override, falling back to the default
    fn rpc_url(&self) -> Result<Url, ConfigError> {
        let url = match std::env::var(self.rpc_env_var()?) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.default_rpc_url()?.to_string(),
        };
        Ok(url.parse()?)
    }
}

fn unsupported(chain: &NamedChain) -> ConfigError {
    ConfigError::ChainNotSupported {
        chain: chain.to_string(),
    }
}

impl AvUsdNetwork for NamedChain {
    fn layerzero_eid(&self) -> Result<u32, ConfigError> {
        use NamedChain::*;

        match self {
            ArbitrumSepolia => Ok(ARBITRUM_SEPOLIA_LZ_EID),
            AvalancheFuji => Ok(AVALANCHE_FUJI_LZ_EID),
            OptimismSepolia => Ok(OPTIMISM_SEPOLIA_LZ_EID),
            _ => Err(unsupported(self)),
        }
    }

    fn ccip_chain_selector(&self) -> Result<u64, ConfigError> {
        use NamedChain::*;

        match self {
            ArbitrumSepolia => Ok(ARBITRUM_SEPOLIA_CCIP_SELECTOR),
            AvalancheFuji => Ok(AVALANCHE_FUJI_CCIP_SELECTOR),
            OptimismSepolia => Ok(OPTIMISM_SEPOLIA_CCIP_SELECTOR),
            _ => Err(unsupported(self)),
        }
    }

    fn bridge_address(&self) -> Result<Address, ConfigError> {
        use NamedChain::*;

        match self {
            ArbitrumSepolia | AvalancheFuji | OptimismSepolia => Ok(BRIDGE_ADDRESS),
            _ => Err(unsupported(self)),
        }
    }

    fn default_rpc_url(&self) -> Result<&'static str, ConfigError> {
        use NamedChain::*;

        match self {
            ArbitrumSepolia => Ok(ARBITRUM_SEPOLIA_RPC_URL),
            AvalancheFuji => Ok(AVALANCHE_FUJI_RPC_URL),
            OptimismSepolia => Ok(OPTIMISM_SEPOLIA_RPC_URL),
            _ => Err(unsupported(self)),
        }
    }

    fn rpc_env_var(&self) -> Result<&'static str, ConfigError> {
        use NamedChain::*;

        match self {
            ArbitrumSepolia => Ok("ARBITRUM_SEPOLIA_RPC_URL"),
            AvalancheFuji => Ok("AVALANCHE_FUJI_RPC_URL"),
            OptimismSepolia => Ok("OPTIMISM_SEPOLIA_RPC_URL"),
            _ => Err(unsupported(self)),
        }
    }
}
