// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Deployment constants for the supported testnets
//!
//! This module centralizes the bridge address, messaging protocol identifiers
//! and public RPC endpoints for every network the dispatcher knows about.

use alloy_primitives::{address, Address};

/// `AvUSDBridging` proxy, deployed at the same address on every supported testnet
pub const BRIDGE_ADDRESS: Address = address!("b6a98600a66C35985958C4DDA1599A4C15Ff9D70");

// LayerZero v2 endpoint ids

/// <https://docs.layerzero.network/v2/deployments/deployed-contracts?chains=arbitrum-sepolia>
pub const ARBITRUM_SEPOLIA_LZ_EID: u32 = 40231;

/// <https://docs.layerzero.network/v2/deployments/deployed-contracts?chains=avalanche-testnet>
pub const AVALANCHE_FUJI_LZ_EID: u32 = 40106;

/// <https://docs.layerzero.network/v2/deployments/deployed-contracts?chains=optimism-sepolia>
pub const OPTIMISM_SEPOLIA_LZ_EID: u32 = 40232;

// CCIP chain selectors

/// <https://docs.chain.link/ccip/directory/testnet/chain/ethereum-testnet-sepolia-arbitrum-1>
pub const ARBITRUM_SEPOLIA_CCIP_SELECTOR: u64 = 3478487238524512106;

/// <https://docs.chain.link/ccip/directory/testnet/chain/avalanche-fuji-testnet>
pub const AVALANCHE_FUJI_CCIP_SELECTOR: u64 = 14767482510784806043;

/// <https://docs.chain.link/ccip/directory/testnet/chain/ethereum-testnet-sepolia-optimism-1>
pub const OPTIMISM_SEPOLIA_CCIP_SELECTOR: u64 = 5224473277236331295;

// Public RPC endpoints

pub const ARBITRUM_SEPOLIA_RPC_URL: &str = "https://sepolia-rollup.arbitrum.io/rpc";
pub const AVALANCHE_FUJI_RPC_URL: &str = "https://api.avax-test.network/ext/bc/C/rpc";
pub const OPTIMISM_SEPOLIA_RPC_URL: &str = "https://sepolia.optimism.io";
