use alloy_primitives::U256;
use serde::Serialize;

use super::TransportKind;

/// Advisory fee for delivering one message, in the source chain's native token.
///
/// Not a commitment from the remote chain. The orchestrator spends it
/// immediately and never caches it across dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    transport: TransportKind,
    amount: U256,
    observed_at: u64,
}

impl FeeQuote {
    /// Creates a quote observed at the given source-chain block number.
    pub fn new(transport: TransportKind, amount: U256, observed_at: u64) -> Self {
        Self {
            transport,
            amount,
            observed_at,
        }
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    /// Source-chain block number at which the quote was read
    pub fn observed_at(&self) -> u64 {
        self.observed_at
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}
