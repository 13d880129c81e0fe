use alloy_primitives::TxHash;
use serde::Serialize;
use std::fmt;

use super::{FeeQuote, TransportKind};

/// Identifies a submitted transaction.
///
/// Handles are `Copy` and stay valid after a confirmation timeout, so the
/// same handle can be waited on again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionHandle {
    transport: TransportKind,
    tx_hash: TxHash,
}

impl TransactionHandle {
    pub fn new(transport: TransportKind, tx_hash: TxHash) -> Self {
        Self { transport, tx_hash }
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }
}

/// Terminal status of a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptStatus::Success => write!(f, "success"),
            ReceiptStatus::Reverted => write!(f, "reverted"),
        }
    }
}

/// Terminal outcome of a submitted transaction.
///
/// A reverted transaction is still a receipt; reversion is reported, not
/// raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub status: ReceiptStatus,
    pub block_number: u64,
    pub tx_hash: TxHash,
}

impl Receipt {
    pub fn is_success(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}

/// The artifact of one completed dispatch.
///
/// Only produced once a terminal receipt exists. `quote` is the quote whose
/// amount was attached to the transaction that produced `receipt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    pub transport: TransportKind,
    pub quote: FeeQuote,
    pub receipt: Receipt,
}
