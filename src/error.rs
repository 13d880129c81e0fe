use alloy_primitives::{TxHash, U256};
use std::time::Duration;
use thiserror::Error;

use crate::protocol::TransportKind;

/// Every way a single dispatch can fail.
///
/// All variants are terminal for the `dispatch` call that produced them. Only
/// [`DispatchError::SendUnderfunded`] is ever retried, and only once, by the
/// orchestrator itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Invalid intent: {reason}")]
    InvalidIntent { reason: String },

    #[error("Fee quote unavailable on {transport}: {reason}")]
    QuoteUnavailable {
        transport: TransportKind,
        reason: String,
    },

    #[error("Zero fee quoted on {transport}, route is not supported")]
    ZeroQuote { transport: TransportKind },

    #[error("Send rejected on {transport}: {reason}")]
    SendRejected {
        transport: TransportKind,
        reason: String,
    },

    #[error("Send underfunded on {transport}: attached {attached} was below the required fee")]
    SendUnderfunded {
        transport: TransportKind,
        attached: U256,
    },

    #[error("Timeout after {}s waiting for confirmation of {tx_hash}", timeout.as_secs())]
    ConfirmationTimeout { tx_hash: TxHash, timeout: Duration },
}

impl DispatchError {
    pub(crate) fn invalid_intent(reason: impl Into<String>) -> Self {
        Self::InvalidIntent {
            reason: reason.into(),
        }
    }

    /// Stable snake-case name of the variant, used as `error.type` in spans.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIntent { .. } => "invalid_intent",
            Self::QuoteUnavailable { .. } => "quote_unavailable",
            Self::ZeroQuote { .. } => "zero_quote",
            Self::SendRejected { .. } => "send_rejected",
            Self::SendUnderfunded { .. } => "send_underfunded",
            Self::ConfirmationTimeout { .. } => "confirmation_timeout",
        }
    }
}

/// A failed receipt lookup.
///
/// Treated as transient by the confirmation waiter, which keeps polling until
/// its deadline, so it never surfaces from `dispatch`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Receipt lookup failed: {0}")]
pub struct ReceiptLookupError(pub String);

/// Failures while assembling the network and account context for the CLI.
///
/// These never come out of `dispatch`; they stop the process before an
/// orchestrator exists.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Chain not supported: {chain}")]
    ChainNotSupported { chain: String },

    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid private key: {0}")]
    InvalidKey(#[from] alloy_signer_local::LocalSignerError),

    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds_are_distinct() {
        let errors = [
            DispatchError::invalid_intent("zero amount"),
            DispatchError::QuoteUnavailable {
                transport: TransportKind::Primary,
                reason: "reverted".into(),
            },
            DispatchError::ZeroQuote {
                transport: TransportKind::Secondary,
            },
            DispatchError::SendRejected {
                transport: TransportKind::Primary,
                reason: "reverted".into(),
            },
            DispatchError::SendUnderfunded {
                transport: TransportKind::Primary,
                attached: U256::from(1),
            },
            DispatchError::ConfirmationTimeout {
                tx_hash: TxHash::ZERO,
                timeout: Duration::from_secs(5),
            },
        ];

        let mut kinds: Vec<_> = errors.iter().map(DispatchError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), 6);
    }

    #[test]
    fn test_error_display() {
        let err = DispatchError::ZeroQuote {
            transport: TransportKind::Secondary,
        };
        insta::assert_snapshot!(err.to_string(), @"Zero fee quoted on secondary (ccip), route is not supported");

        let err = DispatchError::ConfirmationTimeout {
            tx_hash: TxHash::ZERO,
            timeout: Duration::from_secs(90),
        };
        insta::assert_snapshot!(err.to_string(), @"Timeout after 90s waiting for confirmation of 0x0000000000000000000000000000000000000000000000000000000000000000");
    }
}
