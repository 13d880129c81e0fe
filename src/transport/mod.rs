//! Transport adapters
//!
//! One [`TransportAdapter`](crate::TransportAdapter) per messaging protocol,
//! both talking to the same `AvUSDBridging` contract:
//!
//! - [`LayerZeroAdapter`] serves [`TransportKind::Primary`]
//! - [`CcipAdapter`] serves [`TransportKind::Secondary`]
//!
//! Each adapter documents its own rule for telling an underfunded send from
//! any other rejection.

mod ccip;
mod layerzero;
#[cfg(test)]
mod mock_chain;

pub use ccip::CcipAdapter;
pub use layerzero::LayerZeroAdapter;

use alloy_primitives::{Address, U256};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error};

use crate::contracts::revert::{matches_selector, revert_data};
use crate::error::{DispatchError, Result};
use crate::protocol::{DispatchIntent, TransportKind};
use crate::spans;

/// The `AvUSDBridging` contract takes an EVM address as recipient.
pub(crate) fn recipient_address(intent: &DispatchIntent) -> Result<Address> {
    intent.recipient().as_address().ok_or_else(|| {
        DispatchError::invalid_intent(format!(
            "recipient {} is not representable as an EVM address",
            intent.recipient()
        ))
    })
}

/// Runs a fee view under `timeout`, mapping every failure to `QuoteUnavailable`.
pub(crate) async fn quote_within<T, F>(
    transport: TransportKind,
    timeout: Duration,
    call: F,
) -> Result<T>
where
    F: Future<Output = std::result::Result<T, alloy_contract::Error>>,
{
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            spans::record_error_with_context(
                "quote_unavailable",
                &format!("Fee view failed: {e}"),
                revert_data(&e)
                    .is_some()
                    .then_some("Fee view reverted"),
            );
            error!(error = %e, event = "fee_view_failed");
            Err(DispatchError::QuoteUnavailable {
                transport,
                reason: e.to_string(),
            })
        }
        Err(_) => {
            error!(
                timeout_secs = timeout.as_secs(),
                event = "fee_view_timed_out"
            );
            Err(DispatchError::QuoteUnavailable {
                transport,
                reason: format!("fee view timed out after {}s", timeout.as_secs()),
            })
        }
    }
}

/// Classifies a failed send.
///
/// Reverts whose selector is in `underfunded` become `SendUnderfunded`;
/// everything else is `SendRejected`.
pub(crate) fn send_error(
    transport: TransportKind,
    err: &alloy_contract::Error,
    attached: U256,
    underfunded: &[[u8; 4]],
) -> DispatchError {
    match revert_data(err) {
        Some(data) if matches_selector(&data, underfunded) => {
            debug!(
                attached = %attached,
                revert_data = %data,
                event = "send_underfunded"
            );
            DispatchError::SendUnderfunded {
                transport,
                attached,
            }
        }
        _ => {
            error!(error = %err, event = "send_rejected");
            DispatchError::SendRejected {
                transport,
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::bridging::{
        IAvUSDBridging::InsufficientFee, InsufficientFeeTokenAmount, LZ_InsufficientFee,
    };
    use super::mock_chain::revert_payload;
    use alloy_primitives::B256;
    use alloy_sol_types::SolError;
    use alloy_transport::TransportError;

    fn reverted_with(data: &[u8]) -> alloy_contract::Error {
        alloy_contract::Error::TransportError(TransportError::ErrorResp(revert_payload(data)))
    }

    #[test]
    fn test_underfunded_selector_maps_to_send_underfunded() {
        let mut data = LZ_InsufficientFee::SELECTOR.to_vec();
        data.extend_from_slice(&[0u8; 128]);
        let err = reverted_with(&data);

        let mapped = send_error(
            TransportKind::Primary,
            &err,
            U256::from(7),
            &[LZ_InsufficientFee::SELECTOR, InsufficientFee::SELECTOR],
        );

        assert_eq!(
            mapped,
            DispatchError::SendUnderfunded {
                transport: TransportKind::Primary,
                attached: U256::from(7),
            }
        );
    }

    #[test]
    fn test_other_revert_maps_to_send_rejected() {
        let err = reverted_with(&InsufficientFeeTokenAmount::SELECTOR);

        let mapped = send_error(
            TransportKind::Primary,
            &err,
            U256::from(7),
            &[LZ_InsufficientFee::SELECTOR, InsufficientFee::SELECTOR],
        );

        assert!(matches!(mapped, DispatchError::SendRejected { .. }));
    }

    #[test]
    fn test_non_revert_failure_maps_to_send_rejected() {
        let err = alloy_contract::Error::UnknownFunction("sendWithCCIP".into());

        let mapped = send_error(
            TransportKind::Secondary,
            &err,
            U256::from(1),
            &[InsufficientFeeTokenAmount::SELECTOR],
        );

        assert!(matches!(
            mapped,
            DispatchError::SendRejected {
                transport: TransportKind::Secondary,
                ..
            }
        ));
    }

    #[test]
    fn test_word_recipient_with_high_bytes_is_invalid_intent() {
        let intent = DispatchIntent::builder()
            .destination_id(40232u32)
            .recipient(B256::repeat_byte(0x11).into())
            .amount(U256::from(1))
            .build()
            .unwrap();

        assert!(matches!(
            recipient_address(&intent),
            Err(DispatchError::InvalidIntent { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_timeout_maps_to_quote_unavailable() {
        let never = std::future::pending::<std::result::Result<U256, alloy_contract::Error>>();

        let result = quote_within(TransportKind::Secondary, Duration::from_secs(30), never).await;

        assert!(matches!(
            result,
            Err(DispatchError::QuoteUnavailable {
                transport: TransportKind::Secondary,
                ..
            })
        ));
    }
}
