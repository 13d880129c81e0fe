use alloy_primitives::Bytes;

use crate::error::{DispatchError, Result};
use crate::protocol::{DispatchIntent, ExecutionOptions, TransportKind};

/// Destination gas made available to `lzReceive` on LayerZero routes
pub const PRIMARY_GAS_LIMIT: u128 = 2_000_000;

/// Destination gas made available to `ccipReceive` on CCIP routes
pub const SECONDARY_GAS_LIMIT: u128 = 200_000;

const OPTIONS_TYPE_3: u16 = 3;
const EXECUTOR_WORKER_ID: u8 = 1;
const OPTION_TYPE_LZ_RECEIVE: u8 = 1;

/// Builds per-transport [`ExecutionOptions`] from an intent.
///
/// Pure: the same intent and transport always produce equal options. Gas is
/// a flat per-transport baseline, never estimated, and `native_value` always
/// starts at zero because the value to attach comes from the fee quote.
///
/// # Example
///
/// ```rust
/// use avusd_dispatch::{DispatchIntent, OptionsBuilder, Recipient, TransportKind};
/// use alloy_primitives::{address, U256};
///
/// let intent = DispatchIntent::builder()
///     .destination_id(40232u32)
///     .recipient(Recipient::from(address!("19596e1D6cd97916514B5DBaA4730781eFE49975")))
///     .amount(U256::from(1))
///     .build()
///     .unwrap();
///
/// let options = OptionsBuilder::build(&intent, TransportKind::Primary).unwrap();
/// assert_eq!(options.gas_limit(), 2_000_000);
/// assert!(options.native_value().is_zero());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsBuilder;

impl OptionsBuilder {
    /// Builds options for `intent` on `transport`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIntent` if the amount is zero or the destination id is
    /// wider than the transport can address.
    pub fn build(intent: &DispatchIntent, transport: TransportKind) -> Result<ExecutionOptions> {
        if intent.amount().is_zero() {
            return Err(DispatchError::invalid_intent(
                "amount must be greater than zero",
            ));
        }

        let destination = intent.destination_id();
        if destination.as_u64() > transport.max_destination_id() {
            return Err(DispatchError::invalid_intent(format!(
                "destination id {destination} does not fit the {} destination width",
                transport.protocol_name()
            )));
        }

        let options = match transport {
            TransportKind::Primary => ExecutionOptions::new(
                transport,
                PRIMARY_GAS_LIMIT,
                executor_lz_receive_option(PRIMARY_GAS_LIMIT, 0),
            ),
            TransportKind::Secondary => {
                ExecutionOptions::new(transport, SECONDARY_GAS_LIMIT, Bytes::new())
            }
        };

        Ok(options)
    }
}

/// Encodes a LayerZero v2 type-3 options blob carrying a single executor
/// `lzReceive` option.
///
/// Layout: `u16 type | u8 worker id | u16 size | u8 option type | u128 gas
/// [| u128 value]`. The value is omitted when zero.
pub fn executor_lz_receive_option(gas: u128, value: u128) -> Bytes {
    let mut option = Vec::with_capacity(32);
    option.extend_from_slice(&gas.to_be_bytes());
    if value > 0 {
        option.extend_from_slice(&value.to_be_bytes());
    }

    // size counts the option type byte plus the option payload
    let size = (option.len() + 1) as u16;

    let mut encoded = Vec::with_capacity(6 + option.len());
    encoded.extend_from_slice(&OPTIONS_TYPE_3.to_be_bytes());
    encoded.push(EXECUTOR_WORKER_ID);
    encoded.extend_from_slice(&size.to_be_bytes());
    encoded.push(OPTION_TYPE_LZ_RECEIVE);
    encoded.extend_from_slice(&option);
    encoded.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{DestinationId, Recipient};
    use alloy_primitives::{address, hex, U256};
    use rstest::rstest;

    fn intent(destination_id: u64) -> DispatchIntent {
        DispatchIntent::builder()
            .destination_id(DestinationId::new(destination_id))
            .recipient(Recipient::from(address!(
                "19596e1D6cd97916514B5DBaA4730781eFE49975"
            )))
            .amount(U256::from(25u64) * U256::from(10u64).pow(U256::from(18u64)))
            .use_alternate_path(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_primary_options_match_known_encoding() {
        let options = OptionsBuilder::build(&intent(40232), TransportKind::Primary).unwrap();

        insta::assert_snapshot!(
            hex::encode_prefixed(options.extra_options()),
            @"0x000301001101000000000000000000000000001e8480"
        );
    }

    #[test]
    fn test_secondary_options_have_no_extension() {
        let options = OptionsBuilder::build(
            &intent(5_224_473_277_236_331_295),
            TransportKind::Secondary,
        )
        .unwrap();

        assert_eq!(options.transport(), TransportKind::Secondary);
        assert_eq!(options.gas_limit(), SECONDARY_GAS_LIMIT);
        assert!(options.extra_options().is_empty());
    }

    #[rstest]
    #[case(TransportKind::Primary, 40232)]
    #[case(TransportKind::Secondary, 5_224_473_277_236_331_295)]
    fn test_build_is_pure(#[case] transport: TransportKind, #[case] destination: u64) {
        let intent = intent(destination);
        let first = OptionsBuilder::build(&intent, transport).unwrap();
        let second = OptionsBuilder::build(&intent, transport).unwrap();

        assert_eq!(first, second);
        assert!(first.gas_limit() > 0);
        assert!(first.native_value().is_zero());
    }

    #[test]
    fn test_primary_rejects_destination_wider_than_u32() {
        let result = OptionsBuilder::build(
            &intent(5_224_473_277_236_331_295),
            TransportKind::Primary,
        );

        assert!(matches!(result, Err(DispatchError::InvalidIntent { .. })));
    }

    #[test]
    fn test_lz_receive_option_with_value() {
        let encoded = executor_lz_receive_option(200_000, 1);

        insta::assert_snapshot!(
            hex::encode_prefixed(&encoded),
            @"0x00030100210100000000000000000000000000030d4000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_with_native_value_leaves_other_fields() {
        let options = OptionsBuilder::build(&intent(40232), TransportKind::Primary).unwrap();
        let funded = options.with_native_value(U256::from(42));

        assert_eq!(funded.native_value(), U256::from(42));
        assert_eq!(funded.gas_limit(), options.gas_limit());
        assert_eq!(funded.extra_options(), options.extra_options());
        assert!(options.native_value().is_zero());
    }
}
