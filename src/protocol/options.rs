use alloy_primitives::{Bytes, U256};

use super::TransportKind;

/// Protocol-specific execution parameters for one dispatch.
///
/// Built by [`OptionsBuilder`](crate::OptionsBuilder) and never reused across
/// transports. The orchestrator only ever touches `native_value`, which it
/// sets from the fee quote right before sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOptions {
    transport: TransportKind,
    gas_limit: u128,
    native_value: U256,
    extra_options: Bytes,
}

impl ExecutionOptions {
    pub(crate) fn new(transport: TransportKind, gas_limit: u128, extra_options: Bytes) -> Self {
        Self {
            transport,
            gas_limit,
            native_value: U256::ZERO,
            extra_options,
        }
    }

    /// The transport these options were built for
    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    /// Gas made available to the message on the destination chain
    pub fn gas_limit(&self) -> u128 {
        self.gas_limit
    }

    /// Value attached to the source transaction
    pub fn native_value(&self) -> U256 {
        self.native_value
    }

    /// Encoded protocol extension, empty when the transport takes none
    pub fn extra_options(&self) -> &Bytes {
        &self.extra_options
    }

    /// Returns a copy carrying `value` as the attached transaction value.
    pub fn with_native_value(&self, value: U256) -> Self {
        Self {
            native_value: value,
            ..self.clone()
        }
    }
}
