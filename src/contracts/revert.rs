//! Revert data inspection
//!
//! Adapters decide which reverts mean "attached fee too low" by matching the
//! 4-byte error selector at the head of the revert data against their own
//! list.

use alloy_primitives::Bytes;
use alloy_transport::TransportError;

/// Extracts ABI revert data from a failed contract call, if the node returned any.
pub(crate) fn revert_data(err: &alloy_contract::Error) -> Option<Bytes> {
    match err {
        alloy_contract::Error::TransportError(e) => transport_revert_data(e),
        _ => None,
    }
}

fn transport_revert_data(err: &TransportError) -> Option<Bytes> {
    err.as_error_resp()
        .and_then(|payload| payload.as_revert_data())
}

/// Returns true if `data` starts with any of `selectors`.
pub(crate) fn matches_selector(data: &[u8], selectors: &[[u8; 4]]) -> bool {
    data.get(..4)
        .is_some_and(|head| selectors.iter().any(|selector| head == selector.as_slice()))
}
