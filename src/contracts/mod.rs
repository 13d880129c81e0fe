//! Bridging contract bindings
//!
//! Alloy-generated bindings for the `AvUSDBridging` contract and the revert
//! errors the two messaging protocols raise when the attached fee is short.
//!
//! ## Public API
//!
//! - [`AvUsdBridgingContract`](bridging::AvUsdBridgingContract) - instrumented wrapper over the four fee/send entry points

pub mod bridging;
pub(crate) mod revert;
