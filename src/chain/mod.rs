//! Network registry for the avUSD bridge
//!
//! This module maps the supported testnets to the identifiers each messaging
//! protocol uses for them, plus the bridge deployment and RPC endpoint.

mod addresses;
mod registry;

pub use addresses::*;
pub use registry::AvUsdNetwork;
