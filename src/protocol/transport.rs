//! Transport selection
//!
//! The caller picks one of two messaging protocols per dispatch. The
//! orchestrator only uses the kind to select an adapter; everything
//! protocol-specific stays behind the adapter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which underlying cross-chain messaging protocol carries a dispatch.
///
/// # Example
///
/// ```rust
/// use avusd_dispatch::TransportKind;
///
/// let kind: TransportKind = "ccip".parse().unwrap();
/// assert_eq!(kind, TransportKind::Secondary);
/// assert_eq!(kind.protocol_name(), "ccip");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// LayerZero v2, destinations addressed by a `uint32` endpoint id.
    Primary,
    /// Chainlink CCIP, destinations addressed by a `uint64` chain selector.
    Secondary,
}

impl TransportKind {
    pub const ALL: [TransportKind; 2] = [TransportKind::Primary, TransportKind::Secondary];

    /// Short protocol name used in logs and CLI output
    pub const fn protocol_name(self) -> &'static str {
        match self {
            TransportKind::Primary => "layerzero",
            TransportKind::Secondary => "ccip",
        }
    }

    /// Largest destination identifier the protocol can address
    pub const fn max_destination_id(self) -> u64 {
        match self {
            TransportKind::Primary => u32::MAX as u64,
            TransportKind::Secondary => u64::MAX,
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::Primary => write!(f, "primary ({})", self.protocol_name()),
            TransportKind::Secondary => write!(f, "secondary ({})", self.protocol_name()),
        }
    }
}

impl FromStr for TransportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primary" | "layerzero" | "lz" => Ok(TransportKind::Primary),
            "secondary" | "ccip" => Ok(TransportKind::Secondary),
            other => Err(format!(
                "unknown transport '{other}', expected primary|layerzero or secondary|ccip"
            )),
        }
    }
}
