use alloy_primitives::{hex, Address, B256, U256};
use bon::bon;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DispatchError, Result};

/// Opaque destination chain identifier.
///
/// Its meaning depends on the transport: a LayerZero endpoint id for
/// [`TransportKind::Primary`](crate::TransportKind::Primary), a CCIP chain
/// selector for [`TransportKind::Secondary`](crate::TransportKind::Secondary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(u64);

impl DestinationId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for DestinationId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<u32> for DestinationId {
    fn from(id: u32) -> Self {
        Self(id as u64)
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recipient of the bridged amount on the destination chain.
///
/// Either a 20-byte EVM address or a 32-byte word. Any other length is
/// rejected when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipient {
    Address(Address),
    Word(B256),
}

impl Recipient {
    /// Returns the recipient as an EVM address, if it can be represented as one.
    ///
    /// A 32-byte word qualifies only when its upper 12 bytes are zero.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Recipient::Address(address) => Some(*address),
            Recipient::Word(word) if word[..12].iter().all(|b| *b == 0) => {
                Some(Address::from_word(*word))
            }
            Recipient::Word(_) => None,
        }
    }

    /// Length of the recipient in bytes
    pub fn byte_len(&self) -> usize {
        match self {
            Recipient::Address(_) => 20,
            Recipient::Word(_) => 32,
        }
    }
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Recipient::Address(address)
    }
}

impl From<B256> for Recipient {
    fn from(word: B256) -> Self {
        Recipient::Word(word)
    }
}

impl TryFrom<&[u8]> for Recipient {
    type Error = DispatchError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            20 => Ok(Recipient::Address(Address::from_slice(bytes))),
            32 => Ok(Recipient::Word(B256::from_slice(bytes))),
            len => Err(DispatchError::invalid_intent(format!(
                "recipient must be 20 or 32 bytes, got {len}"
            ))),
        }
    }
}

impl FromStr for Recipient {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)
            .map_err(|e| DispatchError::invalid_intent(format!("recipient is not hex: {e}")))?;
        Recipient::try_from(bytes.as_slice())
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Address(address) => write!(f, "{address}"),
            Recipient::Word(word) => write!(f, "{word}"),
        }
    }
}

/// What to send and where, for a single dispatch.
///
/// Immutable once built. The builder rejects a zero amount, so every
/// `DispatchIntent` in circulation has already passed validation.
///
/// # Example
///
/// ```rust
/// use avusd_dispatch::{DispatchIntent, Recipient};
/// use alloy_primitives::{address, U256};
///
/// let intent = DispatchIntent::builder()
///     .destination_id(40232u32)
///     .recipient(Recipient::from(address!("19596e1D6cd97916514B5DBaA4730781eFE49975")))
///     .amount(U256::from(25_000_000_000_000_000_000u128))
///     .use_alternate_path(true)
///     .build()
///     .unwrap();
/// assert_eq!(intent.destination_id().as_u64(), 40232);
///
/// let zero = DispatchIntent::builder()
///     .destination_id(40232u32)
///     .recipient(Recipient::from(address!("19596e1D6cd97916514B5DBaA4730781eFE49975")))
///     .amount(U256::ZERO)
///     .build();
/// assert!(zero.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchIntent {
    destination_id: DestinationId,
    recipient: Recipient,
    amount: U256,
    use_alternate_path: bool,
}

#[bon]
impl DispatchIntent {
    #[builder]
    pub fn new(
        #[builder(into)] destination_id: DestinationId,
        recipient: Recipient,
        amount: U256,
        #[builder(default)] use_alternate_path: bool,
    ) -> Result<Self> {
        let intent = Self {
            destination_id,
            recipient,
            amount,
            use_alternate_path,
        };
        intent.validate()?;
        Ok(intent)
    }
}

impl DispatchIntent {
    pub fn destination_id(&self) -> DestinationId {
        self.destination_id
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }

    pub fn use_alternate_path(&self) -> bool {
        self.use_alternate_path
    }

    /// Checks the local well-formedness rules. Never touches the network.
    ///
    /// Recipient length is already enforced by [`Recipient`] itself.
    pub fn validate(&self) -> Result<()> {
        if self.amount.is_zero() {
            return Err(DispatchError::invalid_intent(
                "amount must be greater than zero",
            ));
        }
        Ok(())
    }
}
