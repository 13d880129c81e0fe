//! Alloy-based receipt source implementation.

use alloy_network::{Ethereum, ReceiptResponse};
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use crate::error::ReceiptLookupError;
use crate::protocol::{Receipt, ReceiptStatus};
use crate::traits::ReceiptSource;

/// Production receipt source wrapping Alloy's [`Provider`] trait.
///
/// Reads receipts from the source chain, where both transports submit their
/// transactions, and reduces them to the success flag and block number the
/// dispatch result reports.
///
/// # Examples
///
/// ```rust,no_run
/// use avusd_dispatch::providers::AlloyReceiptSource;
/// use alloy_provider::ProviderBuilder;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect_http("https://sepolia.optimism.io".parse()?);
///
/// let receipts = AlloyReceiptSource::new(provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlloyReceiptSource<P>
where
    P: Provider<Ethereum> + Clone,
{
    provider: P,
}

impl<P> AlloyReceiptSource<P>
where
    P: Provider<Ethereum> + Clone,
{
    /// Creates a new [`AlloyReceiptSource`] wrapping the given Alloy provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the underlying Alloy provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

/// Reduces a node receipt to what the dispatch result carries.
fn to_receipt<R: ReceiptResponse>(tx_hash: TxHash, response: &R) -> Receipt {
    Receipt {
        status: if response.status() {
            ReceiptStatus::Success
        } else {
            ReceiptStatus::Reverted
        },
        block_number: response.block_number().unwrap_or_default(),
        tx_hash,
    }
}

#[async_trait]
impl<P> ReceiptSource for AlloyReceiptSource<P>
where
    P: Provider<Ethereum> + Clone + Send + Sync,
{
    #[instrument(skip(self), fields(tx_hash = %tx_hash))]
    async fn get_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>, ReceiptLookupError> {
        trace!("Fetching transaction receipt");
        let response = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ReceiptLookupError(e.to_string()))?;

        match response {
            Some(response) => {
                let receipt = to_receipt(tx_hash, &response);
                debug!(
                    status = %receipt.status,
                    block_number = receipt.block_number,
                    "Transaction receipt found"
                );
                Ok(Some(receipt))
            }
            None => {
                debug!("Transaction receipt not found");
                Ok(None)
            }
        }
    }
}
