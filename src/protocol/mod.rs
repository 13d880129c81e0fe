//! Dispatch protocol types
//!
//! The data that flows through one quote-then-send run: the caller's intent,
//! the per-transport execution options, the fee quote, and the terminal
//! receipt and result.

mod fee;
mod intent;
mod options;
mod receipt;
mod transport;

pub use fee::FeeQuote;
pub use intent::{DestinationId, DispatchIntent, Recipient};
pub use options::ExecutionOptions;
pub use receipt::{DispatchResult, Receipt, ReceiptStatus, TransactionHandle};
pub use transport::TransportKind;
