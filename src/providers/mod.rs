//! Production implementations of the dispatch trait abstractions.
//!
//! This module provides the "real" implementations of the traits defined in
//! [`crate::traits`] that read from an actual chain and the system clock. The
//! transport adapters live in [`crate::transport`].

mod alloy;
mod tokio_clock;

pub use self::alloy::AlloyReceiptSource;
pub use self::tokio_clock::TokioClock;
