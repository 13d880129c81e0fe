// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0
//! Quote-then-send orchestration
//!
//! This module provides the transport-agnostic lifecycle: option building,
//! the orchestrator that quotes, sends and confirms, and the confirmation
//! waiter it hands submitted transactions to.

mod config;
mod options;
mod orchestrator;
mod waiter;

pub use config::{
    ConfirmationConfig, DEFAULT_CALL_TIMEOUT_SECS, DEFAULT_CONFIRMATION_TIMEOUT_SECS,
    DEFAULT_POLL_INTERVAL_SECS,
};
pub use options::{
    executor_lz_receive_option, OptionsBuilder, PRIMARY_GAS_LIMIT, SECONDARY_GAS_LIMIT,
};
pub use orchestrator::{BridgeOrchestrator, MAX_SEND_ATTEMPTS};
pub use waiter::ConfirmationWaiter;
