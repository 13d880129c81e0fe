use std::time::Duration;

/// Default time allowed for a dispatched transaction to reach a receipt
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 180;

/// Default delay between receipt lookups
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;

/// Default bound on a single fee view call
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Configuration for confirmation waiting.
///
/// Controls how long the orchestrator waits for a dispatched transaction and
/// how often it asks for the receipt. Use the builder methods to customize, or
/// the preset for fast-finality chains.
///
/// # Examples
///
/// ```rust
/// use avusd_dispatch::ConfirmationConfig;
///
/// // Use defaults (180 second timeout, 3 second intervals)
/// let config = ConfirmationConfig::default();
///
/// // Customize waiting behavior
/// let config = ConfirmationConfig::default()
///     .with_timeout_secs(600)
///     .with_poll_interval_secs(10);
///
/// // Use preset for rollups with sub-second blocks (60 second timeout, 1 second intervals)
/// let config = ConfirmationConfig::fast();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationConfig {
    /// Seconds to wait for a terminal receipt before giving up.
    pub timeout_secs: u64,
    /// Seconds to wait between receipt lookups.
    pub poll_interval_secs: u64,
}

impl Default for ConfirmationConfig {
    /// Creates a configuration suitable for testnets with multi-second blocks.
    ///
    /// - `timeout_secs`: 180
    /// - `poll_interval_secs`: 3
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl ConfirmationConfig {
    /// Creates a configuration for chains with fast block times.
    ///
    /// - `timeout_secs`: 60
    /// - `poll_interval_secs`: 1
    pub fn fast() -> Self {
        Self {
            timeout_secs: 60,
            poll_interval_secs: 1,
        }
    }

    /// Sets the confirmation timeout in seconds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use avusd_dispatch::ConfirmationConfig;
    ///
    /// let config = ConfirmationConfig::default().with_timeout_secs(600);
    /// assert_eq!(config.timeout_secs, 600);
    /// ```
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Sets the interval between receipt lookups in seconds.
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
