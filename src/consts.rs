pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains all configuration constants for the dashboard client,
    //! organized by functional area for clarity and maintainability.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of event buffer size for worker tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // REFRESH CONFIGURATION
    // =============================================================================

    /// Customer list polling and post-action refresh timing
    pub mod refresh {
        use std::time::Duration;

        /// Interval between customer list polls (seconds)
        pub const POLL_INTERVAL_SECS: u64 = 30;

        /// Delay between an accepted call and the follow-up list refresh (milliseconds)
        pub const CALL_REFRESH_DELAY_MS: u64 = 2_000;

        /// Helper function to get the poll interval
        pub const fn poll_interval() -> Duration {
            Duration::from_secs(POLL_INTERVAL_SECS)
        }

        /// Helper function to get the post-call refresh delay
        pub const fn call_refresh_delay() -> Duration {
            Duration::from_millis(CALL_REFRESH_DELAY_MS)
        }
    }

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client timing
    pub mod http {
        use std::time::Duration;

        /// TCP connect timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // USER-FACING FALLBACK MESSAGES
    // =============================================================================

    /// Shown when a call fails and the backend supplied no reason.
    pub const GENERIC_CALL_ERROR: &str = "Unknown error occurred";

    /// Shown when a create/update/delete fails without a `detail` message.
    pub const GENERIC_MUTATION_ERROR: &str = "Request failed. Please try again.";

    /// Placeholder for customers that have never been contacted.
    pub const NO_ACTIVITY_LABEL: &str = "Never";
}
