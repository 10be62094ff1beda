//! Observable events for the plant care service
//!
//! Events are explicit and typed; every log line names exactly one.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration resolved from file, environment and flags
    ConfigLoaded,
    /// Document store answered the startup ping
    StoreConnected,
    /// Document store could not be reached at startup (FATAL)
    StoreConnectFailed,
    /// HTTP listener bound and serving
    Serving,
    /// Shutdown initiated
    ShutdownStart,
    /// Shutdown complete
    ShutdownComplete,

    // Requests
    /// HTTP request answered
    RequestComplete,

    // Record lifecycle
    /// Record inserted
    RecordCreated,
    /// Record mutable fields replaced
    RecordUpdated,
    /// Record removed
    RecordDeleted,
    /// Request rejected before reaching the store
    RecordRejected,

    // Failures
    /// Document store operation failed
    StoreFault,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "PLANTCARE_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::StoreConnectFailed => "STORE_CONNECT_FAILED",
            Event::Serving => "PLANTCARE_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::RequestComplete => "REQUEST_COMPLETE",

            Event::RecordCreated => "RECORD_CREATED",
            Event::RecordUpdated => "RECORD_UPDATED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::RecordRejected => "RECORD_REJECTED",

            Event::StoreFault => "STORE_FAULT",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
