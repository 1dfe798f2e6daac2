//! Crate error taxonomy.
//!
//! Per-device failures are contained at the device boundary: a mouse or
//! joystick that fails to open is degraded to absent, a transient read
//! failure leaves the last snapshot in place. Only system-level failures
//! (no usable keyboard, a dead device-list query) surface to the caller.

use thiserror::Error;

/// Errors reported by an [`InputDriver`](crate::driver::InputDriver)
/// implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The addressed device is not attached (or disconnected mid-session).
    #[error("device not attached: {0}")]
    NotAttached(String),

    /// The device or driver does not support the requested operation.
    ///
    /// Returned by `update_effect` on drivers without in-place updates;
    /// callers are expected to fall back to stop-then-restart.
    #[error("operation not supported by device")]
    Unsupported,

    /// The driver ran out of effect slots or similar resources.
    #[error("driver resources exhausted")]
    ResourceExhausted,

    /// A state or device-list query failed.
    #[error("driver query failed: {0}")]
    Query(String),
}

/// Errors surfaced by the input system itself.
#[derive(Debug, Error)]
pub enum InputError {
    /// No usable keyboard was found at startup. Fatal: a keyboard is
    /// mandatory for menu/UI navigation.
    #[error("no usable keyboard found")]
    NoKeyboard,

    /// A specific device failed to open; the system continues without it.
    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    /// An unrecoverable driver failure during enumeration or polling.
    #[error("driver failure: {0}")]
    Driver(#[from] DriverError),
}
