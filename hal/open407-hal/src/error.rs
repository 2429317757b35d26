//! Shared error classification for all device operations
//!
//! Every capability operation returns one of these classifications
//! synchronously; there is no unwinding path. A [`DeviceError::Timeout`]
//! is a liveness condition, not a correctness fault - callers are
//! expected to treat it as routine and decide their own retry policy.

/// Result alias used across all capability and port traits.
pub type Result<T> = core::result::Result<T, DeviceError>;

/// Device operation failure classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Caller passed invalid arguments; detected before any hardware
    /// access and returned immediately.
    InvalidParameter,
    /// A wait condition was not satisfied within the caller's budget.
    /// The operation was aborted; no retry is performed by the layer.
    Timeout,
    /// The device has not been initialized yet.
    NotInitialized,
    /// Hardware refused its configuration at initialization time.
    /// Typically fatal for that device.
    HardwareConfigFailed,
    /// A known, explicitly rejected input shape (e.g. an I2C read larger
    /// than the two-byte pipeline supports).
    Unimplemented,
    /// The device does not answer this poll query.
    UnknownPollOp,
}
