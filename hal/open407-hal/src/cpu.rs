//! CPU identity, clock and reset capability

use crate::error::{DeviceError, Result};

/// Length of the hardware unique identifier in bytes (96 bits).
pub const UNIQUE_ID_LEN: usize = 12;

/// CPU information capability exposed through the device registry.
pub trait CpuInfo {
    /// Copy the hardware unique identifier into `out`. A buffer shorter
    /// than [`UNIQUE_ID_LEN`] classifies as `InvalidParameter`. Returns
    /// the number of bytes written.
    fn unique_id(&self, out: &mut [u8]) -> Result<usize>;

    /// Current core clock frequency in Hz.
    fn core_clock_hz(&self) -> u32;

    /// RTC timestamp, where the hardware provides one.
    fn rtc_timestamp(&self) -> Result<u32> {
        Err(DeviceError::Unimplemented)
    }

    /// Request a system reset. On real hardware this does not return.
    fn reset(&self);
}
