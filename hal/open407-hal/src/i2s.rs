//! I2S audio output capability

use crate::error::Result;

/// I2S output capability exposed through the device registry.
pub trait I2sOut {
    /// Configure the peripheral, its pins and the audio clock.
    fn init(&self) -> Result<()>;

    /// Push one stereo sample pair, blocking on the shift register.
    /// Returns the number of bytes written (always four on success).
    fn write_sample(&self, left: u16, right: u16) -> Result<usize>;
}
