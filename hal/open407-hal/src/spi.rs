//! SPI capability
//!
//! Byte shifting without interrupts; the chip crate implements this
//! directly over the shift register.

use crate::error::Result;
use crate::timeout::Timeout;

/// SPI device capability exposed through the device registry.
pub trait SpiDevice {
    /// Configure the peripheral and its pins.
    fn init(&self) -> Result<()>;

    /// Shift `data` out, discarding incoming bytes. Returns the number
    /// of bytes written.
    fn write(&self, data: &[u8], timeout: Timeout) -> Result<usize>;

    /// Shift `buf.len()` dummy bytes out and capture the incoming
    /// bytes. Returns the number of bytes read.
    fn read(&self, buf: &mut [u8], timeout: Timeout) -> Result<usize>;

    /// Full-duplex transfer: shift `tx` out while capturing into `rx`.
    /// Returns the number of bytes captured.
    fn transact(&self, tx: &[u8], rx: &mut [u8], timeout: Timeout) -> Result<usize>;
}
