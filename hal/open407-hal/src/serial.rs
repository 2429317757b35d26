//! Buffered serial (USART) abstractions
//!
//! [`Serial`] is the blocking, timeout-bounded capability surface used
//! from task context; [`SerialHw`] is the hardware seam shared between
//! the task side and the interrupt handler of the buffered transport in
//! `open407-core`.

use crate::error::Result;
use crate::timeout::Timeout;

/// Serial port configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

/// Non-blocking introspection queries answered by [`Serial::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum PollOp {
    /// Number of bytes currently buffered in the receive queue
    RxQueueDepth,
    /// Free slots remaining in the transmit queue
    TxQueueFree,
    /// Bytes dropped by the interrupt handler because the receive queue
    /// was full
    RxOverruns,
}

/// Hardware seam for one USART peripheral.
///
/// The task side calls `configure` and the interrupt-enable controls;
/// the interrupt handler moves bytes through the data register. Both
/// sides hold a handle, so implementations must be cheaply cloneable
/// (a zero-sized register-block wrapper on real hardware).
pub trait SerialHw {
    /// Apply the port configuration. Failure classifies as
    /// `HardwareConfigFailed`.
    fn configure(&mut self, config: &SerialConfig) -> Result<()>;

    /// Write one byte to the transmit data register.
    fn transmit(&mut self, byte: u8);

    /// Read one byte from the receive data register.
    fn receive(&mut self) -> u8;

    /// Transmit data register is ready for another byte (TXE).
    fn tx_empty(&self) -> bool;

    /// A received byte is waiting in the data register (RXNE).
    fn rx_ready(&self) -> bool;

    /// Enable or disable the transmit-empty interrupt trigger.
    fn set_tx_interrupt(&mut self, enabled: bool);

    /// Enable or disable the receive interrupt trigger.
    fn set_rx_interrupt(&mut self, enabled: bool);

    /// Whether the transmit-empty interrupt trigger is currently enabled.
    fn tx_interrupt_enabled(&self) -> bool;
}

/// Buffered serial capability exposed through the device registry.
pub trait Serial {
    /// Configure the hardware and arm the receive interrupt.
    /// Single-call-per-device contract enforced by the bring-up
    /// sequencer, not by this layer.
    fn init(&self) -> Result<()>;

    /// Enqueue `data` for transmission, spending at most `timeout` per
    /// byte waiting for queue space. Returns the number of bytes
    /// actually enqueued - a partial write is a normal outcome the
    /// caller must check, not an error.
    fn write(&self, data: &[u8], timeout: Timeout) -> Result<usize>;

    /// Receive exactly `buf.len()` bytes, spending at most `timeout`
    /// per byte. An exhausted wait on any byte aborts with `Timeout`:
    /// the caller asked for an exact count, so a short read is an
    /// error.
    fn read(&self, buf: &mut [u8], timeout: Timeout) -> Result<usize>;

    /// Answer a non-blocking introspection query.
    fn poll(&self, op: PollOp) -> Result<u32>;
}
