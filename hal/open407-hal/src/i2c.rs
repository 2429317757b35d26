//! I2C bus abstractions
//!
//! [`I2cMaster`] is the capability surface applications reach through
//! the registry; [`I2cPort`] is the hardware seam the transaction engine
//! in `open407-core` drives. A port implementation only touches
//! registers - all protocol ordering lives in the engine.

use crate::error::Result;
use crate::timeout::Timeout;

/// I2C bus configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// SCL frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };

    /// Fast mode plus (1 MHz)
    pub const FAST_PLUS: Self = Self {
        frequency: 1_000_000,
    };
}

/// Write-transaction descriptor: register `reg` on the device at the
/// 7-bit address `addr` receives `data`.
///
/// Stack-allocated by the caller and consumed synchronously by the
/// engine; no ownership transfer.
#[derive(Debug)]
pub struct I2cWrite<'a> {
    /// 7-bit target address
    pub addr: u8,
    /// Target register on the device
    pub reg: u8,
    /// Payload; must not be empty
    pub data: &'a [u8],
}

/// Read-transaction descriptor: `buf.len()` bytes from register `reg`
/// of the device at the 7-bit address `addr`.
///
/// Only one- and two-byte reads are supported by the engine; larger
/// sizes classify as `Unimplemented`.
#[derive(Debug)]
pub struct I2cRead<'a> {
    /// 7-bit target address
    pub addr: u8,
    /// Target register on the device
    pub reg: u8,
    /// Destination; its length is the transaction size
    pub buf: &'a mut [u8],
}

/// Status flags the transaction engine waits on.
///
/// These map one-to-one onto the STM32F4 I2C status bits (SB, ADDR,
/// TXE, BTF, RXNE) but are named for what the protocol is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusFlag {
    /// A start condition has been generated on the wire
    StartSent,
    /// The addressed device acknowledged its address
    AddressAcked,
    /// The data register is ready for the next outgoing byte
    TxEmpty,
    /// The shift register finished moving the current byte
    ByteTransferFinished,
    /// A received byte is waiting in the data register
    RxReady,
}

/// Hardware seam for one I2C peripheral.
///
/// Implementations perform single register accesses and nothing else;
/// the engine owns the protocol ordering and every wait.
pub trait I2cPort {
    /// Apply the bus configuration. Failure classifies as
    /// `HardwareConfigFailed`.
    fn configure(&mut self, config: &I2cConfig) -> Result<()>;

    /// Generate a start (or repeated start) condition.
    fn start(&mut self);

    /// Generate a stop condition.
    fn stop(&mut self);

    /// Write one byte to the data register.
    fn write_data(&mut self, byte: u8);

    /// Read one byte from the data register.
    fn read_data(&mut self) -> u8;

    /// Query a status flag.
    fn flag(&self, flag: BusFlag) -> bool;

    /// Clear the address-acknowledged flag (the SR1/SR2 read sequence
    /// on STM32F4).
    fn clear_address_flag(&mut self);

    /// Control whether the next received byte is acknowledged.
    fn set_ack(&mut self, ack: bool);

    /// Control the two-byte-reception position flag (POS). Only
    /// meaningful for the two-byte read framing.
    fn set_two_byte_position(&mut self, enabled: bool);
}

/// I2C master capability exposed through the device registry.
pub trait I2cMaster {
    /// Configure the bus. Single-call-per-device contract; the bring-up
    /// sequencer is responsible for calling this exactly once.
    fn init(&self) -> Result<()>;

    /// Execute one write transaction. Returns the number of payload
    /// bytes transferred.
    fn write_transaction(&self, txn: &I2cWrite<'_>, timeout: Timeout) -> Result<usize>;

    /// Execute one read transaction. Returns the number of bytes read.
    fn read_transaction(&self, txn: &mut I2cRead<'_>, timeout: Timeout) -> Result<usize>;

    /// Force the bus back to an idle state after a timed-out
    /// transaction left it mid-protocol. Callers must invoke this
    /// before reusing the bus after a `Timeout`.
    fn recover(&self) -> Result<()>;
}
