//! Transaction state machine
//!
//! Protocol ordering follows the STM32F4 master sequence: start, address
//! with the R/W bit, target register, data phase, stop. Reads re-issue a
//! start after the register byte (repeated start) and branch on the
//! requested size, because the two-byte shift-register pipeline dictates
//! its own acknowledge and stop ordering.

use open407_hal::i2c::{BusFlag, I2cPort, I2cRead, I2cWrite};
use open407_hal::{DeviceError, Result, Timeout};

/// Largest read the two-byte reception pipeline supports.
pub(crate) const MAX_READ_SIZE: usize = 2;

const fn write_address(addr: u8) -> u8 {
    addr << 1
}

const fn read_address(addr: u8) -> u8 {
    (addr << 1) | 0x01
}

/// Where a transaction currently stands.
///
/// On a successful transaction the engine passes through these in order
/// and returns to [`Phase::Idle`]. On a timeout it parks at the phase
/// that was in progress when the wait expired, so the caller can see
/// how far the wire got before invoking [`I2cEngine::recover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No transaction in flight
    Idle,
    /// Start condition issued, waiting for it to appear on the wire
    StartSent,
    /// Target device acknowledged its address
    AddressAcked,
    /// Target register byte handed to the shift register
    RegisterSent,
    /// Data bytes moving in either direction
    DataTransfer,
    /// All bytes shifted, bus ready for the stop condition
    TransferComplete,
    /// Stop condition issued
    StopSent,
}

/// Polling I2C master engine over a hardware port.
///
/// At most one transaction is in flight at a time; the engine itself
/// provides no cross-caller locking (see [`super::I2cController`] for
/// the shared handle).
pub struct I2cEngine<P: I2cPort> {
    port: P,
    phase: Phase,
}

impl<P: I2cPort> I2cEngine<P> {
    pub fn new(port: P) -> Self {
        Self {
            port,
            phase: Phase::Idle,
        }
    }

    /// Phase the last transaction reached. [`Phase::Idle`] after any
    /// successful transaction or recovery.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Execute one write transaction: `txn.data` into register
    /// `txn.reg` of the device at `txn.addr`.
    ///
    /// Returns the number of payload bytes transferred. `timeout` is a
    /// per-wait-point iteration budget; an exhausted wait aborts with
    /// [`DeviceError::Timeout`] and leaves the bus mid-protocol (call
    /// [`Self::recover`] before reuse).
    pub fn write(&mut self, txn: &I2cWrite<'_>, timeout: Timeout) -> Result<usize> {
        check_address(txn.addr)?;
        if txn.data.is_empty() {
            return Err(DeviceError::InvalidParameter);
        }

        self.port.start();
        self.phase = Phase::StartSent;
        self.wait(BusFlag::StartSent, timeout)?;

        self.port.write_data(write_address(txn.addr));
        self.wait(BusFlag::AddressAcked, timeout)?;
        self.port.clear_address_flag();
        self.phase = Phase::AddressAcked;

        self.port.write_data(txn.reg);
        self.phase = Phase::RegisterSent;
        self.wait(BusFlag::TxEmpty, timeout)?;

        self.phase = Phase::DataTransfer;
        for &byte in txn.data {
            self.port.write_data(byte);
            self.wait(BusFlag::TxEmpty, timeout)?;
        }

        self.wait(BusFlag::ByteTransferFinished, timeout)?;
        self.phase = Phase::TransferComplete;

        self.port.stop();
        self.phase = Phase::StopSent;

        self.phase = Phase::Idle;
        Ok(txn.data.len())
    }

    /// Execute one read transaction: `txn.buf.len()` bytes from
    /// register `txn.reg` of the device at `txn.addr`, using a repeated
    /// start to switch direction without releasing the bus.
    ///
    /// Sizes above [`MAX_READ_SIZE`] classify as
    /// [`DeviceError::Unimplemented`]; a zero size as
    /// [`DeviceError::InvalidParameter`]. Neither generates any bus
    /// activity.
    pub fn read(&mut self, txn: &mut I2cRead<'_>, timeout: Timeout) -> Result<usize> {
        check_address(txn.addr)?;
        match txn.buf.len() {
            0 => return Err(DeviceError::InvalidParameter),
            n if n <= MAX_READ_SIZE => {}
            _ => return Err(DeviceError::Unimplemented),
        }

        self.port.start();
        self.phase = Phase::StartSent;
        self.wait(BusFlag::StartSent, timeout)?;

        self.port.write_data(write_address(txn.addr));
        self.wait(BusFlag::AddressAcked, timeout)?;
        self.port.clear_address_flag();
        self.phase = Phase::AddressAcked;

        self.port.write_data(txn.reg);
        self.phase = Phase::RegisterSent;
        self.wait(BusFlag::TxEmpty, timeout)?;

        // Repeated start: switch to the read direction while still
        // owning the bus.
        self.port.start();
        self.phase = Phase::StartSent;
        self.wait(BusFlag::StartSent, timeout)?;

        self.port.write_data(read_address(txn.addr));
        self.wait(BusFlag::AddressAcked, timeout)?;
        self.phase = Phase::AddressAcked;

        self.phase = Phase::DataTransfer;
        if txn.buf.len() == 1 {
            // Single byte: the acknowledge must already be off and the
            // stop queued before the byte lands in the data register.
            self.port.clear_address_flag();
            self.port.set_ack(false);
            self.port.stop();
            self.phase = Phase::StopSent;

            self.wait(BusFlag::RxReady, timeout)?;
            txn.buf[0] = self.port.read_data();
        } else {
            // Two bytes ride the shift-register pipeline: POS and the
            // acknowledge-disable take effect before the transfer
            // completes, and the stop goes out before either byte is
            // drained. This ordering is dictated by the hardware and
            // must not be rearranged.
            self.port.set_ack(false);
            self.port.set_two_byte_position(true);
            self.port.clear_address_flag();

            self.wait(BusFlag::ByteTransferFinished, timeout)?;
            self.phase = Phase::TransferComplete;

            self.port.stop();
            self.phase = Phase::StopSent;

            txn.buf[0] = self.port.read_data();
            txn.buf[1] = self.port.read_data();
        }

        // Leave the port ready for the next transaction.
        self.port.set_ack(true);
        self.port.set_two_byte_position(false);

        self.phase = Phase::Idle;
        Ok(txn.buf.len())
    }

    /// Force the bus back to idle after a timed-out transaction.
    ///
    /// A timeout can leave a start condition on the wire with no stop;
    /// this issues the missing stop and restores the acknowledge
    /// defaults so the next transaction starts clean.
    pub fn recover(&mut self) {
        self.port.stop();
        self.port.set_ack(true);
        self.port.set_two_byte_position(false);
        self.phase = Phase::Idle;
    }

    fn wait(&mut self, flag: BusFlag, timeout: Timeout) -> Result<()> {
        let port = &self.port;
        timeout.budget().wait_for(|| port.flag(flag))
    }
}

fn check_address(addr: u8) -> Result<()> {
    if addr > 0x7F {
        return Err(DeviceError::InvalidParameter);
    }
    Ok(())
}
