//! Name-based device registry and capability dispatch
//!
//! The board's device tree is a static table mapping plain ASCII names
//! to tagged capability references. Resolution is a pure linear scan
//! with no side effects; each returned handle exposes only the
//! operations valid for its peripheral kind, so calling an operation a
//! device does not have is impossible by construction rather than a
//! runtime check.

use open407_hal::cpu::CpuInfo;
use open407_hal::gpio::DigitalIo;
use open407_hal::i2c::I2cMaster;
use open407_hal::i2s::I2sOut;
use open407_hal::serial::Serial;
use open407_hal::spi::SpiDevice;

/// Alias for the board's console USART.
pub const DEFAULT_SERIAL: &str = "default-serial";

/// Alias for the board's status LED.
pub const DEFAULT_LED: &str = "default-led";

/// Peripheral kinds a registry entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceKind {
    DigitalIo,
    Serial,
    I2c,
    I2s,
    Spi,
    Cpu,
}

/// Tagged reference to one device's capability surface.
#[derive(Clone, Copy)]
pub enum DeviceRef<'a> {
    DigitalIo(&'a dyn DigitalIo),
    Serial(&'a dyn Serial),
    I2c(&'a dyn I2cMaster),
    I2s(&'a dyn I2sOut),
    Spi(&'a dyn SpiDevice),
    Cpu(&'a dyn CpuInfo),
}

impl DeviceRef<'_> {
    pub fn kind(&self) -> DeviceKind {
        match self {
            DeviceRef::DigitalIo(_) => DeviceKind::DigitalIo,
            DeviceRef::Serial(_) => DeviceKind::Serial,
            DeviceRef::I2c(_) => DeviceKind::I2c,
            DeviceRef::I2s(_) => DeviceKind::I2s,
            DeviceRef::Spi(_) => DeviceKind::Spi,
            DeviceRef::Cpu(_) => DeviceKind::Cpu,
        }
    }
}

/// One named entry in the device tree.
pub struct RegistryEntry<'a> {
    pub name: &'a str,
    pub device: DeviceRef<'a>,
}

/// The board's device tree.
pub struct Registry<'a> {
    entries: &'a [RegistryEntry<'a>],
}

impl<'a> Registry<'a> {
    pub const fn new(entries: &'a [RegistryEntry<'a>]) -> Self {
        Self { entries }
    }

    /// Look a device up by name.
    pub fn resolve(&self, name: &str) -> Option<DeviceRef<'a>> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.device)
    }

    /// Resolve `name` expecting a digital I/O device.
    pub fn digital_io(&self, name: &str) -> Option<&'a dyn DigitalIo> {
        match self.resolve(name)? {
            DeviceRef::DigitalIo(dev) => Some(dev),
            _ => None,
        }
    }

    /// Resolve `name` expecting a serial device.
    pub fn serial(&self, name: &str) -> Option<&'a dyn Serial> {
        match self.resolve(name)? {
            DeviceRef::Serial(dev) => Some(dev),
            _ => None,
        }
    }

    /// Resolve `name` expecting an I2C master.
    pub fn i2c(&self, name: &str) -> Option<&'a dyn I2cMaster> {
        match self.resolve(name)? {
            DeviceRef::I2c(dev) => Some(dev),
            _ => None,
        }
    }

    /// Resolve `name` expecting an I2S output.
    pub fn i2s(&self, name: &str) -> Option<&'a dyn I2sOut> {
        match self.resolve(name)? {
            DeviceRef::I2s(dev) => Some(dev),
            _ => None,
        }
    }

    /// Resolve `name` expecting an SPI device.
    pub fn spi(&self, name: &str) -> Option<&'a dyn SpiDevice> {
        match self.resolve(name)? {
            DeviceRef::Spi(dev) => Some(dev),
            _ => None,
        }
    }

    /// Resolve `name` expecting the CPU info device.
    pub fn cpu(&self, name: &str) -> Option<&'a dyn CpuInfo> {
        match self.resolve(name)? {
            DeviceRef::Cpu(dev) => Some(dev),
            _ => None,
        }
    }
}
