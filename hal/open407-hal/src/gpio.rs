//! Digital I/O capability
//!
//! Direct, unconditional pin operations. The pin, port and electrical
//! configuration are private data of the concrete device instance.

use crate::error::Result;

/// Digital I/O capability exposed through the device registry.
pub trait DigitalIo {
    /// Configure the pin and drive its default level.
    fn init(&self) -> Result<()>;

    /// Drive the pin high or low.
    fn set(&self, high: bool);

    /// Sample the pin level.
    fn get(&self) -> bool;

    /// Invert the current output level.
    fn toggle(&self);
}
