//! I2C master transaction engine
//!
//! [`I2cEngine`] drives one complete transaction at a time over an
//! [`open407_hal::i2c::I2cPort`], busy-polling status flags with a
//! caller-supplied iteration budget at every wait point.
//! [`I2cController`] wraps an engine behind a blocking mutex and
//! implements the [`open407_hal::i2c::I2cMaster`] capability for the
//! device registry.

mod controller;
mod engine;

pub use controller::I2cController;
pub use engine::{I2cEngine, Phase};

#[cfg(test)]
pub(crate) mod testutil;
