//! Open407 Hardware Abstraction Layer
//!
//! This crate defines the capability traits a board device can expose
//! and the hardware-port traits the protocol engines in `open407-core`
//! are written against. Chip crates implement the port traits with
//! register accesses; application code only ever sees the capability
//! traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (resolves devices by name) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  open407-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!          ▲                       ▲
//!          │ capability traits     │ port traits
//! ┌───────────────┐       ┌───────────────┐
//! │ open407-core  │       │ chip crate    │
//! │ (engines)     │──────▶│ (registers)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalIo`] - Digital I/O
//! - [`serial::Serial`], [`serial::SerialHw`] - Buffered serial
//! - [`i2c::I2cMaster`], [`i2c::I2cPort`] - I2C bus master
//! - [`spi::SpiDevice`] - SPI full-duplex transfers
//! - [`i2s::I2sOut`] - I2S audio output
//! - [`cpu::CpuInfo`] - CPU identity, clock and reset
//!
//! Every operation reports through the shared [`error::DeviceError`]
//! classification, and every blocking or polling wait takes an explicit
//! [`timeout::Timeout`] iteration budget.

#![no_std]
#![deny(unsafe_code)]

pub mod cpu;
pub mod error;
pub mod gpio;
pub mod i2c;
pub mod i2s;
pub mod serial;
pub mod spi;
pub mod timeout;

pub use error::{DeviceError, Result};
pub use timeout::{PollBudget, Timeout};
