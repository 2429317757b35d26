//! Board-agnostic core of the Open407 board support layer
//!
//! This crate contains the logic that does not depend on concrete
//! hardware:
//!
//! - I2C master transaction engine (polling protocol state machine)
//! - Buffered serial transport (interrupt-fed bounded queues with
//!   blocking, timeout-bounded task-context calls)
//! - Device registry and capability dispatch
//!
//! Hardware enters only through the port traits of `open407-hal`, which
//! is what makes every protocol path testable on the host.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod i2c;
pub mod registry;
pub mod serial;
