//! Shared I2C master handle
//!
//! The registry hands out `&dyn I2cMaster` references, so the engine
//! sits behind a blocking mutex here. The lock only makes shared access
//! sound; it deliberately provides no fairness or ordering across
//! callers - serializing logical transactions remains the callers'
//! business.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use open407_hal::i2c::{I2cConfig, I2cMaster, I2cPort, I2cRead, I2cWrite};
use open407_hal::{Result, Timeout};

use super::engine::I2cEngine;

/// One I2C bus instance: engine plus the configuration it was built
/// with. Immutable after construction; the registry and application
/// hold non-owning references.
pub struct I2cController<M: RawMutex, P: I2cPort> {
    engine: Mutex<M, RefCell<I2cEngine<P>>>,
    config: I2cConfig,
}

impl<M: RawMutex, P: I2cPort> I2cController<M, P> {
    pub fn new(port: P, config: I2cConfig) -> Self {
        Self {
            engine: Mutex::new(RefCell::new(I2cEngine::new(port))),
            config,
        }
    }
}

impl<M: RawMutex, P: I2cPort> I2cMaster for I2cController<M, P> {
    fn init(&self) -> Result<()> {
        self.engine
            .lock(|engine| engine.borrow_mut().port_mut().configure(&self.config))
    }

    fn write_transaction(&self, txn: &I2cWrite<'_>, timeout: Timeout) -> Result<usize> {
        self.engine.lock(|engine| engine.borrow_mut().write(txn, timeout))
    }

    fn read_transaction(&self, txn: &mut I2cRead<'_>, timeout: Timeout) -> Result<usize> {
        self.engine.lock(|engine| engine.borrow_mut().read(txn, timeout))
    }

    fn recover(&self) -> Result<()> {
        self.engine.lock(|engine| engine.borrow_mut().recover());
        Ok(())
    }
}
