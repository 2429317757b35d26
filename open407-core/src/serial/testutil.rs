//! Mock USART shared by the serial tests.
//!
//! The transmit data register is always ready, so transmitted bytes
//! accumulate in `sent`. Received bytes wait in `incoming` until the
//! interrupt handler moves them into the queue.

use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::{Arc, Mutex as StdMutex};
use std::vec::Vec;

use core::cell::RefCell;

use open407_hal::serial::{SerialConfig, SerialHw};
use open407_hal::{DeviceError, Result};

#[derive(Default)]
struct MockUartState {
    configured: bool,
    fail_configure: bool,
    tx_irq: bool,
    rx_irq: bool,
    sent: Vec<u8>,
    incoming: VecDeque<u8>,
}

/// Cloneable mock hardware handle, shared by the task and interrupt
/// sides exactly like a register-block wrapper would be.
#[derive(Clone)]
pub(crate) struct MockUart(Rc<RefCell<MockUartState>>);

impl MockUart {
    pub(crate) fn new() -> Self {
        Self(Rc::new(RefCell::new(MockUartState::default())))
    }

    /// Make `configure` report a hardware configuration failure.
    pub(crate) fn fail_configure(&self) {
        self.0.borrow_mut().fail_configure = true;
    }

    /// Queue bytes on the wire side of the receiver.
    pub(crate) fn push_incoming(&self, bytes: &[u8]) {
        self.0.borrow_mut().incoming.extend(bytes.iter().copied());
    }

    /// Bytes that have left through the transmit data register.
    pub(crate) fn sent(&self) -> Vec<u8> {
        self.0.borrow().sent.clone()
    }

    pub(crate) fn configured(&self) -> bool {
        self.0.borrow().configured
    }

    pub(crate) fn rx_interrupt_enabled(&self) -> bool {
        self.0.borrow().rx_irq
    }
}

impl SerialHw for MockUart {
    fn configure(&mut self, _config: &SerialConfig) -> Result<()> {
        let mut state = self.0.borrow_mut();
        if state.fail_configure {
            return Err(DeviceError::HardwareConfigFailed);
        }
        state.configured = true;
        Ok(())
    }

    fn transmit(&mut self, byte: u8) {
        self.0.borrow_mut().sent.push(byte);
    }

    fn receive(&mut self) -> u8 {
        self.0.borrow_mut().incoming.pop_front().unwrap_or(0)
    }

    fn tx_empty(&self) -> bool {
        true
    }

    fn rx_ready(&self) -> bool {
        !self.0.borrow().incoming.is_empty()
    }

    fn set_tx_interrupt(&mut self, enabled: bool) {
        self.0.borrow_mut().tx_irq = enabled;
    }

    fn set_rx_interrupt(&mut self, enabled: bool) {
        self.0.borrow_mut().rx_irq = enabled;
    }

    fn tx_interrupt_enabled(&self) -> bool {
        self.0.borrow().tx_irq
    }
}

#[derive(Default)]
struct ThreadUartState {
    tx_irq: bool,
    rx_irq: bool,
    sent: Vec<u8>,
    incoming: VecDeque<u8>,
}

/// Mock USART shared across threads, for tests that service the
/// interrupt handler on one thread while a caller blocks on another.
#[derive(Clone)]
pub(crate) struct ThreadUart(Arc<StdMutex<ThreadUartState>>);

impl ThreadUart {
    pub(crate) fn new() -> Self {
        Self(Arc::new(StdMutex::new(ThreadUartState::default())))
    }

    pub(crate) fn push_incoming(&self, bytes: &[u8]) {
        self.0
            .lock()
            .unwrap()
            .incoming
            .extend(bytes.iter().copied());
    }

    pub(crate) fn sent(&self) -> Vec<u8> {
        self.0.lock().unwrap().sent.clone()
    }
}

impl SerialHw for ThreadUart {
    fn configure(&mut self, _config: &SerialConfig) -> Result<()> {
        Ok(())
    }

    fn transmit(&mut self, byte: u8) {
        self.0.lock().unwrap().sent.push(byte);
    }

    fn receive(&mut self) -> u8 {
        self.0.lock().unwrap().incoming.pop_front().unwrap_or(0)
    }

    fn tx_empty(&self) -> bool {
        true
    }

    fn rx_ready(&self) -> bool {
        !self.0.lock().unwrap().incoming.is_empty()
    }

    fn set_tx_interrupt(&mut self, enabled: bool) {
        self.0.lock().unwrap().tx_irq = enabled;
    }

    fn set_rx_interrupt(&mut self, enabled: bool) {
        self.0.lock().unwrap().rx_irq = enabled;
    }

    fn tx_interrupt_enabled(&self) -> bool {
        self.0.lock().unwrap().tx_irq
    }
}
