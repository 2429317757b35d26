//! Recording mock port shared by the I2C tests.

use std::collections::VecDeque;
use std::vec::Vec;

use open407_hal::i2c::{BusFlag, I2cConfig, I2cPort};
use open407_hal::Result;

/// One recorded port operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Start,
    Stop,
    Data(u8),
    Read,
    ClearAddr,
    Ack(bool),
    Pos(bool),
}

/// Mock port that records every operation in order and answers flag
/// polls immediately, except for flags marked stuck (for timeout paths).
pub(crate) struct MockPort {
    ops: Vec<Op>,
    rx: VecDeque<u8>,
    stuck: Option<BusFlag>,
    configured: bool,
}

impl MockPort {
    pub(crate) fn new() -> Self {
        Self {
            ops: Vec::new(),
            rx: VecDeque::new(),
            stuck: None,
            configured: false,
        }
    }

    /// Mock with bytes queued in the receive pipeline.
    pub(crate) fn with_rx(bytes: &[u8]) -> Self {
        let mut port = Self::new();
        port.rx.extend(bytes.iter().copied());
        port
    }

    /// Make `flag` never assert, so every wait on it times out.
    pub(crate) fn stick(&mut self, flag: BusFlag) {
        self.stuck = Some(flag);
    }

    pub(crate) fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub(crate) fn configured(&self) -> bool {
        self.configured
    }
}

impl I2cPort for MockPort {
    fn configure(&mut self, _config: &I2cConfig) -> Result<()> {
        self.configured = true;
        Ok(())
    }

    fn start(&mut self) {
        self.ops.push(Op::Start);
    }

    fn stop(&mut self) {
        self.ops.push(Op::Stop);
    }

    fn write_data(&mut self, byte: u8) {
        self.ops.push(Op::Data(byte));
    }

    fn read_data(&mut self) -> u8 {
        self.ops.push(Op::Read);
        self.rx.pop_front().unwrap_or(0)
    }

    fn flag(&self, flag: BusFlag) -> bool {
        self.stuck != Some(flag)
    }

    fn clear_address_flag(&mut self) {
        self.ops.push(Op::ClearAddr);
    }

    fn set_ack(&mut self, ack: bool) {
        self.ops.push(Op::Ack(ack));
    }

    fn set_two_byte_position(&mut self, enabled: bool) {
        self.ops.push(Op::Pos(enabled));
    }
}
