//! Buffered serial transport
//!
//! Bridges the USART interrupt to blocking, timeout-bounded task-context
//! calls through a pair of bounded SPSC queues. [`SerialQueues`] owns
//! the queue storage; [`SerialQueues::split`] yields the task-side
//! [`BufferedSerial`] (the registry-facing capability) and the
//! interrupt-side [`SerialIrq`].

mod transport;

pub use transport::{BufferedSerial, SerialIrq, SerialQueues};

#[cfg(test)]
pub(crate) mod testutil;
