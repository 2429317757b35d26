//! Queue plumbing between task context and the interrupt handler
//!
//! The transmit queue has one producer (task context, serialized across
//! callers by a spin claim) and one consumer (the interrupt handler).
//! The receive queue has one producer (the interrupt handler) and one
//! consumer (task context; its own claim makes the single-reader
//! contract explicit). The SPSC queue provides the memory-ordering
//! contract at the task/interrupt boundary; the interrupt side never
//! takes a lock and never blocks.
//!
//! The blocking mutex wraps only the individual enqueue/dequeue
//! attempt, never a budgeted wait: on target the raw mutex masks
//! interrupts, and the handler it would mask is the sole drain of the
//! TX queue and sole fill of the RX queue. Waits spin with the lock
//! released so the handler can make the awaited progress.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::spsc::{Consumer, Producer, Queue};

use open407_hal::serial::{PollOp, Serial, SerialConfig, SerialHw};
use open407_hal::{DeviceError, Result, Timeout};

/// Queue storage for one serial device.
///
/// Created once at device construction and kept alive for the life of
/// the device (a `StaticCell` in firmware); there is no teardown path.
pub struct SerialQueues<const N: usize> {
    tx: Queue<u8, N>,
    rx: Queue<u8, N>,
    overruns: AtomicU32,
}

impl<const N: usize> SerialQueues<N> {
    pub const fn new() -> Self {
        Self {
            tx: Queue::new(),
            rx: Queue::new(),
            overruns: AtomicU32::new(0),
        }
    }

    /// Usable capacity of each queue (the queue reserves one slot).
    pub const fn capacity() -> usize {
        N - 1
    }

    /// Split into the task-side transport and the interrupt handle.
    ///
    /// Both sides get a clone of the hardware handle: the task side
    /// configures the port and arms interrupt triggers, the interrupt
    /// side moves bytes through the data register.
    pub fn split<M, H>(
        &mut self,
        hw: H,
        config: SerialConfig,
    ) -> (BufferedSerial<'_, M, H, N>, SerialIrq<'_, H, N>)
    where
        M: RawMutex,
        H: SerialHw + Clone,
    {
        let (tx_prod, tx_cons) = self.tx.split();
        let (rx_prod, rx_cons) = self.rx.split();

        let task_side = BufferedSerial {
            tx: Mutex::new(RefCell::new(TxHalf {
                producer: tx_prod,
                hw: hw.clone(),
            })),
            rx: Mutex::new(RefCell::new(rx_cons)),
            tx_claim: AtomicBool::new(false),
            rx_claim: AtomicBool::new(false),
            overruns: &self.overruns,
            config,
            initialized: AtomicBool::new(false),
        };
        let irq_side = SerialIrq {
            hw,
            tx: tx_cons,
            rx: rx_prod,
            overruns: &self.overruns,
        };
        (task_side, irq_side)
    }
}

impl<const N: usize> Default for SerialQueues<N> {
    fn default() -> Self {
        Self::new()
    }
}

struct TxHalf<'q, H, const N: usize> {
    producer: Producer<'q, u8, N>,
    hw: H,
}

/// Whole-call exclusion among task-context callers.
///
/// Spins until the current holder finishes; never masks interrupts, so
/// the handler keeps draining and filling the queues while a caller
/// waits its turn.
struct Claim<'a>(&'a AtomicBool);

impl<'a> Claim<'a> {
    fn take(flag: &'a AtomicBool) -> Self {
        while flag.swap(true, Ordering::Acquire) {
            core::hint::spin_loop();
        }
        Claim(flag)
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Task-side buffered serial transport.
///
/// Implements the [`Serial`] capability: blocking, timeout-bounded
/// writes and reads against the queues, plus non-blocking polls.
pub struct BufferedSerial<'q, M: RawMutex, H: SerialHw, const N: usize> {
    tx: Mutex<M, RefCell<TxHalf<'q, H, N>>>,
    rx: Mutex<M, RefCell<Consumer<'q, u8, N>>>,
    tx_claim: AtomicBool,
    rx_claim: AtomicBool,
    overruns: &'q AtomicU32,
    config: SerialConfig,
    initialized: AtomicBool,
}

impl<M: RawMutex, H: SerialHw, const N: usize> BufferedSerial<'_, M, H, N> {
    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(DeviceError::NotInitialized)
        }
    }
}

impl<M: RawMutex, H: SerialHw, const N: usize> Serial for BufferedSerial<'_, M, H, N> {
    fn init(&self) -> Result<()> {
        self.tx.lock(|half| {
            let mut half = half.borrow_mut();
            half.hw.configure(&self.config)?;
            half.hw.set_rx_interrupt(true);
            Ok(())
        })?;
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    fn write(&self, data: &[u8], timeout: Timeout) -> Result<usize> {
        self.ensure_initialized()?;
        let _claim = Claim::take(&self.tx_claim);
        let mut queued = 0;
        'bytes: for &byte in data {
            let mut budget = timeout.budget();
            // Lock only around the enqueue attempt; the wait spins
            // unlocked so the handler can drain the queue.
            while !self.tx.lock(|half| {
                let mut half = half.borrow_mut();
                if half.producer.enqueue(byte).is_ok() {
                    // Re-arm the trigger so the handler resumes draining.
                    half.hw.set_tx_interrupt(true);
                    true
                } else {
                    false
                }
            }) {
                if !budget.spend() {
                    // Per-byte budget exhausted. A partial write is a
                    // normal outcome, not an error; the caller checks
                    // the returned count.
                    break 'bytes;
                }
                core::hint::spin_loop();
            }
            queued += 1;
        }
        Ok(queued)
    }

    fn read(&self, buf: &mut [u8], timeout: Timeout) -> Result<usize> {
        self.ensure_initialized()?;
        let _claim = Claim::take(&self.rx_claim);
        for slot in buf.iter_mut() {
            let mut budget = timeout.budget();
            loop {
                // Lock only around the dequeue attempt; the wait spins
                // unlocked so the handler can deliver bytes.
                if let Some(byte) = self.rx.lock(|consumer| consumer.borrow_mut().dequeue()) {
                    *slot = byte;
                    break;
                }
                if !budget.spend() {
                    // The caller asked for an exact count, so a short
                    // read is an error.
                    return Err(DeviceError::Timeout);
                }
                core::hint::spin_loop();
            }
        }
        Ok(buf.len())
    }

    fn poll(&self, op: PollOp) -> Result<u32> {
        self.ensure_initialized()?;
        match op {
            PollOp::RxQueueDepth => Ok(self.rx.lock(|c| c.borrow().len() as u32)),
            PollOp::TxQueueFree => Ok(self.tx.lock(|half| {
                let half = half.borrow();
                (half.producer.capacity() - half.producer.len()) as u32
            })),
            PollOp::RxOverruns => Ok(self.overruns.load(Ordering::Relaxed)),
            _ => Err(DeviceError::UnknownPollOp),
        }
    }
}

/// Interrupt-side handle, owned by the USART interrupt handler.
///
/// Not callable from application code; the bring-up sequencer moves it
/// into the interrupt context.
pub struct SerialIrq<'q, H: SerialHw, const N: usize> {
    hw: H,
    tx: Consumer<'q, u8, N>,
    rx: Producer<'q, u8, N>,
    overruns: &'q AtomicU32,
}

impl<H: SerialHw, const N: usize> SerialIrq<'_, H, N> {
    /// Service one interrupt: drain the transmit queue while the data
    /// register is ready, and capture received bytes.
    pub fn on_interrupt(&mut self) {
        if self.hw.tx_interrupt_enabled() {
            while self.hw.tx_empty() {
                match self.tx.dequeue() {
                    Some(byte) => self.hw.transmit(byte),
                    None => {
                        // Queue empty: drop the trigger so the interrupt
                        // stops firing with nothing to send.
                        self.hw.set_tx_interrupt(false);
                        break;
                    }
                }
            }
        }

        while self.hw.rx_ready() {
            let byte = self.hw.receive();
            if self.rx.enqueue(byte).is_err() {
                // Blocking is not an option in interrupt context; the
                // byte is dropped and the overrun counted.
                self.overruns.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
