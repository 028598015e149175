//! Mock hardware for host-side tests and simulators
//!
//! Every mock is a cheap handle around shared state: keep a clone to drive
//! or inspect it while the decoder (possibly on the worker thread) owns the
//! other one.

use core::convert::Infallible;
use core::time::Duration;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use embedded_hal::digital::{ErrorType, InputPin};

use crate::interface::{Clock, PowerMonitor, VoltageSource};

/// Failure injected into a scripted ADC read
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockReadError;

struct AdcScript {
    queued: VecDeque<Result<u32, MockReadError>>,
    idle_mv: u32,
}

/// ADC replaying queued readings, then holding an idle level
#[derive(Clone)]
pub struct MockAdc {
    script: Arc<Mutex<AdcScript>>,
    reads: Arc<AtomicUsize>,
}

impl MockAdc {
    /// ADC idling at `idle_mv` once the queue runs dry
    pub fn new(idle_mv: u32) -> Self {
        Self {
            script: Arc::new(Mutex::new(AdcScript {
                queued: VecDeque::new(),
                idle_mv,
            })),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn push(&self, mv: u32) {
        self.with_script(|script| script.queued.push_back(Ok(mv)));
    }

    pub fn push_repeated(&self, mv: u32, count: usize) {
        for _ in 0..count {
            self.push(mv);
        }
    }

    pub fn push_failure(&self) {
        self.with_script(|script| script.queued.push_back(Err(MockReadError)));
    }

    pub fn set_idle(&self, mv: u32) {
        self.with_script(|script| script.idle_mv = mv);
    }

    /// Number of conversions performed so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Queued readings not consumed yet
    pub fn pending(&self) -> usize {
        self.with_script(|script| script.queued.len())
    }

    fn with_script<R>(&self, f: impl FnOnce(&mut AdcScript) -> R) -> R {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut script)
    }
}

impl VoltageSource for MockAdc {
    type Error = MockReadError;

    fn read_millivolts(&mut self) -> Result<u32, Self::Error> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.with_script(|script| script.queued.pop_front().unwrap_or(Ok(script.idle_mv)))
    }
}

/// Input pin whose level is set from the test
#[derive(Clone)]
pub struct MockPin {
    level: Arc<AtomicBool>,
}

impl MockPin {
    pub fn new(high: bool) -> Self {
        Self {
            level: Arc::new(AtomicBool::new(high)),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.level.store(high, Ordering::SeqCst);
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level.load(Ordering::SeqCst))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.level.load(Ordering::SeqCst))
    }
}

/// Power monitor reporting a settable ordinal
#[derive(Clone)]
pub struct MockPower {
    state: Arc<AtomicU32>,
}

impl MockPower {
    pub fn new(state: u32) -> Self {
        Self {
            state: Arc::new(AtomicU32::new(state)),
        }
    }

    pub fn set(&self, state: u32) {
        self.state.store(state, Ordering::SeqCst);
    }
}

impl PowerMonitor for MockPower {
    fn state(&mut self) -> u32 {
        self.state.load(Ordering::SeqCst)
    }
}

/// Clock that only moves when told to
#[derive(Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.micros.fetch_add(by.as_micros() as u64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}
