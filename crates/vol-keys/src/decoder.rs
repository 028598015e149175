//! Sampling cycle
//!
//! [`Decoder`] owns every collaborator plus the long-lived [`RunState`] and
//! runs one gate → sample → classify → debounce → emit pass per call to
//! [`Decoder::run_cycle`]. It never sleeps; the returned report carries the
//! delay the caller should wait before the next cycle.

use core::time::Duration;

use crate::button::Button;
use crate::config::{Config, Delays};
use crate::edge::{self, WakeContext};
use crate::gate::GateState;
use crate::interface::{Clock, HeadsetInterface, KeySink};
use crate::keycode::{Key, DEVICE_NAME};
use crate::window::{SampleWindow, DEFAULT_WINDOW_LEN};

/// Why the next cycle is scheduled when it is
///
/// Variants are listed in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayReason {
    /// Gate halted this cycle
    Disconnected,
    /// ADC read failed this cycle
    ReadRetry,
    /// A volume button was entered this cycle
    FirstPress,
    /// Nothing special happened
    Poll,
}

impl DelayReason {
    pub fn select(halted: bool, read_failed: bool, first_press: bool) -> Self {
        if halted {
            DelayReason::Disconnected
        } else if read_failed {
            DelayReason::ReadRetry
        } else if first_press {
            DelayReason::FirstPress
        } else {
            DelayReason::Poll
        }
    }

    pub fn delay(self, delays: &Delays) -> Duration {
        match self {
            DelayReason::Disconnected => delays.disconnected,
            DelayReason::ReadRetry => delays.read_retry,
            DelayReason::FirstPress => delays.first_press,
            DelayReason::Poll => delays.poll,
        }
    }
}

/// Scratch state of a cycle that got a reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleState {
    pub millivolts: u32,
    pub button: Button,
    pub stable: bool,
    pub first_press: bool,
    /// Key tapped this cycle, if any
    pub tap: Option<Key>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Accessory absent or line shorted; nothing sampled
    Halted,
    /// ADC conversion failed; window untouched
    ReadFailed,
    Sampled(CycleState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub reason: DelayReason,
    /// Delay until the next cycle
    pub delay: Duration,
}

/// State carried from one cycle to the next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunState<const N: usize = DEFAULT_WINDOW_LEN> {
    /// Debounce window
    pub window: SampleWindow<N>,
    /// Clock reading when the last completed cycle restarted the timer
    pub last_cycle_start: Duration,
    /// Power state seen by the last sampled cycle
    pub suspended: bool,
    /// Delay chosen by the last cycle
    pub delay: Duration,
}

/// Headset button decoder
///
/// ## Type Parameters
///
/// * `I` - Hardware access implementing [`HeadsetInterface`]
/// * `K` - Event sink implementing [`KeySink`]
/// * `C` - Monotonic clock implementing [`Clock`]
/// * `N` - Debounce window capacity
pub struct Decoder<I, K, C, const N: usize = DEFAULT_WINDOW_LEN> {
    interface: I,
    sink: K,
    clock: C,
    config: Config,
    state: RunState<N>,
}

impl<I, K, C, const N: usize> Decoder<I, K, C, N>
where
    I: HeadsetInterface,
    K: KeySink,
    C: Clock,
{
    /// Create a decoder with an empty window and the cycle timer started now
    pub fn new(interface: I, sink: K, clock: C, config: Config) -> Self {
        let state = RunState {
            window: SampleWindow::new(),
            last_cycle_start: clock.now(),
            suspended: false,
            delay: config.delays.poll,
        };
        if config.debug {
            for band in config.bands.bands() {
                log::info!(
                    "{}: band {:?} {}..={} mV",
                    DEVICE_NAME,
                    band.button,
                    band.min_mv,
                    band.max_mv
                );
            }
        }
        Self {
            interface,
            sink,
            clock,
            config,
            state,
        }
    }

    /// Run one cycle and pick the delay before the next one
    pub fn run_cycle(&mut self) -> CycleReport {
        let started = self.clock.now();
        let outcome = self.sample();

        let reason = match outcome {
            CycleOutcome::Halted => DelayReason::select(true, false, false),
            CycleOutcome::ReadFailed => DelayReason::select(false, true, false),
            CycleOutcome::Sampled(cycle) => DelayReason::select(false, false, cycle.first_press),
        };
        let delay = reason.delay(&self.config.delays);
        self.state.delay = delay;

        if self.config.debug {
            log::info!(
                "{}: cycle took {:?}, next in {:?} ({:?})",
                DEVICE_NAME,
                self.clock.now().saturating_sub(started),
                delay,
                reason
            );
        }

        CycleReport {
            outcome,
            reason,
            delay,
        }
    }

    fn sample(&mut self) -> CycleOutcome {
        if self.interface.gate() == GateState::Halt {
            return CycleOutcome::Halted;
        }

        let millivolts = match self.interface.read_millivolts() {
            Ok(mv) => mv,
            Err(e) => {
                log::error!("{}: ADC read failed: {:?}", DEVICE_NAME, e);
                return CycleOutcome::ReadFailed;
            }
        };

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.state.last_cycle_start);

        let button = self.config.bands.classify(millivolts);
        self.state.window.absorb(button);
        let stable = self.state.window.is_stable();

        self.state.suspended = self.interface.power_state() < self.config.awake_threshold;

        if self.config.debug {
            log::info!(
                "uptime: {}.{:03}s",
                now.as_secs(),
                now.subsec_millis()
            );
            log::info!(
                "device state: {}",
                if self.state.suspended { "suspend" } else { "active" }
            );
            log::info!("loop time: {} sec", elapsed.as_secs());
            log::info!("adc res: {} mV", millivolts);
            log::info!("{} data: {}", DEVICE_NAME, self.state.window);
        }

        let edge = edge::detect(
            &self.state.window,
            WakeContext {
                suspended: self.state.suspended,
                elapsed,
                wake_gap: self.config.wake_gap,
            },
        );
        if let Some(key) = edge.tap {
            self.tap(key);
        }

        if let Err(e) = self.sink.sync() {
            log::warn!("{}: input sync failed: {:?}", DEVICE_NAME, e);
        }
        self.state.last_cycle_start = self.clock.now();

        CycleOutcome::Sampled(CycleState {
            millivolts,
            button,
            stable,
            first_press: edge.first_press,
            tap: edge.tap,
        })
    }

    /// Press then release `key` within the current cycle
    fn tap(&mut self, key: Key) {
        for pressed in [true, false] {
            match self.sink.report_key(key, pressed) {
                Ok(()) => log::info!("[HS KEY] key report: {} state:{}", key.code(), pressed as u8),
                Err(e) => log::warn!(
                    "[HS KEY] key report: {} state:{} failed: {:?}",
                    key.code(),
                    pressed as u8,
                    e
                ),
            }
        }
    }

    pub fn window(&self) -> &SampleWindow<N> {
        &self.state.window
    }

    pub fn run_state(&self) -> &RunState<N> {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the collaborators back, ending the decoder
    pub fn release(self) -> (I, K, C) {
        (self.interface, self.sink, self.clock)
    }
}
