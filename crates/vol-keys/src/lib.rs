//! Headset button decoder for resistor-ladder remotes.
//!
//! Volume-up, volume-down and media buttons share one ADC line. The decoder
//! samples it periodically, classifies each reading against a table of
//! voltage bands, debounces through a sliding window and taps keys into an
//! event sink. Works `no_std`; the `std` feature adds the polling worker.
//!
//! ## Example
//!
//! ```
//! use vol_keys::mock::{ManualClock, MockAdc, MockPin, MockPower};
//! use vol_keys::{Builder, ChannelSink, Decoder, Interface, Key, taps};
//!
//! let adc = MockAdc::new(0);
//! adc.push_repeated(200, 2);
//! let interface = Interface::new(adc, None::<MockPin>, None::<MockPin>, MockPower::new(1));
//! let (sink, events) = ChannelSink::new();
//! let config = Builder::new().build().unwrap();
//!
//! let mut decoder: Decoder<_, _, _> = Decoder::new(interface, sink, ManualClock::new(), config);
//! decoder.run_cycle();
//! decoder.run_cycle();
//!
//! let events: Vec<_> = events.try_iter().collect();
//! assert_eq!(taps(&events), vec![Key::VolumeUp]);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

pub mod band;
pub mod button;
pub mod config;
pub mod decoder;
pub mod edge;
pub mod error;
pub mod gate;
pub mod interface;
pub mod keycode;
pub mod window;

#[cfg(feature = "std")]
pub mod clock;
#[cfg(feature = "std")]
pub mod mock;
#[cfg(feature = "std")]
pub mod scheduler;
#[cfg(feature = "std")]
pub mod sink;

pub use band::{BandTable, VoltageBand, DEFAULT_BANDS};
pub use button::Button;
pub use config::{Builder, Config, Delays};
pub use decoder::{CycleOutcome, CycleReport, CycleState, Decoder, DelayReason, RunState};
pub use edge::{Edge, WakeContext};
pub use error::BuilderError;
pub use gate::{ConnectionGate, GateState};
pub use interface::{Clock, HeadsetInterface, Interface, KeySink, PowerMonitor, VoltageSource};
pub use keycode::{DeviceInfo, Key, DEVICE_INFO, KEY_TABLE};
pub use window::{SampleWindow, DEFAULT_WINDOW_LEN};

#[cfg(feature = "std")]
pub use clock::MonotonicClock;
#[cfg(feature = "std")]
pub use error::SchedulerError;
#[cfg(feature = "std")]
pub use scheduler::{Scheduler, SchedulerState};
#[cfg(feature = "std")]
pub use sink::{taps, ChannelSink, SinkClosed, SinkEvent};
