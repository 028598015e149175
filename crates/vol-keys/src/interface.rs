//! Hardware and host collaborator interfaces
//!
//! The decoder only talks to the outside world through these traits:
//!
//! - [`HeadsetInterface`] - gate signals, one ADC read, power state.
//!   [`Interface`] builds one from a [`VoltageSource`], two optional
//!   `embedded-hal` input pins and a [`PowerMonitor`].
//! - [`KeySink`] - the input subsystem receiving key reports
//! - [`Clock`] - monotonic time since boot
//!
//! ## Example
//!
//! ```rust,ignore
//! use vol_keys::Interface;
//!
//! // Headset detect on one pin, no balance detection on this board
//! let interface = Interface::new(adc, Some(headset_pin), None::<BalancePin>, power);
//! ```

use core::fmt::Debug;
use core::time::Duration;
use embedded_hal::digital::InputPin;

use crate::gate::{ConnectionGate, GateState};
use crate::keycode::Key;

/// One-shot ADC channel scaled to millivolts
pub trait VoltageSource {
    /// Error type for a failed conversion
    type Error: Debug;

    /// Perform exactly one blocking conversion
    ///
    /// # Errors
    ///
    /// Returns an error if the conversion failed. The decoder treats this
    /// as a transient fault and retries on a shorter delay.
    fn read_millivolts(&mut self) -> Result<u32, Self::Error>;
}

/// Platform power-state query
pub trait PowerMonitor {
    /// Opaque power-state ordinal; lower means deeper sleep
    fn state(&mut self) -> u32;
}

/// Monotonic time source
pub trait Clock {
    /// Time since boot, including time spent suspended
    fn now(&self) -> Duration;
}

/// Input subsystem receiving key reports
pub trait KeySink {
    /// Error type for a failed report
    type Error: Debug;

    /// Report a key edge
    fn report_key(&mut self, key: Key, pressed: bool) -> Result<(), Self::Error>;

    /// Flush the reports of the current cycle
    fn sync(&mut self) -> Result<(), Self::Error>;
}

/// Everything the decoder samples once per cycle
pub trait HeadsetInterface {
    /// Error type for a failed ADC read
    type Error: Debug;

    /// Evaluate the connection gate
    fn gate(&mut self) -> GateState;

    /// Sample the button line
    ///
    /// # Errors
    ///
    /// Returns an error if the ADC conversion failed.
    fn read_millivolts(&mut self) -> Result<u32, Self::Error>;

    /// Current power-state ordinal
    fn power_state(&mut self) -> u32;
}

/// Headset interface assembled from discrete parts
///
/// ## Type Parameters
///
/// * `ADC` - ADC channel implementing [`VoltageSource`]
/// * `HP` - Headset detect pin implementing [`InputPin`]
/// * `BP` - Balance detect pin implementing [`InputPin`]
/// * `PWR` - Power-state query implementing [`PowerMonitor`]
pub struct Interface<ADC, HP, BP, PWR> {
    adc: ADC,
    gate: ConnectionGate<HP, BP>,
    power: PWR,
}

impl<ADC, HP, BP, PWR> Interface<ADC, HP, BP, PWR>
where
    ADC: VoltageSource,
    HP: InputPin,
    BP: InputPin,
    PWR: PowerMonitor,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `adc` - ADC channel on the headset mic/button line
    /// * `headset` - Accessory-inserted signal, `None` if not wired
    /// * `balance` - Line-shorted signal, `None` if not wired
    /// * `power` - Power-state query
    pub fn new(adc: ADC, headset: Option<HP>, balance: Option<BP>, power: PWR) -> Self {
        Self {
            adc,
            gate: ConnectionGate::new(headset, balance),
            power,
        }
    }

    /// Whether the gate has any signal to watch
    pub fn is_gate_monitored(&self) -> bool {
        self.gate.is_monitored()
    }

    /// Give the hardware handles back
    pub fn release(self) -> (ADC, Option<HP>, Option<BP>, PWR) {
        let (headset, balance) = self.gate.release();
        (self.adc, headset, balance, self.power)
    }
}

impl<ADC, HP, BP, PWR> HeadsetInterface for Interface<ADC, HP, BP, PWR>
where
    ADC: VoltageSource,
    HP: InputPin,
    BP: InputPin,
    PWR: PowerMonitor,
{
    type Error = ADC::Error;

    fn gate(&mut self) -> GateState {
        self.gate.check()
    }

    fn read_millivolts(&mut self) -> Result<u32, Self::Error> {
        self.adc.read_millivolts()
    }

    fn power_state(&mut self) -> u32 {
        self.power.state()
    }
}
