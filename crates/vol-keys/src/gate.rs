//! Connection gate
//!
//! Two optional hardware signals decide whether a cycle samples at all:
//! - **headset**: high while an accessory is inserted
//! - **balance**: high while the line is shorted to ground (balanced plug)
//!
//! Boards without these signals leave them unconfigured and the gate always
//! proceeds.

use embedded_hal::digital::InputPin;

/// Gate verdict for one cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    Proceed,
    Halt,
}

/// Pure gate policy over the two signal readings
///
/// `None` means the signal is not monitored.
pub fn evaluate(accessory_present: Option<bool>, channel_balanced: Option<bool>) -> GateState {
    if accessory_present == Some(false) || channel_balanced == Some(true) {
        GateState::Halt
    } else {
        GateState::Proceed
    }
}

pub struct ConnectionGate<HP, BP> {
    headset: Option<HP>,
    balance: Option<BP>,
}

impl<HP, BP> ConnectionGate<HP, BP>
where
    HP: InputPin,
    BP: InputPin,
{
    pub fn new(headset: Option<HP>, balance: Option<BP>) -> Self {
        Self { headset, balance }
    }

    /// Read both signals and apply [`evaluate`]
    ///
    /// A signal that fails to read is ignored for this cycle.
    pub fn check(&mut self) -> GateState {
        let present = self.headset.as_mut().and_then(|pin| match pin.is_high() {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("headset detect read failed: {:?}", e);
                None
            }
        });
        let balanced = self.balance.as_mut().and_then(|pin| match pin.is_high() {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("balance detect read failed: {:?}", e);
                None
            }
        });
        evaluate(present, balanced)
    }

    /// Whether any signal is wired
    pub fn is_monitored(&self) -> bool {
        self.headset.is_some() || self.balance.is_some()
    }

    pub fn release(self) -> (Option<HP>, Option<BP>) {
        (self.headset, self.balance)
    }
}
