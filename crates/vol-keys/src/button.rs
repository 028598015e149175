//! Button identities decoded from the headset line.

/// Headset button seen on the resistor ladder during one sample
///
/// `None` means the voltage fell outside every band: nothing pressed,
/// or a reading caught mid-transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Button {
    #[default]
    None,
    Media,
    VolumeUp,
    VolumeDown,
}

impl Button {
    /// Numeric id used in debug window dumps
    pub const fn id(self) -> u8 {
        match self {
            Button::None => 0,
            Button::Media => 1,
            Button::VolumeUp => 2,
            Button::VolumeDown => 3,
        }
    }

    /// Volume buttons share the relaxed matching rule of the debounce window
    pub const fn is_volume(self) -> bool {
        matches!(self, Button::VolumeUp | Button::VolumeDown)
    }
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.id())
    }
}
