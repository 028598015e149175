//! Debounce window
//!
//! A fixed-capacity shift buffer of classified samples, oldest first. Every
//! cycle drops the head and appends the newest classification at the tail.
//!
//! The head (`window[0]`) is never part of the stability check. It only
//! serves as the "previous press" reference for edge detection, so a
//! capacity-`N` window needs `N - 1` agreeing samples before it is stable.

use crate::button::Button;

/// Default window capacity: two agreeing samples plus the previous press
pub const DEFAULT_WINDOW_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleWindow<const N: usize = DEFAULT_WINDOW_LEN> {
    slots: [Button; N],
}

impl<const N: usize> SampleWindow<N> {
    const NON_EMPTY: () = assert!(N >= 1, "sample window needs at least one slot");

    /// Window filled with [`Button::None`]
    pub const fn new() -> Self {
        let () = Self::NON_EMPTY;
        Self {
            slots: [Button::None; N],
        }
    }

    pub const fn from_slots(slots: [Button; N]) -> Self {
        let () = Self::NON_EMPTY;
        Self { slots }
    }

    /// Shift left by one and append `button` at the tail
    pub fn absorb(&mut self, button: Button) {
        self.slots.rotate_left(1);
        self.slots[N - 1] = button;
    }

    /// Whether the samples after the head agree
    ///
    /// Adjacent samples in `1..N` that differ break stability, except when
    /// both are volume buttons: an up/down pair counts as matching.
    pub fn is_stable(&self) -> bool {
        self.slots[1..]
            .windows(2)
            .all(|pair| pair[0] == pair[1] || (pair[0].is_volume() && pair[1].is_volume()))
    }

    /// Oldest sample, the reference for edge detection
    pub fn previous(&self) -> Button {
        self.slots[0]
    }

    /// Newest sample
    pub fn current(&self) -> Button {
        self.slots[N - 1]
    }

    pub fn as_slice(&self) -> &[Button] {
        &self.slots
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats as `[0, 1, 1]` using button ids
impl<const N: usize> core::fmt::Display for SampleWindow<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[")?;
        for (i, button) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{button}")?;
        }
        write!(f, "]")
    }
}
