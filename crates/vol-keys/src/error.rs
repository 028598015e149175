//! Error types for the decoder
//!
//! - [`BuilderError`] - Invalid configuration rejected before any cycle runs
//! - [`SchedulerError`] - Worker lifecycle failures (requires `std`)
//!
//! Per-cycle faults (ADC read failures, sink write failures) are not errors
//! at this level. They are logged and absorbed by the cycle that hit them.
//!
//! ## Example
//!
//! ```
//! use core::time::Duration;
//! use vol_keys::{Builder, BuilderError};
//!
//! let result = Builder::new().poll_delay(Duration::ZERO).build();
//! assert!(matches!(result, Err(BuilderError::ZeroDelay { .. })));
//! ```

use crate::button::Button;

/// Errors that can occur when building configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    /// A band's lower bound lies above its upper bound
    InvertedBand {
        /// Lower bound in millivolts
        min_mv: u32,
        /// Upper bound in millivolts
        max_mv: u32,
    },
    /// Two bands share at least one reading
    OverlappingBands {
        /// Button of the earlier band in the table
        first: Button,
        /// Button of the later band in the table
        second: Button,
    },
    /// A band maps to [`Button::None`], which is reserved for "no band"
    NoneBand,
    /// A scheduler delay is zero
    ///
    /// A zero delay would turn the worker into a busy loop.
    ZeroDelay {
        /// Name of the offending delay
        which: &'static str,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::InvertedBand { min_mv, max_mv } => {
                write!(f, "Inverted voltage band: {min_mv}..={max_mv} mV")
            }
            BuilderError::OverlappingBands { first, second } => {
                write!(f, "Voltage bands for {first:?} and {second:?} overlap")
            }
            BuilderError::NoneBand => write!(f, "Voltage band cannot map to Button::None"),
            BuilderError::ZeroDelay { which } => write!(f, "Delay '{which}' must be non-zero"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors from starting or stopping the polling worker
#[cfg(feature = "std")]
#[derive(Debug)]
pub enum SchedulerError {
    /// The worker thread could not be spawned
    Spawn(std::io::Error),
    /// `start` was called while a cycle is already armed
    AlreadyArmed,
    /// The worker panicked mid-cycle; the decoder and its handles are gone
    WorkerPanicked,
}

#[cfg(feature = "std")]
impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::Spawn(e) => write!(f, "Failed to spawn polling worker: {e}"),
            SchedulerError::AlreadyArmed => write!(f, "Polling worker already running"),
            SchedulerError::WorkerPanicked => write!(f, "Polling worker panicked"),
        }
    }
}

#[cfg(feature = "std")]
impl core::error::Error for SchedulerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SchedulerError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}
