//! Decoder configuration types and builder

use core::time::Duration;

use crate::band::{BandTable, VoltageBand};
pub use crate::error::BuilderError;

/// Power-state ordinal at and above which the device counts as awake
pub const DEFAULT_AWAKE_THRESHOLD: u32 = 1;

/// Re-poll delays, one per scheduling outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delays {
    /// Gate halted: accessory absent or line shorted
    pub disconnected: Duration,
    /// ADC read failed this cycle
    pub read_retry: Duration,
    /// A volume key was first seen this cycle
    pub first_press: Duration,
    /// Steady-state poll period
    pub poll: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            disconnected: Duration::from_secs(10),
            read_retry: Duration::from_secs(1),
            first_press: Duration::from_millis(500),
            poll: Duration::from_millis(100),
        }
    }
}

/// Decoder configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Voltage bands used by the classifier
    pub bands: BandTable,
    /// Re-poll delays
    pub delays: Delays,
    /// Gap between cycles after which a media hold counts as a wake gesture
    pub wake_gap: Duration,
    /// Power-state ordinal below which the device is suspended
    pub awake_threshold: u32,
    /// Verbose per-cycle logging
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bands: BandTable::default(),
            delays: Delays::default(),
            wake_gap: Duration::from_secs(1),
            awake_threshold: DEFAULT_AWAKE_THRESHOLD,
            debug: false,
        }
    }
}

/// Builder for constructing decoder configuration
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use vol_keys::Builder;
///
/// let config = Builder::new()
///     .poll_delay(Duration::from_millis(50))
///     .debug(true)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.delays.poll, Duration::from_millis(50));
/// ```
#[derive(Default)]
pub struct Builder {
    bands: Option<&'static [VoltageBand]>,
    delays: Delays,
    wake_gap: Option<Duration>,
    awake_threshold: Option<u32>,
    debug: bool,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the reference band table
    pub fn bands(mut self, bands: &'static [VoltageBand]) -> Self {
        self.bands = Some(bands);
        self
    }

    /// Back-off while the accessory is unplugged
    pub fn disconnected_delay(mut self, delay: Duration) -> Self {
        self.delays.disconnected = delay;
        self
    }

    /// Retry delay after a failed ADC read
    pub fn read_retry_delay(mut self, delay: Duration) -> Self {
        self.delays.read_retry = delay;
        self
    }

    /// Delay after a fresh volume press
    pub fn first_press_delay(mut self, delay: Duration) -> Self {
        self.delays.first_press = delay;
        self
    }

    /// Steady-state poll period
    pub fn poll_delay(mut self, delay: Duration) -> Self {
        self.delays.poll = delay;
        self
    }

    /// Set every delay at once
    pub fn delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    /// Cycle gap that arms the media wake gesture
    pub fn wake_gap(mut self, gap: Duration) -> Self {
        self.wake_gap = Some(gap);
        self
    }

    /// Power-state ordinal at which the device counts as awake
    pub fn awake_threshold(mut self, threshold: u32) -> Self {
        self.awake_threshold = Some(threshold);
        self
    }

    /// Enable verbose per-cycle logging
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns a [`BuilderError`] if the band table is invalid or a delay is zero
    pub fn build(self) -> Result<Config, BuilderError> {
        let defaults = Config::default();
        let bands = match self.bands {
            Some(bands) => BandTable::new(bands)?,
            None => defaults.bands,
        };

        let delays = self.delays;
        for (which, delay) in [
            ("disconnected", delays.disconnected),
            ("read_retry", delays.read_retry),
            ("first_press", delays.first_press),
            ("poll", delays.poll),
        ] {
            if delay.is_zero() {
                return Err(BuilderError::ZeroDelay { which });
            }
        }

        Ok(Config {
            bands,
            delays,
            wake_gap: self.wake_gap.unwrap_or(defaults.wake_gap),
            awake_threshold: self.awake_threshold.unwrap_or(defaults.awake_threshold),
            debug: self.debug,
        })
    }
}
