//! Voltage band table and classifier
//!
//! Each headset button pulls the shared line to a distinct voltage through
//! the resistor ladder. A [`BandTable`] maps inclusive millivolt ranges to
//! [`Button`]s; anything outside every band classifies as [`Button::None`].
//!
//! ## Example
//!
//! ```
//! use vol_keys::{BandTable, Button};
//!
//! let table = BandTable::default();
//! assert_eq!(table.classify(165), Button::Media);
//! assert_eq!(table.classify(180), Button::None);
//! ```

use crate::button::Button;
use crate::error::BuilderError;

/// One inclusive voltage range mapped to a button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoltageBand {
    /// Button reported for readings inside the band
    pub button: Button,
    /// Lowest millivolt reading in the band (inclusive)
    pub min_mv: u32,
    /// Highest millivolt reading in the band (inclusive)
    pub max_mv: u32,
}

impl VoltageBand {
    pub const fn new(button: Button, min_mv: u32, max_mv: u32) -> Self {
        Self {
            button,
            min_mv,
            max_mv,
        }
    }

    /// Whether `mv` lies inside the band, bounds included
    pub const fn contains(&self, mv: u32) -> bool {
        self.min_mv <= mv && mv <= self.max_mv
    }

    fn overlaps(&self, other: &VoltageBand) -> bool {
        self.min_mv <= other.max_mv && other.min_mv <= self.max_mv
    }
}

/// Reference ladder for the HiBy 3-conductor headset remote
pub const DEFAULT_BANDS: [VoltageBand; 3] = [
    VoltageBand::new(Button::Media, 160, 170),
    VoltageBand::new(Button::VolumeUp, 190, 205),
    VoltageBand::new(Button::VolumeDown, 225, 250),
];

/// Validated, read-only set of disjoint bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BandTable {
    bands: &'static [VoltageBand],
}

impl BandTable {
    /// Validate a band table
    ///
    /// # Errors
    ///
    /// - [`BuilderError::InvertedBand`] if a band has `min_mv > max_mv`
    /// - [`BuilderError::NoneBand`] if a band maps to [`Button::None`]
    /// - [`BuilderError::OverlappingBands`] if two bands share a reading
    pub fn new(bands: &'static [VoltageBand]) -> Result<Self, BuilderError> {
        for (i, band) in bands.iter().enumerate() {
            if band.min_mv > band.max_mv {
                return Err(BuilderError::InvertedBand {
                    min_mv: band.min_mv,
                    max_mv: band.max_mv,
                });
            }
            if band.button == Button::None {
                return Err(BuilderError::NoneBand);
            }
            if let Some(other) = bands[i + 1..].iter().find(|other| band.overlaps(other)) {
                return Err(BuilderError::OverlappingBands {
                    first: band.button,
                    second: other.button,
                });
            }
        }
        Ok(Self { bands })
    }

    /// Map a reading to a button; first matching band wins
    pub fn classify(&self, mv: u32) -> Button {
        self.bands
            .iter()
            .find(|band| band.contains(mv))
            .map_or(Button::None, |band| band.button)
    }

    pub fn bands(&self) -> &'static [VoltageBand] {
        self.bands
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            bands: &DEFAULT_BANDS,
        }
    }
}
