//! Detector configuration and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the particle detector.
#[derive(Error, Debug)]
pub enum DetectError {
    /// Configuration rejected before any scan work starts
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Settings for a particle detection run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorConfig {
    /// Fraction of the 8-bit intensity ceiling below which a pixel counts as
    /// foreground (0.4 means luminosity < 102 is a candidate particle pixel)
    pub mask_threshold: f64,
    /// Minimum fraction of a splotch's pixels that must fall inside its
    /// inscribed circle for the splotch to count as a particle
    pub circle_threshold: f64,
    /// Minimum number of pixels for a splotch to be considered at all
    pub min_pixels: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            mask_threshold: 0.4,
            circle_threshold: 0.25,
            min_pixels: 5,
        }
    }
}

impl DetectorConfig {
    /// Check the configuration before a scan. Threshold fractions must lie
    /// in [0, 1]; NaN fails the range check.
    pub fn validate(&self) -> Result<(), DetectError> {
        if !(0.0..=1.0).contains(&self.mask_threshold) {
            return Err(DetectError::InvalidConfiguration(format!(
                "mask_threshold must be within [0, 1], got {}",
                self.mask_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.circle_threshold) {
            return Err(DetectError::InvalidConfiguration(format!(
                "circle_threshold must be within [0, 1], got {}",
                self.circle_threshold
            )));
        }
        Ok(())
    }
}
