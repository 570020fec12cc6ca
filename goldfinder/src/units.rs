//! Physical unit conversion.
//!
//! Micrographs in this pipeline are captured at a fixed calibrated
//! magnification, so pixel distances convert to physical lengths with a
//! single scale factor.

/// Calibrated image scale in pixels per nanometer.
pub const PIXELS_PER_NM: f64 = 1.7897;

/// Calibrated image scale in pixels per micron.
pub const PIXELS_PER_MICRON: f64 = PIXELS_PER_NM * 1000.0;

/// Convert a pixel distance to microns.
pub fn pixels_to_microns(pixels: f64) -> f64 {
    pixels / PIXELS_PER_MICRON
}

/// Convert a micron distance to whole pixels, truncating toward zero.
pub fn microns_to_pixels(microns: f64) -> i64 {
    (microns * PIXELS_PER_MICRON) as i64
}
