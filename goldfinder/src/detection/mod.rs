//! Immunogold particle detection.
//!
//! The detector takes a single-channel luminosity image, thresholds it into a
//! foreground mask, walks the mask for connected splotches of dark pixels,
//! and keeps the splotches that are large enough and round enough to be gold
//! particles. Everything here is pure computation over one image; loading,
//! masking, clustering, and reporting live with the callers.

pub mod circle;
pub mod config;
pub mod mask;
pub mod splotch;

// Re-export key functionality for easier access
pub use circle::{analyze_splotch, perimeter_coords, SplotchAnalysis};
pub use config::{DetectError, DetectorConfig};
pub use mask::luminosity_mask;
pub use splotch::{extract_splotch, Splotch};

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// A detected gold particle.
///
/// Positions are image coordinates: `x` is the column and `y` is the row,
/// origin at the top-left. This is the one place the detector's internal
/// `(row, col)` addressing is swapped into `(x, y)` point order; downstream
/// consumers (clustering, density, unit conversion) all speak `(x, y)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Particle {
    /// Center column in pixels
    pub x: usize,
    /// Center row in pixels
    pub y: usize,
    /// Number of pixels in the particle's splotch
    pub pixels: usize,
    /// In-circle fraction the splotch was accepted with
    pub circle_score: f64,
}

/// Scan a luminosity image for gold particles.
///
/// The grid is traversed in a fixed row-major order (rows ascending, columns
/// ascending within each row), which makes the output ordering and each
/// splotch's seed pixel deterministic. Every splotch is extracted exactly
/// once: after analysis, all of its pixels are recorded as processed whether
/// or not it was accepted, so a rejected blob is never re-walked from a later
/// seed.
///
/// # Arguments
///
/// * `image` - Single-channel luminosity image, values in [0, 255], already
///   scale-bar-blanked and mask-composited by the caller
/// * `config` - Detection thresholds; validated before any scan work
///
/// # Returns
///
/// Accepted particle centers in scan order, or
/// [`DetectError::InvalidConfiguration`] if the configuration is malformed.
/// An empty or zero-dimension image yields an empty result.
pub fn find_particles(
    image: ArrayView2<u8>,
    config: &DetectorConfig,
) -> Result<Vec<Particle>, DetectError> {
    config.validate()?;

    let start = Instant::now();
    let mask = luminosity_mask(image, config.mask_threshold);
    let (rows, cols) = mask.dim();

    let mut processed: HashSet<(usize, usize)> = HashSet::new();
    let mut particles = Vec::new();
    let mut splotch_count = 0usize;

    for row in 0..rows {
        for col in 0..cols {
            if !mask[[row, col]] || processed.contains(&(row, col)) {
                continue;
            }

            let splotch = extract_splotch(mask.view(), (row, col));
            if splotch.is_empty() {
                continue;
            }
            splotch_count += 1;

            let analysis = analyze_splotch(&splotch, mask.view(), config);

            // Record every member, accepted or not, so this blob is never
            // re-extracted from another seed
            processed.extend(splotch.iter().copied());

            if analysis.is_particle {
                let (center_row, center_col) = analysis.center;
                particles.push(Particle {
                    x: center_col,
                    y: center_row,
                    pixels: analysis.pixels,
                    circle_score: analysis.circle_score,
                });
            } else {
                log::trace!(
                    "rejected splotch seeded at ({}, {}): {} px, circle score {:.3}",
                    row,
                    col,
                    analysis.pixels,
                    analysis.circle_score
                );
            }
        }
    }

    let duration = start.elapsed();
    log::debug!(
        "Particle scan: image={}x{}, duration={:.3}ms, splotches={}, particles={}",
        cols,
        rows,
        duration.as_secs_f64() * 1000.0,
        splotch_count,
        particles.len()
    );

    Ok(particles)
}
