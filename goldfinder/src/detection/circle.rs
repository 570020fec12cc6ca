//! Circularity analysis of extracted splotches.
//!
//! Gold particles are round; stain artifacts and membrane fragments are not.
//! A splotch is scored by the fraction of its pixels that fall within the
//! circle inscribed at its centroid, whose radius is the distance to the
//! nearest perimeter pixel. Round splotches score near 1.0, elongated or
//! ragged ones score low.

use ndarray::ArrayView2;

use super::config::DetectorConfig;
use super::splotch::{Splotch, NEIGHBOR_OFFSETS};

/// Outcome of analyzing one splotch, in internal `(row, col)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplotchAnalysis {
    /// Whether the splotch passed the size and circularity tests
    pub is_particle: bool,
    /// Centroid for splotches that reached the shape test; for rejects it is
    /// a diagnostic reference (scan seed for undersized splotches)
    pub center: (usize, usize),
    /// Number of pixels in the splotch
    pub pixels: usize,
    /// In-circle fraction; 0.0 for splotches rejected before the shape test
    pub circle_score: f64,
}

/// Squared Euclidean distance between two grid coordinates. Exact integer
/// arithmetic; orderings never pass through a square root.
fn dist_squared(a: (usize, usize), b: (usize, usize)) -> i64 {
    let dr = a.0 as i64 - b.0 as i64;
    let dc = a.1 as i64 - b.1 as i64;
    dr * dr + dc * dc
}

/// Find the perimeter of a splotch: members with at least one 4-connected
/// neighbor outside the splotch. Out-of-bounds neighbors count as outside,
/// so splotches touching the image edge keep their edge perimeter.
pub fn perimeter_coords(splotch: &Splotch) -> Splotch {
    let mut perimeter = Splotch::new();

    for &(row, col) in splotch {
        for &(dy, dx) in &NEIGHBOR_OFFSETS {
            let ny = row as isize + dy;
            let nx = col as isize + dx;

            let neighbor_inside = ny >= 0
                && nx >= 0
                && splotch.contains(&(ny as usize, nx as usize));

            if !neighbor_inside {
                perimeter.insert((row, col));
                break;
            }
        }
    }

    perimeter
}

/// Decide whether a splotch is a gold particle.
///
/// Splotches smaller than `min_pixels` are rejected outright, reported at
/// their scan seed (first member in row-major order). Otherwise the centroid
/// is the floor-average of member coordinates; a centroid that lands on
/// background (concave splotch) is a rejection. Surviving splotches are
/// accepted iff the in-circle fraction strictly exceeds `circle_threshold`.
///
/// # Arguments
///
/// * `splotch` - Output of [`extract_splotch`](super::splotch::extract_splotch)
/// * `mask` - The foreground mask the splotch was extracted from
/// * `config` - Size and circularity thresholds
pub fn analyze_splotch(
    splotch: &Splotch,
    mask: ArrayView2<bool>,
    config: &DetectorConfig,
) -> SplotchAnalysis {
    let pixels = splotch.len();
    let seed = splotch.iter().min().copied().unwrap_or((0, 0));

    // An empty splotch only arrives via the defensive bad-seed path; treat it
    // like any undersized splotch
    if pixels < config.min_pixels || pixels == 0 {
        return SplotchAnalysis {
            is_particle: false,
            center: seed,
            pixels,
            circle_score: 0.0,
        };
    }

    let row_sum: usize = splotch.iter().map(|&(row, _)| row).sum();
    let col_sum: usize = splotch.iter().map(|&(_, col)| col).sum();
    let centroid = (row_sum / pixels, col_sum / pixels);

    // Concave splotches can average out to a background pixel
    if !mask[[centroid.0, centroid.1]] {
        return SplotchAnalysis {
            is_particle: false,
            center: centroid,
            pixels,
            circle_score: 0.0,
        };
    }

    // The inscribed circle is set by the perimeter pixel closest to the
    // centroid; a non-empty splotch always has a perimeter
    let perimeter = perimeter_coords(splotch);
    let incircle_rad_squared = perimeter
        .iter()
        .map(|&coord| dist_squared(coord, centroid))
        .min()
        .unwrap_or(0);

    let points_in_circle = splotch
        .iter()
        .filter(|&&coord| dist_squared(coord, centroid) <= incircle_rad_squared)
        .count();
    let circle_score = points_in_circle as f64 / pixels as f64;

    SplotchAnalysis {
        is_particle: circle_score > config.circle_threshold,
        center: centroid,
        pixels,
        circle_score,
    }
}
