//! Connected-component extraction over the foreground mask.

use ndarray::ArrayView2;
use std::collections::HashSet;

/// A splotch: one maximal 4-connected set of foreground pixels, stored as
/// internal `(row, col)` coordinates.
pub type Splotch = HashSet<(usize, usize)>;

/// 4-connectivity neighbor offsets: up, down, left, right. Diagonal contact
/// does not join two splotches.
pub(crate) const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Extract the full splotch containing `seed`.
///
/// Reachability runs over an explicit stack rather than recursion, so splotch
/// size is bounded only by the image, never by call-stack depth. Each
/// coordinate is visited at most once; out-of-bounds neighbors are skipped.
///
/// The caller guarantees `seed` is a foreground pixel. If it is not, the
/// violation is logged and the empty set is returned; the scan continues.
///
/// # Arguments
///
/// * `mask` - Foreground mask from [`luminosity_mask`](super::mask::luminosity_mask)
/// * `seed` - In-bounds `(row, col)` coordinate on the splotch
///
/// # Returns
///
/// Every coordinate of the maximal 4-connected foreground region containing
/// the seed, including the seed itself
pub fn extract_splotch(mask: ArrayView2<bool>, seed: (usize, usize)) -> Splotch {
    let (rows, cols) = mask.dim();
    let mut splotch = Splotch::new();

    if !mask[[seed.0, seed.1]] {
        log::warn!(
            "splotch seed ({}, {}) is not foreground; returning empty splotch",
            seed.0,
            seed.1
        );
        return splotch;
    }

    let mut stack = vec![seed];

    while let Some((row, col)) = stack.pop() {
        // Skip if this pixel already joined the splotch
        if !splotch.insert((row, col)) {
            continue;
        }

        for &(dy, dx) in &NEIGHBOR_OFFSETS {
            let ny = row as isize + dy;
            let nx = col as isize + dx;

            // Check bounds
            if ny >= 0 && ny < rows as isize && nx >= 0 && nx < cols as isize {
                let ny = ny as usize;
                let nx = nx as usize;

                if mask[[ny, nx]] && !splotch.contains(&(ny, nx)) {
                    stack.push((ny, nx));
                }
            }
        }
    }

    splotch
}
