//! Cluster density scoring.
//!
//! A cluster's density is the number of particles divided by the total edge
//! length of the minimum spanning tree over their centers. Tightly packed
//! clusters need little wire to connect, so they score high; the same count
//! spread out scores low. The score is comparable across clusters of
//! different sizes, which plain bounding-box or radius measures are not.

use crate::detection::Particle;
use nalgebra::Vector2;

/// Total edge length of the minimum spanning tree over the points.
///
/// Prim's algorithm on the complete graph. Particle counts per cluster are
/// small, so the O(n^2) scan is plenty.
fn mst_weight(points: &[Vector2<f64>]) -> f64 {
    let n = points.len();
    let mut in_tree = vec![false; n];
    let mut best = vec![f64::INFINITY; n];
    best[0] = 0.0;

    let mut total = 0.0;
    for _ in 0..n {
        let mut u = 0;
        let mut u_cost = f64::INFINITY;
        for v in 0..n {
            if !in_tree[v] && best[v] < u_cost {
                u = v;
                u_cost = best[v];
            }
        }

        in_tree[u] = true;
        total += best[u];

        for v in 0..n {
            if !in_tree[v] {
                let dist = (points[v] - points[u]).norm();
                if dist < best[v] {
                    best[v] = dist;
                }
            }
        }
    }
    total
}

/// Score how densely packed a group of particles is.
///
/// Returns particles per pixel of spanning-tree length. Groups of fewer than
/// two particles have no tree to measure and score infinitely dense, as do
/// coincident particles (zero tree length).
pub fn density_score(particles: &[Particle]) -> f64 {
    if particles.len() < 2 {
        return f64::INFINITY;
    }

    let points: Vec<Vector2<f64>> = particles
        .iter()
        .map(|p| Vector2::new(p.x as f64, p.y as f64))
        .collect();

    particles.len() as f64 / mst_weight(&points)
}
