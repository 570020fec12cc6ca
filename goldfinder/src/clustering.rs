//! Spatial clustering of detected particles.
//!
//! Gold particles mark antibody binding sites, and the biology question is
//! usually "where do they pile up", not "where is each one". DBSCAN groups
//! particles by density: a particle with enough neighbors within `eps` seeds
//! a cluster, reachable particles join it, and stragglers are labeled noise.

use crate::detection::Particle;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cluster label for particles that belong to no cluster.
pub const NOISE: i32 = -1;

/// DBSCAN parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterConfig {
    /// Neighborhood radius in pixels
    pub eps: f64,
    /// Minimum neighborhood population (the particle itself included) for a
    /// particle to seed a cluster
    pub min_samples: usize,
}

impl ClusterConfig {
    /// Derive clustering parameters from the image dimensions.
    ///
    /// The neighborhood radius scales with the micrograph: one tenth of the
    /// shorter image side. Three particles within that radius of each other
    /// are enough to call it a cluster.
    pub fn for_image_dim(width: usize, height: usize) -> Self {
        Self {
            eps: width.min(height) as f64 / 10.0,
            min_samples: 3,
        }
    }
}

/// Indices of all points within `eps` of point `i`, including `i` itself.
fn region_query(points: &[Vector2<f64>], i: usize, eps: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| (*point - points[i]).norm() <= eps)
        .map(|(j, _)| j)
        .collect()
}

/// Label each point with a cluster id, or [`NOISE`].
///
/// Standard DBSCAN: core points (at least `min_samples` neighbors) found in
/// index order seed clusters and expand through other core points; non-core
/// points within reach join as border members of the first cluster to claim
/// them; the rest stay noise.
fn dbscan(points: &[Vector2<f64>], eps: f64, min_samples: usize) -> Vec<i32> {
    let mut labels = vec![NOISE; points.len()];
    let mut visited = vec![false; points.len()];
    let mut cluster_id = 0;

    for i in 0..points.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let neighbors = region_query(points, i, eps);
        if neighbors.len() < min_samples {
            // Stays noise unless a later cluster reaches it
            continue;
        }

        labels[i] = cluster_id;
        let mut queue = neighbors;
        let mut head = 0;
        while head < queue.len() {
            let j = queue[head];
            head += 1;

            if labels[j] == NOISE {
                labels[j] = cluster_id;
            }
            if visited[j] {
                continue;
            }
            visited[j] = true;

            let reachable = region_query(points, j, eps);
            if reachable.len() >= min_samples {
                queue.extend(reachable);
            }
        }
        cluster_id += 1;
    }

    labels
}

/// Group particles into clusters keyed by cluster id.
///
/// Noise particles are kept under the [`NOISE`] key so reports can still
/// account for every detection. The map is ordered by id, which makes
/// iteration (and therefore report output) deterministic.
pub fn cluster_particles(
    particles: &[Particle],
    config: &ClusterConfig,
) -> BTreeMap<i32, Vec<Particle>> {
    let points: Vec<Vector2<f64>> = particles
        .iter()
        .map(|p| Vector2::new(p.x as f64, p.y as f64))
        .collect();
    let labels = dbscan(&points, config.eps, config.min_samples);

    let mut groups: BTreeMap<i32, Vec<Particle>> = BTreeMap::new();
    for (&label, &particle) in labels.iter().zip(particles) {
        groups.entry(label).or_default().push(particle);
    }
    groups
}
