//! Immunogold particle detection and density analysis
//!
//! This crate finds gold nanoparticles in electron micrographs of
//! immunolabeled tissue, groups them into spatial clusters, and scores how
//! densely each cluster is packed. Image loading and report writing live in
//! the `golden` binary; everything here operates on in-memory arrays.

pub mod clustering;
pub mod density;
pub mod detection;
pub mod units;

pub use clustering::{cluster_particles, ClusterConfig, NOISE};
pub use density::density_score;
pub use detection::{find_particles, DetectError, DetectorConfig, Particle};
