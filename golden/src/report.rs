//! CSV report generation.
//!
//! The report is one row per particle: its position, the cluster it was
//! assigned to, and that cluster's density score repeated on every member
//! row so each line stands alone in downstream spreadsheets.

use goldfinder::{density_score, Particle};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// One report row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRecord {
    pub x: usize,
    pub y: usize,
    pub cluster_id: i32,
    pub cluster_density: f64,
}

/// Flatten clusters into per-particle records, in cluster-id order.
///
/// Density is computed once per cluster; noise and singleton groups come out
/// infinitely dense, which the CSV carries through as `inf`.
pub fn cluster_records(clusters: &BTreeMap<i32, Vec<Particle>>) -> Vec<ParticleRecord> {
    let mut records = Vec::new();

    for (&cluster_id, members) in clusters {
        let cluster_density = density_score(members);
        for particle in members {
            records.push(ParticleRecord {
                x: particle.x,
                y: particle.y,
                cluster_id,
                cluster_density,
            });
        }
    }

    records
}

/// Write records as CSV with a header row.
pub fn write_csv<W: Write>(out: &mut W, records: &[ParticleRecord]) -> io::Result<()> {
    writeln!(out, "x,y,cluster_id,cluster_density")?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{}",
            record.x, record.y, record.cluster_id, record.cluster_density
        )?;
    }
    Ok(())
}
