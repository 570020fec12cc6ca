//! Golden - gold particle detection for electron microscopy
//!
//! Loads a dataset's micrograph, finds the immunogold particles in it,
//! clusters them spatially, and reports each particle's position, cluster,
//! and cluster density as CSV.
//!
//! Usage:
//! ```
//! cargo run --release -- S1 --mask --dataloc out/S1.csv --figloc out/S1.png
//! ```

mod loading;
mod masking;
mod overlay;
mod report;

use clap::Parser;
use goldfinder::{cluster_particles, find_particles, ClusterConfig, DetectorConfig};
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Command line arguments for Golden
#[derive(Parser, Debug)]
#[command(
    name = "golden",
    about = "Find gold particles and their density in electron microscopy images",
    long_about = None
)]
struct Args {
    /// Name of the dataset to analyze: a directory under the data root,
    /// e.g. "S1" or "S7"
    name: String,

    /// Apply the dataset's hand-drawn region mask before finding particles
    #[arg(short, long)]
    mask: bool,

    /// Write the CSV report to this file in addition to stdout
    #[arg(long)]
    dataloc: Option<PathBuf>,

    /// Save an annotated overlay image to this file
    #[arg(long)]
    figloc: Option<PathBuf>,

    /// Directory holding one sub-directory per dataset
    #[arg(long, default_value = "data/analyzed synapses")]
    data_root: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let bundles = loading::load_bundles(&args.data_root)?;
    let bundle = bundles
        .into_iter()
        .find(|bundle| bundle.name == args.name)
        .ok_or_else(|| {
            format!(
                "dataset '{}' not found under {}",
                args.name,
                args.data_root.display()
            )
        })?;

    let image = if args.mask {
        let mask = bundle
            .mask
            .as_ref()
            .ok_or_else(|| format!("dataset '{}' has no mask", bundle.name))?;
        if mask.dimensions() != bundle.image.dimensions() {
            return Err(format!(
                "dataset '{}': mask is {:?} but the micrograph is {:?}",
                bundle.name,
                mask.dimensions(),
                bundle.image.dimensions()
            )
            .into());
        }
        masking::apply_mask(&bundle.image, mask)
    } else {
        bundle.image
    };

    let luminosity = loading::gray_image_to_array2(&image);
    let particles = find_particles(luminosity.view(), &DetectorConfig::default())?;
    log::info!("{}: {} particles detected", args.name, particles.len());

    let (width, height) = image.dimensions();
    let clusters = cluster_particles(
        &particles,
        &ClusterConfig::for_image_dim(width as usize, height as usize),
    );
    let records = report::cluster_records(&clusters);

    let stdout = io::stdout();
    report::write_csv(&mut stdout.lock(), &records)?;

    if let Some(path) = &args.dataloc {
        let mut file = File::create(path)?;
        report::write_csv(&mut file, &records)?;
        log::info!("report written to {}", path.display());
    }

    if let Some(path) = &args.figloc {
        overlay::save_overlay(path, &image, &clusters)?;
        log::info!("overlay written to {}", path.display());
    }

    Ok(())
}
