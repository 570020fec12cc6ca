//! Dataset discovery and micrograph loading.
//!
//! Micrographs come off the scope with a burned-in scale bar along one edge;
//! the bar pixels are pure black and would light up the particle detector, so
//! every image is loaded with the bar band blanked to white. A dataset is a
//! directory holding the micrograph TIFF and, optionally, a hand-drawn region
//! mask alongside it.

use image::{GrayImage, Luma};
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no scale bar found along any image edge")]
    NoScaleBar,
    #[error("no micrograph found for dataset '{0}'")]
    NoImage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Which image edge carries the burned-in scale bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPosition {
    Top,
    Bottom,
    Left,
    Right,
}

impl BarPosition {
    /// Extent of the scale-bar band as (left, top, right, bottom), exclusive
    /// on the right and bottom.
    ///
    /// The scope pads the square sensor readout with the bar, so the band is
    /// as wide as the difference between the image sides.
    pub fn bar_location(self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let bar_width = width.abs_diff(height);
        match self {
            BarPosition::Top => (0, 0, width, bar_width),
            BarPosition::Bottom => (0, height.saturating_sub(bar_width), width, height),
            BarPosition::Left => (0, 0, bar_width, height),
            BarPosition::Right => (width.saturating_sub(bar_width), 0, width, height),
        }
    }

    /// Locate the scale bar by probing the midpoint of each edge for a pure
    /// black pixel, top and bottom before left and right.
    pub fn detect(image: &GrayImage) -> Result<Self, LoadError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(LoadError::NoScaleBar);
        }

        if image.get_pixel(width / 2, 0).0[0] == 0 {
            return Ok(BarPosition::Top);
        }
        if image.get_pixel(width / 2, height - 1).0[0] == 0 {
            return Ok(BarPosition::Bottom);
        }
        if image.get_pixel(0, height / 2).0[0] == 0 {
            return Ok(BarPosition::Left);
        }
        if image.get_pixel(width - 1, height / 2).0[0] == 0 {
            return Ok(BarPosition::Right);
        }

        Err(LoadError::NoScaleBar)
    }
}

/// Blank the scale-bar band to white so the detector ignores it.
pub fn fill_scale_bar(image: &mut GrayImage, bar_position: BarPosition) {
    let (width, height) = image.dimensions();
    let (left, top, right, bottom) = bar_position.bar_location(width, height);

    for y in top..bottom.min(height) {
        for x in left..right.min(width) {
            image.put_pixel(x, y, Luma([255]));
        }
    }
}

/// A dataset directory's images, ready for analysis.
///
/// The mask carries the same scale-bar blanking as the micrograph because a
/// mask TIFF gives no clue of its own where the bar sits.
#[derive(Debug)]
pub struct ImageBundle {
    /// Dataset name, taken from the directory
    pub name: String,
    /// Grayscale micrograph with the scale bar blanked
    pub image: GrayImage,
    /// Hand-drawn region mask, if the dataset has one
    pub mask: Option<GrayImage>,
}

/// Load every dataset directory under the data root.
///
/// Non-directory entries are skipped; directories are visited in name order.
pub fn load_bundles(base_path: &Path) -> Result<Vec<ImageBundle>, LoadError> {
    let mut subdirs: Vec<PathBuf> = fs::read_dir(base_path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    subdirs.iter().map(|subdir| load_bundle(subdir)).collect()
}

/// Load one dataset directory.
///
/// The micrograph is the first `.tif` whose name mentions neither "mask" nor
/// "color"; the mask, when present, is the first file ending in `mask.tif`.
fn load_bundle(subdir: &Path) -> Result<ImageBundle, LoadError> {
    let name = subdir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut files: Vec<PathBuf> = fs::read_dir(subdir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    let image_path = files
        .iter()
        .find(|path| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            path.extension().is_some_and(|ext| ext == "tif")
                && !file_name.contains("mask")
                && !file_name.contains("color")
        })
        .ok_or_else(|| LoadError::NoImage(name.clone()))?;

    let mut image = image::open(image_path)?.to_luma8();
    let bar_position = BarPosition::detect(&image)?;
    fill_scale_bar(&mut image, bar_position);
    log::debug!(
        "{}: loaded {}x{} micrograph, scale bar {:?}",
        name,
        image.width(),
        image.height(),
        bar_position
    );

    let mask_path = files.iter().find(|path| {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
            .ends_with("mask.tif")
    });
    let mask = match mask_path {
        Some(path) => {
            let mut mask = image::open(path)?.to_luma8();
            fill_scale_bar(&mut mask, bar_position);
            Some(mask)
        }
        None => None,
    };

    Ok(ImageBundle { name, image, mask })
}

/// Copy a grayscale image into an ndarray with [row, col] addressing.
///
/// Array dimensions are (height, width) while image coordinates are (x, y).
pub fn gray_image_to_array2(image: &GrayImage) -> Array2<u8> {
    let (width, height) = image.dimensions();
    let mut arr = Array2::zeros((height as usize, width as usize));

    for y in 0..height {
        for x in 0..width {
            arr[[y as usize, x as usize]] = image.get_pixel(x, y).0[0];
        }
    }

    arr
}
