//! Region-of-interest masking.

use image::{GrayImage, Luma};

/// Composite a hand-drawn region mask over a micrograph.
///
/// Masks paint the regions to EXCLUDE in white: wherever the mask pixel is
/// exactly 255 the output goes white, so the detector sees no particles
/// there; every other mask value keeps the underlying image pixel.
pub fn apply_mask(image: &GrayImage, mask: &GrayImage) -> GrayImage {
    assert_eq!(
        image.dimensions(),
        mask.dimensions(),
        "mask dimensions must match the micrograph"
    );

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        if mask.get_pixel(x, y).0[0] == 255 {
            *pixel = Luma([255]);
        }
    }
    out
}
