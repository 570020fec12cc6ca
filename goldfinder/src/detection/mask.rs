//! Binary mask generation from luminosity images.

use ndarray::{Array2, ArrayView2};

/// Intensity ceiling for single-channel 8-bit images. Thresholding is always
/// relative to this ceiling, not to the brightest pixel actually present.
pub const MAX_INTENSITY: f64 = 255.0;

/// Threshold a luminosity image into a foreground mask.
///
/// A pixel is foreground iff its intensity is strictly less than
/// `mask_threshold * 255`. Gold particles image darker than the surrounding
/// tissue, so foreground means "dark enough to be a candidate particle".
///
/// # Arguments
///
/// * `image` - Single-channel luminosity image, values in [0, 255]
/// * `mask_threshold` - Fraction of the intensity ceiling in [0, 1]
///
/// # Returns
///
/// A mask of the same dimensions where true marks a foreground pixel
pub fn luminosity_mask(image: ArrayView2<u8>, mask_threshold: f64) -> Array2<bool> {
    let cutoff = mask_threshold * MAX_INTENSITY;
    image.map(|&pixel| (pixel as f64) < cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_dark_pixels_are_foreground() {
        let image = arr2(&[
            [0u8, 50, 101],
            [102, 150, 255],
        ]);

        let mask = luminosity_mask(image.view(), 0.4);

        // 0.4 * 255 = 102; strictly-below keeps 0..=101
        assert!(mask[[0, 0]]);
        assert!(mask[[0, 1]]);
        assert!(mask[[0, 2]]);
        assert!(!mask[[1, 0]]);
        assert!(!mask[[1, 1]]);
        assert!(!mask[[1, 2]]);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 0.5 * 255 = 127.5, so 127 is foreground and 128 is not
        let image = arr2(&[[127u8, 128]]);
        let mask = luminosity_mask(image.view(), 0.5);

        assert!(mask[[0, 0]]);
        assert!(!mask[[0, 1]]);
    }

    #[test]
    fn test_ceiling_is_fixed_not_image_max() {
        // Every pixel is far below the image's own maximum, but the cutoff
        // is 0.4 * 255, not 0.4 * max(image)
        let image = arr2(&[[110u8, 120, 115]]);
        let mask = luminosity_mask(image.view(), 0.4);

        assert!(!mask.iter().any(|&m| m));
    }

    #[test]
    fn test_zero_threshold_masks_nothing() {
        let image = arr2(&[[0u8, 1, 254]]);
        let mask = luminosity_mask(image.view(), 0.0);

        assert!(!mask.iter().any(|&m| m));
    }

    #[test]
    fn test_full_threshold_masks_everything_below_255() {
        let image = arr2(&[[0u8, 200, 254, 255]]);
        let mask = luminosity_mask(image.view(), 1.0);

        assert!(mask[[0, 0]]);
        assert!(mask[[0, 1]]);
        assert!(mask[[0, 2]]);
        assert!(!mask[[0, 3]]);
    }

    #[test]
    fn test_empty_image() {
        let image = Array2::<u8>::zeros((0, 0));
        let mask = luminosity_mask(image.view(), 0.4);

        assert_eq!(mask.dim(), (0, 0));
    }
}
