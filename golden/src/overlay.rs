//! Annotated overlay rendering.
//!
//! Draws each detected particle onto the micrograph as a hollow circle and a
//! centroid cross, colored by cluster so the grouping is visible at a glance.

use goldfinder::{Particle, NOISE};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};
use std::collections::BTreeMap;
use std::path::Path;

const NOISE_COLOR: Rgb<u8> = Rgb([160, 160, 160]);

/// Pick a color for a cluster.
///
/// Hues step around the color wheel by the golden ratio, which keeps
/// consecutive cluster ids visually distinct. Noise is flat gray.
fn cluster_color(cluster_id: i32) -> Rgb<u8> {
    if cluster_id == NOISE {
        return NOISE_COLOR;
    }
    let hue = (cluster_id as f32 * 0.618_034) % 1.0;
    hsv_to_rgb(hue, 0.8, 0.9)
}

/// Convert HSV to RGB color.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Rgb<u8> {
    let c = v * s;
    let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h * 6.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb([
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    ])
}

/// Replicate a grayscale micrograph into RGB for annotation.
fn gray_to_rgb(image: &GrayImage) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let v = pixel.0[0];
        out.put_pixel(x, y, Rgb([v, v, v]));
    }
    out
}

/// Render the micrograph with every particle circled in its cluster color.
pub fn render_overlay(image: &GrayImage, clusters: &BTreeMap<i32, Vec<Particle>>) -> RgbImage {
    let mut canvas = gray_to_rgb(image);

    for (&cluster_id, members) in clusters {
        let color = cluster_color(cluster_id);
        for particle in members {
            let cx = particle.x as i32;
            let cy = particle.y as i32;
            // Circle the particle at its equivalent-disk radius, floored so
            // small particles stay visible
            let radius = ((particle.pixels as f32 / std::f32::consts::PI).sqrt().ceil() as i32)
                .max(4);

            draw_hollow_circle_mut(&mut canvas, (cx, cy), radius, color);
            draw_cross_mut(&mut canvas, color, cx, cy);
        }
    }

    canvas
}

/// Render and save the overlay as one step.
pub fn save_overlay(
    path: &Path,
    image: &GrayImage,
    clusters: &BTreeMap<i32, Vec<Particle>>,
) -> Result<(), image::ImageError> {
    render_overlay(image, clusters).save(path)
}
