//! Built-in demo source image.
//!
//! Used whenever no input file is given. The pattern mixes a hue sweep,
//! a vertical brightness ramp and a checkerboard so that blur, emboss and
//! hue rotation each produce a visible change.

use rayon::prelude::*;

use crate::image::{Image, CHANNELS};

/// Default demo image width.
pub const DEMO_WIDTH: u32 = 512;
/// Default demo image height.
pub const DEMO_HEIGHT: u32 = 384;

const CHECKER: u32 = 32;

/// Generates the default demo image.
pub fn demo_image() -> Image {
    demo_image_sized(DEMO_WIDTH, DEMO_HEIGHT)
}

/// Generates the demo pattern at an arbitrary size.
///
/// Deterministic: the same size always yields the same pixels.
pub fn demo_image_sized(width: u32, height: u32) -> Image {
    let mut img = Image::new(width, height);
    if img.is_empty() {
        return img;
    }
    let row_len = (width * CHANNELS) as usize;

    img.data_mut()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let v = 1.0 - 0.6 * (y as f32 / height as f32);
            for x in 0..width as usize {
                let hue = x as f32 / width as f32;
                let [r, g, b] = hue_to_rgb(hue);
                let checker = ((x as u32 / CHECKER) + (y as u32 / CHECKER)) % 2 == 0;
                let k = if checker { v } else { v * 0.75 };
                let px = &mut row[x * 4..x * 4 + 4];
                px[0] = (r * k * 255.0).round() as u8;
                px[1] = (g * k * 255.0).round() as u8;
                px[2] = (b * k * 255.0).round() as u8;
                px[3] = 255;
            }
        });

    img
}

/// Fully saturated RGB for a hue in `[0, 1)`.
fn hue_to_rgb(h: f32) -> [f32; 3] {
    let h6 = (h.fract() * 6.0).clamp(0.0, 5.999_999);
    let f = h6.fract();
    match h6 as u32 {
        0 => [1.0, f, 0.0],
        1 => [1.0 - f, 1.0, 0.0],
        2 => [0.0, 1.0, f],
        3 => [0.0, 1.0 - f, 1.0],
        4 => [f, 0.0, 1.0],
        _ => [1.0, 0.0, 1.0 - f],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dimensions() {
        let img = demo_image();
        assert_eq!(img.dimensions(), (DEMO_WIDTH, DEMO_HEIGHT));
    }

    #[test]
    fn test_demo_is_opaque_and_deterministic() {
        let a = demo_image_sized(40, 20);
        let b = demo_image_sized(40, 20);
        assert_eq!(a, b);
        assert!(a.data().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_demo_empty() {
        assert!(demo_image_sized(0, 10).is_empty());
    }
}
