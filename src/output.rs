//! # Output Module
//!
//! Turns linear radiance into 8-bit pixels and writes them out:
//! - Plain-text PPM (`P3`) streamed to any writer
//! - PNG export through the `image` crate
//!
//! Both paths share [`encode_color`]: gamma 2 (square root), clamp to
//! `[0, 0.999]`, scale by 256 and truncate.

use std::io::Write;
use std::path::Path;

use image::{ImageBuffer, Rgb};
use log::info;

use crate::error::Result;
use crate::interval::Interval;
use crate::material::Color;

/// Intensity range kept before quantization; stops 1.0 from rounding to 256.
const INTENSITY: Interval = Interval::new(0.0, 1.0 - 1e-3);

/// Convert one linear channel to gamma 2 space; non-positive input maps to 0.
pub fn linear_to_gamma(linear_component: f32) -> f32 {
    if linear_component > 0.0 {
        linear_component.sqrt()
    } else {
        0.0
    }
}

/// Map a linear radiance color to its 8-bit RGB bytes.
pub fn encode_color(pixel_color: Color) -> [u8; 3] {
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(pixel_color.x), quantize(pixel_color.y), quantize(pixel_color.z)]
}

/// Write the `P3` header for a `width` x `height` image.
pub fn write_ppm_header<W: Write + ?Sized>(out: &mut W, width: u32, height: u32) -> Result<()> {
    write!(out, "P3\n{} {}\n255\n", width, height)?;
    Ok(())
}

/// Write one pixel as a `R G B` line.
pub fn write_color<W: Write + ?Sized>(out: &mut W, pixel_color: Color) -> Result<()> {
    let [r, g, b] = encode_color(pixel_color);
    writeln!(out, "{} {} {}", r, g, b)?;
    Ok(())
}

/// Save an f32 linear RGB image as PNG, encoding each pixel like the PPM stream.
pub fn save_image_as_png(
    image: &ImageBuffer<Rgb<f32>, Vec<f32>>,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let output_path = output_path.as_ref();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
            let pixel = image.get_pixel(x, y);
            Rgb(encode_color(Color::new(pixel[0], pixel[1], pixel[2])))
        });

    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}
