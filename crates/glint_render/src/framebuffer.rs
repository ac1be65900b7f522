//! Framebuffer and image output.
//!
//! Pixels accumulate in linear radiance; writing applies exposure, a
//! Reinhard tone map, gamma encoding and 8-bit quantization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glint_math::Vec3;

/// Gamma exponent applied after tone mapping.
const GAMMA: f32 = 2.2;

/// Tone-map a linear radiance value to displayable [0, 1].
///
/// exposure multiply -> Reinhard `c / (1 + c)` per component -> gamma encode
/// -> clamp.
pub fn tone_map(c: Vec3, exposure: f32) -> Vec3 {
    let c = c * exposure;
    let c = c / (Vec3::ONE + c);
    let c = Vec3::new(
        c.x.max(0.0).powf(1.0 / GAMMA),
        c.y.max(0.0).powf(1.0 / GAMMA),
        c.z.max(0.0).powf(1.0 / GAMMA),
    );
    c.clamp(Vec3::ZERO, Vec3::ONE)
}

/// Quantize a tone-mapped color to 8-bit RGB.
fn to_bytes(c: Vec3) -> [u8; 3] {
    [
        (255.0 * c.x) as u8,
        (255.0 * c.y) as u8,
        (255.0 * c.z) as u8,
    ]
}

/// A linear-radiance image buffer, row-major, top-to-bottom.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec3>,
}

impl Framebuffer {
    /// Create a buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec3::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Tone-map and quantize the whole buffer to packed RGB bytes.
    pub fn to_rgb8(&self, exposure: f32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &c in &self.pixels {
            bytes.extend_from_slice(&to_bytes(tone_map(c, exposure)));
        }
        bytes
    }

    /// Write the buffer as a binary PPM (P6) image.
    ///
    /// Header is `P6\n<width> <height>\n255\n` followed by raw 8-bit RGB
    /// triples in row-major top-to-bottom order, no padding.
    pub fn write_ppm<W: Write>(&self, writer: &mut W, exposure: f32) -> std::io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(&self.to_rgb8(exposure))?;
        Ok(())
    }

    /// Save the buffer as a binary PPM file.
    pub fn save_ppm(&self, path: impl AsRef<Path>, exposure: f32) -> std::io::Result<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_ppm(&mut writer, exposure)?;
        writer.flush()
    }

    /// Save the buffer as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>, exposure: f32) -> image::ImageResult<()> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8(exposure))
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        img.save(path.as_ref())
    }
}
