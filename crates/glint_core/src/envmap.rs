//! Equirectangular environment map.
//!
//! Backs the tracer's background and ambient context with a latitude/
//! longitude HDR image. Loading goes through the `image` crate; a missing or
//! malformed file is an `Err`, and callers fall back to the procedural sky.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur while loading an environment map.
#[derive(Error, Debug)]
pub enum EnvMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Fallback color returned when no map is loaded.
const UNLOADED_COLOR: Vec3 = Vec3::new(0.2, 0.3, 0.4);

/// An equirectangular RGB float image mapping directions to radiance.
///
/// A zero-sized map is a valid "unloaded" state; sampling it returns a fixed
/// neutral grey-blue instead of failing.
#[derive(Clone, Debug, Default)]
pub struct EnvMap {
    width: u32,
    height: u32,
    /// Flat RGB triples, row-major, `width * height * 3` floats
    rgb: Vec<f32>,
}

impl EnvMap {
    /// The unloaded state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map from raw RGB floats. Panics in debug builds if the buffer
    /// size does not match `width * height * 3`.
    pub fn from_pixels(width: u32, height: u32, rgb: Vec<f32>) -> Self {
        debug_assert_eq!(rgb.len(), (width * height * 3) as usize);
        Self { width, height, rgb }
    }

    /// Load an equirectangular image (HDR or LDR) from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EnvMapError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgb32f();
        let (width, height) = img.dimensions();

        log::debug!(
            "Loaded environment map: {} ({}x{})",
            path.display(),
            width,
            height
        );

        Ok(Self {
            width,
            height,
            rgb: img.into_raw(),
        })
    }

    /// Whether a backing image is present.
    pub fn is_loaded(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Map dimensions (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Fetch a texel with horizontal wraparound and vertical clamping.
    fn texel(&self, x: i32, y: i32) -> Vec3 {
        let w = self.width as i32;
        let h = self.height as i32;
        let x = x.rem_euclid(w);
        let y = y.clamp(0, h - 1);
        let idx = ((y * w + x) * 3) as usize;
        Vec3::new(self.rgb[idx], self.rgb[idx + 1], self.rgb[idx + 2])
    }

    /// Bilinearly sample the map in the given direction.
    ///
    /// Longitude comes from `atan2(z, x)` wrapped into [0, 1); latitude from
    /// `acos(y)` and flipped so +Y lands on the last row. An unloaded map
    /// returns a fixed grey-blue.
    pub fn sample(&self, dir: Vec3) -> Vec3 {
        if !self.is_loaded() {
            return UNLOADED_COLOR;
        }

        let d = dir.normalize();

        let u = d.z.atan2(d.x) / (2.0 * std::f32::consts::PI) + 0.5;
        let v = d.y.clamp(-1.0, 1.0).acos() / std::f32::consts::PI;

        let u = u - u.floor();
        let v = (1.0 - v).clamp(0.0, 1.0);

        let fx = u * (self.width - 1) as f32;
        let fy = v * (self.height - 1) as f32;
        let x0 = fx.floor() as i32;
        let y0 = fy.floor() as i32;
        let tx = fx - x0 as f32;
        let ty = fy - y0 as f32;

        let c00 = self.texel(x0, y0);
        let c10 = self.texel(x0 + 1, y0);
        let c01 = self.texel(x0, y0 + 1);
        let c11 = self.texel(x0 + 1, y0 + 1);

        let c0 = c00 * (1.0 - tx) + c10 * tx;
        let c1 = c01 * (1.0 - tx) + c11 * tx;
        c0 * (1.0 - ty) + c1 * ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Mat3;

    /// A small map with a horizontal hue ramp and vertical brightness ramp.
    fn ramp_map(width: u32, height: u32) -> EnvMap {
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let fx = x as f32 / width as f32;
                let fy = y as f32 / height as f32;
                rgb.extend_from_slice(&[fx, fy, 1.0 - fx]);
            }
        }
        EnvMap::from_pixels(width, height, rgb)
    }

    #[test]
    fn test_unloaded_fallback() {
        let env = EnvMap::empty();
        assert!(!env.is_loaded());
        assert_eq!(env.sample(Vec3::X), Vec3::new(0.2, 0.3, 0.4));
    }

    #[test]
    fn test_poles_clamp() {
        let env = ramp_map(8, 4);

        // Straight up and down hit the clamped pole rows; must not panic and
        // must stay within the rows' value range
        let up = env.sample(Vec3::Y);
        let down = env.sample(Vec3::NEG_Y);
        assert!(up.y >= down.y);
    }

    #[test]
    fn test_full_wraparound_identity() {
        let env = ramp_map(16, 8);
        let rot = Mat3::from_rotation_y(2.0 * std::f32::consts::PI);

        // Longitudes away from the atan2 seam at -X, where the texel ramp
        // itself is discontinuous
        let dirs = [
            Vec3::new(1.0, 0.2, 0.3),
            Vec3::new(-0.5, -0.4, 0.8),
            Vec3::new(0.1, 0.9, -0.2),
            Vec3::new(0.3, -0.1, -0.9),
        ];

        for dir in dirs {
            let a = env.sample(dir);
            let b = env.sample(rot * dir);
            // Within bilinear-interpolation tolerance
            assert!((a - b).length() < 1e-3, "wraparound mismatch for {dir:?}");
        }
    }

    #[test]
    fn test_horizontal_wrap_seam() {
        let env = ramp_map(16, 8);

        // Directions just either side of the atan2 seam (-X axis) sample
        // adjacent texels, exercising the `x mod width` wraparound
        let eps = 1e-4;
        let a = env.sample(Vec3::new(-1.0, 0.0, eps));
        let b = env.sample(Vec3::new(-1.0, 0.0, -eps));
        assert!(a.y.is_finite() && b.y.is_finite());
    }
}
