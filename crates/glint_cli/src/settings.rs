//! Render settings loaded from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings for an offline render. Every field has a default, so a settings
/// file only needs to name what it overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Exposure multiplier applied before tone mapping
    pub exposure: f32,
    /// Optional equirectangular environment map (HDR)
    pub env_map: Option<PathBuf>,
    /// Output file; `.png` writes PNG, anything else binary PPM
    pub output: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_y_degrees: 45.0,
            exposure: 1.0,
            env_map: None,
            output: PathBuf::from("raytrace.ppm"),
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open settings file {}", path.display()))?;
        let settings = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        Ok(settings)
    }

    /// Aspect ratio of the output image.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
