//! Offline render command.
//!
//! Assembles a demo scene, fires a one-shot render request and writes the
//! result to disk. Usage: `glint [settings.json]`.

mod demo;
mod settings;

use anyhow::{bail, Context, Result};
use glint_core::{Camera, EnvMap, PointLight};
use glint_math::Vec3;
use glint_render::{render, RenderRequest};

use settings::RenderSettings;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => RenderSettings::load(&path)?,
        None => RenderSettings::default(),
    };
    if args.next().is_some() {
        bail!("usage: glint [settings.json]");
    }

    let scene = demo::build_scene();
    log::info!("Assembled demo scene: {} triangles", scene.triangle_count());

    let camera = Camera::look_at(
        Vec3::new(0.0, 1.6, 5.0),
        Vec3::new(0.0, 0.6, 0.0),
        Vec3::Y,
        settings.fov_y_degrees,
        settings.aspect(),
    );

    // Key light placed relative to the camera frame: up and to the left,
    // pushed into the scene
    let (right, up, forward) = camera.basis();
    let light = PointLight {
        position: camera.position - 1.5 * right + 1.1 * up + 3.0 * forward,
        color: Vec3::ONE,
        intensity: 20.0,
    };

    let env = settings.env_map.as_ref().and_then(|path| {
        match EnvMap::load(path) {
            Ok(env) => Some(env),
            Err(err) => {
                log::warn!(
                    "Could not load environment map {}: {err}; using sky gradient",
                    path.display()
                );
                None
            }
        }
    });

    let frame = render(RenderRequest {
        scene,
        camera,
        light,
        env,
        width: settings.width,
        height: settings.height,
    });

    let out = &settings.output;
    if out.extension().is_some_and(|ext| ext == "png") {
        frame
            .save_png(out, settings.exposure)
            .with_context(|| format!("failed to write {}", out.display()))?;
    } else {
        frame
            .save_ppm(out, settings.exposure)
            .with_context(|| format!("failed to write {}", out.display()))?;
    }
    log::info!("Wrote {}", out.display());

    Ok(())
}
