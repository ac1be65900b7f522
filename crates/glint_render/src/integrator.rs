//! Shading integrator.
//!
//! One primary ray per pixel, direct lighting from a single point light with
//! a shadow-ray visibility test, environment-map (or procedural sky)
//! background. No secondary bounces.

use glint_core::{Camera, EnvMap, PointLight, Scene};
use glint_math::{Ray, Vec3};
use rayon::prelude::*;

use crate::bvh::Bvh;
use crate::framebuffer::Framebuffer;

/// Fraction of albedo added unconditionally so shadowed regions are not
/// pure black.
const AMBIENT: f32 = 0.03;

/// Shadow-ray origin offset along the shading normal (shadow acne guard).
const SHADOW_BIAS: f32 = 1e-4;

/// Shadow rays stop this far short of the light so the light itself is
/// never an occluder.
const LIGHT_DISTANCE_EPS: f32 = 1e-3;

/// Floor on the squared light distance in the attenuation term.
const ATTENUATION_FLOOR: f32 = 1e-4;

/// Background color for a ray that hits nothing.
///
/// Env-map sample when a map is attached, otherwise a vertical sky gradient.
pub fn background(dir: Vec3, env: Option<&EnvMap>) -> Vec3 {
    if let Some(env) = env {
        return env.sample(dir);
    }

    let t = 0.5 * (dir.y + 1.0);
    let horizon = Vec3::new(0.08, 0.10, 0.15);
    let zenith = Vec3::new(0.6, 0.75, 1.0);
    horizon * (1.0 - t) + zenith * t
}

/// Whether the line from a shaded point to the light is blocked.
///
/// The ray origin is pushed out along the shading normal, and the query is
/// bounded just short of the light distance.
pub fn occluded(scene: &Scene, bvh: &Bvh, point: Vec3, normal: Vec3, light_pos: Vec3) -> bool {
    let origin = point + SHADOW_BIAS * normal;
    let to_light = light_pos - origin;
    let dist = to_light.length();
    let ray = Ray::new(origin, to_light / dist);

    bvh.intersect(scene, &ray, dist - LIGHT_DISTANCE_EPS).is_some()
}

/// Compute the color seen along one primary ray.
pub fn ray_color(
    scene: &Scene,
    bvh: &Bvh,
    env: Option<&EnvMap>,
    light: &PointLight,
    ray: &Ray,
) -> Vec3 {
    let hit = match bvh.intersect(scene, ray, f32::INFINITY) {
        Some(hit) => hit,
        None => return background(ray.direction, env),
    };

    let mat = scene.material(hit.mat_id);

    let to_light = light.position - hit.point;
    let dist2 = to_light.length_squared();
    let dist = dist2.sqrt();
    let wi = to_light / dist.max(1e-6);

    let ndotl = hit.normal.dot(wi).max(0.0);
    let atten = 1.0 / dist2.max(ATTENUATION_FLOOR);
    let li = light.color * (light.intensity * atten);

    let vis = if occluded(scene, bvh, hit.point, hit.normal, light.position) {
        0.0
    } else {
        1.0
    };

    let ambient = AMBIENT * mat.albedo;
    ambient + mat.albedo * li * ndotl * vis
}

/// Render a single pixel.
pub fn render_pixel(
    scene: &Scene,
    bvh: &Bvh,
    env: Option<&EnvMap>,
    camera: &Camera,
    light: &PointLight,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Vec3 {
    let ray = camera.primary_ray(x, y, width, height);
    ray_color(scene, bvh, env, light, &ray)
}

/// A one-shot render command.
///
/// Owns everything a render needs; `render` consumes it, so a request cannot
/// be replayed against a stale acceleration structure.
pub struct RenderRequest {
    pub scene: Scene,
    pub camera: Camera,
    pub light: PointLight,
    pub env: Option<EnvMap>,
    pub width: u32,
    pub height: u32,
}

/// Render a full frame.
///
/// Builds the BVH once, then shades rows in parallel: every pixel reads only
/// the immutable scene, BVH and environment map and writes its own slot, so
/// no locking is needed.
pub fn render(request: RenderRequest) -> Framebuffer {
    let RenderRequest {
        scene,
        camera,
        light,
        env,
        width,
        height,
    } = request;

    let start = std::time::Instant::now();
    let bvh = Bvh::build(&scene);
    log::info!(
        "BVH over {} triangles built in {:.1?}",
        scene.triangle_count(),
        start.elapsed()
    );

    let mut frame = Framebuffer::new(width, height);
    if width == 0 || height == 0 {
        log::warn!("Degenerate render target {}x{}, nothing to do", width, height);
        return frame;
    }
    let env = env.as_ref();

    let start = std::time::Instant::now();
    frame
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(
                    &scene,
                    &bvh,
                    env,
                    &camera,
                    &light,
                    x as u32,
                    y as u32,
                    width,
                    height,
                );
            }
        });
    log::info!("Rendered {}x{} in {:.1?}", width, height, start.elapsed());

    frame
}
