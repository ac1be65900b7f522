//! Glint render - offline CPU ray tracing.
//!
//! Builds a flat-arena BVH over a triangle scene, casts primary and shadow
//! rays against it, and shades hits with a single-light direct-lighting model
//! plus an environment-map background.

mod bvh;
mod framebuffer;
mod integrator;
mod intersect;

pub use bvh::{Bvh, BvhNode, Hit};
pub use framebuffer::{tone_map, Framebuffer};
pub use integrator::{background, occluded, ray_color, render, render_pixel, RenderRequest};
pub use intersect::{ray_triangle, TriangleHit};

/// Re-export common math and scene types
pub use glint_core::{Camera, EnvMap, Material, PointLight, Scene, Triangle};
pub use glint_math::{Aabb, Interval, Ray, Vec3};
