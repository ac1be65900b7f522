//! Glint core - scene data model for the offline ray tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Triangle`, `Material`, `PointLight`
//! - **Camera**: primary-ray generation from an inverse-view matrix
//! - **Environment map**: equirectangular HDR background sampling
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Camera, PointLight, Scene};
//!
//! let mut scene = Scene::new();
//! let mat = scene.add_material(Default::default());
//! scene.append_mesh(&positions, &normals, &indices, model, mat);
//! ```

pub mod camera;
pub mod envmap;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use envmap::{EnvMap, EnvMapError};
pub use scene::{Material, PointLight, Scene, Triangle};
