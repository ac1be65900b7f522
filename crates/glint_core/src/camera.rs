//! Camera for primary-ray generation.

use glint_math::{Mat4, Ray, Vec3};

/// A pinhole camera described by an inverse-view (camera-to-world) matrix.
///
/// Matches what an interactive host supplies: eye position, the inverse of
/// its view matrix, vertical field of view in degrees and aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub inv_view: Mat4,
    pub fov_y_degrees: f32,
    pub aspect: f32,
}

impl Camera {
    /// Create a camera directly from host-supplied parameters.
    pub fn new(position: Vec3, inv_view: Mat4, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            inv_view,
            fov_y_degrees,
            aspect,
        }
    }

    /// Create a camera looking from `eye` towards `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        let inv_view = Mat4::look_at_rh(eye, target, up).inverse();
        Self {
            position: eye,
            inv_view,
            fov_y_degrees,
            aspect,
        }
    }

    /// Generate the primary ray through the center of pixel (x, y).
    ///
    /// Pixel (0, 0) is the top-left corner. The camera-space direction is
    /// built from normalized device coordinates scaled by the field of view
    /// and aspect ratio, looking down -Z, then rotated into world space by
    /// the inverse-view matrix.
    pub fn primary_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let tan_half = (self.fov_y_degrees.to_radians() * 0.5).tan();

        let mut px = ((x as f32 + 0.5) / width as f32) * 2.0 - 1.0;
        let mut py = 1.0 - ((y as f32 + 0.5) / height as f32) * 2.0;
        px *= self.aspect * tan_half;
        py *= tan_half;

        let dir_cam = Vec3::new(px, py, -1.0).normalize();
        let dir = self.inv_view.transform_vector3(dir_cam).normalize();

        Ray::new(self.position, dir)
    }

    /// Camera-frame basis vectors in world space: (right, up, forward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let right = self.inv_view.col(0).truncate();
        let up = self.inv_view.col(1).truncate();
        let forward = -self.inv_view.col(2).truncate();
        (right, up, forward)
    }
}
