//! Scene representation for the ray tracer.
//!
//! A `Scene` is a flat triangle soup plus an index-addressed material table.
//! Triangles are world-space copies made at assembly time, so the scene is
//! immutable for the lifetime of any acceleration structure built from it.

use glint_math::{Aabb, Mat3, Mat4, Vec3};

/// A surface material.
#[derive(Clone, Copy, Debug)]
pub struct Material {
    /// Diffuse/albedo color (RGB, 0-1)
    pub albedo: Vec3,

    /// Shadow-catcher flag. Currently inert, reserved for compositing use.
    pub shadow_catcher: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::splat(0.8), // Grey default
            shadow_catcher: false,
        }
    }
}

impl Material {
    /// Create a material with the given albedo.
    pub fn new(albedo: Vec3) -> Self {
        Self {
            albedo,
            shadow_catcher: false,
        }
    }
}

/// A world-space triangle with per-vertex shading normals.
///
/// Vertex normals are stored as supplied (not renormalized per face), so a
/// hit interpolates smoothly varying shading normals even though the
/// underlying geometry is flat-faceted.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub n0: Vec3,
    pub n1: Vec3,
    pub n2: Vec3,
    /// Index into the scene's material table.
    pub mat_id: usize,
}

impl Triangle {
    /// Tight axis-aligned bounds of the triangle.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_triangle(self.p0, self.p1, self.p2)
    }

    /// The centroid (mean of the three vertices).
    pub fn centroid(&self) -> Vec3 {
        (self.p0 + self.p1 + self.p2) * (1.0 / 3.0)
    }
}

/// A single point light.
#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl PointLight {
    /// Create a white light with the given position and intensity.
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            color: Vec3::ONE,
            intensity,
        }
    }
}

/// A complete scene: ordered triangles plus index-addressed materials.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Triangle soup in world space
    pub triangles: Vec<Triangle>,

    /// Materials addressed by `Triangle::mat_id`
    pub materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a material and return its id.
    pub fn add_material(&mut self, material: Material) -> usize {
        let id = self.materials.len();
        self.materials.push(material);
        id
    }

    /// Append a single triangle.
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Look up a material by id.
    ///
    /// An out-of-range id degrades to the default grey material rather than
    /// panicking, so a malformed scene still renders.
    pub fn material(&self, id: usize) -> Material {
        self.materials.get(id).copied().unwrap_or_default()
    }

    /// Number of triangles in the scene.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the scene contains no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append an indexed mesh, transformed into world space.
    ///
    /// Positions are transformed by `model`; normals by the inverse-transpose
    /// of its upper 3x3, then normalized. `indices` holds triangle vertex
    /// indices in triples; a trailing partial triple is ignored.
    pub fn append_mesh(
        &mut self,
        positions: &[Vec3],
        normals: &[Vec3],
        indices: &[u32],
        model: Mat4,
        mat_id: usize,
    ) {
        let normal_mat = Mat3::from_mat4(model).inverse().transpose();

        for tri in indices.chunks_exact(3) {
            let p = |i: u32| model.transform_point3(positions[i as usize]);
            let n = |i: u32| (normal_mat * normals[i as usize]).normalize();

            self.triangles.push(Triangle {
                p0: p(tri[0]),
                p1: p(tri[1]),
                p2: p(tri[2]),
                n0: n(tri[0]),
                n1: n(tri[1]),
                n2: n(tri[2]),
                mat_id,
            });
        }
    }

    /// World-space bounds of the whole triangle set.
    pub fn bounds(&self) -> Aabb {
        self.triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, t| acc.union(&t.bounds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_mesh() -> (Vec<Vec3>, Vec<Vec3>, Vec<u32>) {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let normals = vec![Vec3::Z; 4];
        let indices = vec![0, 1, 2, 0, 2, 3];
        (positions, normals, indices)
    }

    #[test]
    fn test_append_mesh_identity() {
        let (positions, normals, indices) = quad_mesh();

        let mut scene = Scene::new();
        let mat = scene.add_material(Material::new(Vec3::new(0.6, 0.45, 0.25)));
        scene.append_mesh(&positions, &normals, &indices, Mat4::IDENTITY, mat);

        assert_eq!(scene.triangle_count(), 2);
        assert_eq!(scene.triangles[0].p1, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(scene.triangles[1].mat_id, mat);
    }

    #[test]
    fn test_append_mesh_transforms_normals() {
        let (positions, normals, indices) = quad_mesh();

        // Non-uniform scale: normals must use the inverse-transpose, not the
        // model matrix itself
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));

        let mut scene = Scene::new();
        scene.append_mesh(&positions, &normals, &indices, model, 0);

        let n = scene.triangles[0].n0;
        assert!((n - Vec3::Z).length() < 1e-5);
        assert!((n.length() - 1.0).abs() < 1e-5);

        // Positions scale along X
        assert_eq!(scene.triangles[0].p1.x, 2.0);
    }

    #[test]
    fn test_material_lookup_degrades() {
        let scene = Scene::new();
        let mat = scene.material(42);
        assert_eq!(mat.albedo, Vec3::splat(0.8));
    }

    #[test]
    fn test_triangle_helpers() {
        let tri = Triangle {
            p0: Vec3::ZERO,
            p1: Vec3::new(3.0, 0.0, 0.0),
            p2: Vec3::new(0.0, 3.0, 0.0),
            n0: Vec3::Z,
            n1: Vec3::Z,
            n2: Vec3::Z,
            mat_id: 0,
        };

        assert_eq!(tri.centroid(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(tri.bounds().min, Vec3::ZERO);
        assert_eq!(tri.bounds().max, Vec3::new(3.0, 3.0, 0.0));
    }

    #[test]
    fn test_scene_bounds_empty() {
        let scene = Scene::new();
        let b = scene.bounds();
        assert!(b.min.x > b.max.x);
    }
}
