//! Demo scene assembly.
//!
//! Small faceted meshes placed with world transforms, standing in for the
//! host application's mesh ingestion. Everything lands in the scene as
//! world-space triangle copies via `Scene::append_mesh`.

use glint_core::{Material, Scene};
use glint_math::{Mat4, Quat, Vec3};

/// A unit quad in the XZ plane, normals up.
fn quad() -> (Vec<Vec3>, Vec<Vec3>, Vec<u32>) {
    let positions = vec![
        Vec3::new(-0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, -0.5),
        Vec3::new(0.5, 0.0, 0.5),
        Vec3::new(-0.5, 0.0, 0.5),
    ];
    let normals = vec![Vec3::Y; 4];
    let indices = vec![0, 2, 1, 0, 3, 2];
    (positions, normals, indices)
}

/// A unit cube with per-face normals (24 vertices, faceted shading).
fn cube() -> (Vec<Vec3>, Vec<Vec3>, Vec<u32>) {
    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    // (normal, up, right) with right x up = normal, so the default winding
    // faces outward
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y, Vec3::Z),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::Z, Vec3::X),
        (Vec3::Z, Vec3::Y, Vec3::X),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];

    for (normal, up, right) in faces {
        let base = positions.len() as u32;
        let center = normal * 0.5;
        positions.push(center - up * 0.5 - right * 0.5);
        positions.push(center - up * 0.5 + right * 0.5);
        positions.push(center + up * 0.5 + right * 0.5);
        positions.push(center + up * 0.5 - right * 0.5);
        normals.extend_from_slice(&[normal; 4]);
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (positions, normals, indices)
}

/// A unit octahedron with smooth (position-derived) vertex normals.
fn octahedron() -> (Vec<Vec3>, Vec<Vec3>, Vec<u32>) {
    let positions = vec![
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let normals = positions.clone();
    let indices = vec![
        4, 0, 2, 0, 5, 2, 5, 1, 2, 1, 4, 2, // upper pyramid
        0, 4, 3, 5, 0, 3, 1, 5, 3, 4, 1, 3, // lower pyramid
    ];
    (positions, normals, indices)
}

/// Assemble the demo scene: a ground plane, a stage block and two smooth
/// props on top of it.
pub fn build_scene() -> Scene {
    let mut scene = Scene::new();

    let mat_ground = scene.add_material(Material::new(Vec3::splat(0.8)));
    let mat_rock = scene.add_material(Material::new(Vec3::splat(0.65)));
    let mat_wood = scene.add_material(Material::new(Vec3::new(0.6, 0.45, 0.25)));
    let mat_green = scene.add_material(Material::new(Vec3::new(0.35, 0.75, 0.35)));

    let (qp, qn, qi) = quad();
    scene.append_mesh(&qp, &qn, &qi, Mat4::from_scale(Vec3::splat(20.0)), mat_ground);

    let (cp, cn, ci) = cube();
    // Stage block the props stand on
    scene.append_mesh(
        &cp,
        &cn,
        &ci,
        Mat4::from_scale_rotation_translation(
            Vec3::new(3.0, 0.4, 2.0),
            Quat::IDENTITY,
            Vec3::new(0.0, 0.2, 0.0),
        ),
        mat_wood,
    );
    // A tilted rock off to the side
    scene.append_mesh(
        &cp,
        &cn,
        &ci,
        Mat4::from_scale_rotation_translation(
            Vec3::splat(0.5),
            Quat::from_rotation_y(0.6),
            Vec3::new(-1.0, 0.65, 0.3),
        ),
        mat_rock,
    );

    let (op, on, oi) = octahedron();
    scene.append_mesh(
        &op,
        &on,
        &oi,
        Mat4::from_scale_rotation_translation(
            Vec3::splat(0.6),
            Quat::from_rotation_y(0.3),
            Vec3::new(0.8, 1.0, -0.2),
        ),
        mat_green,
    );

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_assembles() {
        let scene = build_scene();

        // quad (2) + two cubes (12 each) + octahedron (8)
        assert_eq!(scene.triangle_count(), 34);

        // All material ids resolve
        for tri in &scene.triangles {
            assert!(tri.mat_id < scene.materials.len());
        }
    }

    #[test]
    fn test_cube_winding_faces_outward() {
        let (positions, normals, indices) = cube();

        for tri in indices.chunks_exact(3) {
            let p0 = positions[tri[0] as usize];
            let p1 = positions[tri[1] as usize];
            let p2 = positions[tri[2] as usize];
            let geometric = (p1 - p0).cross(p2 - p0).normalize();
            let shading = normals[tri[0] as usize];
            assert!(
                geometric.dot(shading) > 0.99,
                "face winding disagrees with its normal"
            );
        }
    }
}
