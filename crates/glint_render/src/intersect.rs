//! Ray/triangle intersection.
//!
//! Möller-Trumbore: barycentric coordinates and hit distance computed
//! directly from edge vectors, no precomputed plane equation.

use glint_core::Triangle;
use glint_math::Ray;

/// Epsilon shared by the parallel-plane rejection and the minimum hit
/// distance guarding against self-intersection at the ray origin.
const EPS: f32 = 1e-7;

/// A raw ray/triangle intersection: distance plus barycentric (u, v).
///
/// The third barycentric weight is `1 - u - v`; the caller blends vertex
/// normals with it to get the shading normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

/// Intersect a ray with a triangle.
///
/// Boundary values u = 0, u = 1, v = 0 and u + v = 1 are all accepted, so a
/// ray grazing the shared edge of two triangles cannot slip between them.
/// Hits at `t <= EPS` are rejected.
pub fn ray_triangle(ray: &Ray, tri: &Triangle) -> Option<TriangleHit> {
    let e1 = tri.p1 - tri.p0;
    let e2 = tri.p2 - tri.p0;

    let pvec = ray.direction.cross(e2);
    let det = e1.dot(pvec);

    // Ray parallel to the triangle plane
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - tri.p0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(e1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(qvec) * inv_det;
    if t > EPS {
        Some(TriangleHit { t, u, v })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    fn tri(p0: Vec3, p1: Vec3, p2: Vec3) -> Triangle {
        let n = (p1 - p0).cross(p2 - p0).normalize();
        Triangle {
            p0,
            p1,
            p2,
            n0: n,
            n1: n,
            n2: n,
            mat_id: 0,
        }
    }

    #[test]
    fn test_hit_center() {
        let t = tri(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let hit = ray_triangle(&ray, &t).unwrap();

        assert!((hit.t - 1.0).abs() < 1e-5);
        assert!(hit.u >= 0.0 && hit.v >= 0.0 && hit.u + hit.v <= 1.0);
    }

    #[test]
    fn test_miss_outside() {
        let t = tri(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        );

        // Aimed past the triangle's corner
        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, 2.0, -1.0).normalize());
        assert!(ray_triangle(&ray, &t).is_none());
    }

    #[test]
    fn test_parallel_ray_rejected() {
        let t = tri(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        );

        // Ray lies in a plane parallel to the triangle
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.5), Vec3::X);
        assert!(ray_triangle(&ray, &t).is_none());
    }

    #[test]
    fn test_behind_origin_rejected() {
        let t = tri(
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        );

        // Triangle behind the ray origin
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(ray_triangle(&ray, &t).is_none());
    }

    #[test]
    fn test_barycentric_vertices() {
        let t = tri(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        );

        // Aimed at p1: u ~ 1, v ~ 0
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray_triangle(&ray, &t).unwrap();
        assert!((hit.u - 1.0).abs() < 1e-5);
        assert!(hit.v.abs() < 1e-5);

        // Aimed at p2: u ~ 0, v ~ 1
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = ray_triangle(&ray, &t).unwrap();
        assert!(hit.u.abs() < 1e-5);
        assert!((hit.v - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shared_edge_watertight() {
        use crate::bvh::Bvh;
        use glint_core::Scene;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            // Random shared edge between a and b, third vertices on opposite
            // sides
            let a = Vec3::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5, -2.0);
            let b = Vec3::new(
                a.x + 0.5 + rng.gen::<f32>(),
                a.y + 0.5 + rng.gen::<f32>(),
                -2.0,
            );
            let c = a + Vec3::new(1.0 + rng.gen::<f32>(), -1.0 - rng.gen::<f32>(), 0.0);
            let d = a + Vec3::new(-1.0 - rng.gen::<f32>(), 1.0 + rng.gen::<f32>(), 0.0);

            let t0 = tri(a, b, c);
            let t1 = tri(b, a, d);

            // Aim at the exact midpoint of the shared edge
            let mid = (a + b) * 0.5;
            let origin = Vec3::new(mid.x, mid.y, 0.0);
            let ray = Ray::new(origin, (mid - origin).normalize());

            let h0 = ray_triangle(&ray, &t0);
            let h1 = ray_triangle(&ray, &t1);

            // The edge must be watertight: the ray can never fall between
            // the two triangles
            assert!(
                h0.is_some() || h1.is_some(),
                "ray through shared edge missed both triangles"
            );

            // Any reported hit is on the edge at the expected distance
            for h in [h0, h1].into_iter().flatten() {
                assert!((h.t - 2.0).abs() < 1e-3);
            }

            // The nearest-hit query over both triangles resolves the graze
            // to exactly one hit record at that distance
            let mut scene = Scene::new();
            scene.push(t0);
            scene.push(t1);
            let hit = Bvh::build(&scene)
                .intersect(&scene, &ray, f32::INFINITY)
                .expect("nearest-hit query missed the shared edge");
            assert!((hit.t - 2.0).abs() < 1e-3);
        }
    }
}
