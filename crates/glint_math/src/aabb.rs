use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Represented by component-wise min/max corners. The empty box uses
/// +inf/-inf sentinels so that a union with any box yields that box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty AABB (min > max on every axis, contains nothing).
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Tight bounds of a triangle given its three vertices.
    pub fn from_triangle(p0: Vec3, p1: Vec3, p2: Vec3) -> Self {
        Self {
            min: p0.min(p1).min(p2),
            max: p0.max(p1).max(p2),
        }
    }

    /// The smallest AABB containing both boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Extend the box to contain a point.
    pub fn grow(&self, p: Vec3) -> Aabb {
        Aabb {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// The center point of the box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Per-axis extents (max - min).
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index (0=X, 1=Y, 2=Z) of the axis with the largest extent.
    ///
    /// Comparisons run X -> Y -> Z with strict `>`, so a later axis only
    /// wins when it is strictly larger.
    pub fn longest_extent_axis(&self) -> usize {
        let ext = self.extent();
        let mut axis = 0;
        if ext.y > ext.x {
            axis = 1;
        }
        if ext.z > ext[axis] {
            axis = 2;
        }
        axis
    }

    /// Slab test: the parametric interval over which a ray overlaps the box.
    ///
    /// For axis-parallel rays (|d| < 1e-12) the slab contributes no bound;
    /// the ray intersects only if its origin lies within [min, max] on that
    /// axis. Returns `None` when the running interval becomes empty. The
    /// caller decides whether a behind-the-origin interval is usable.
    pub fn slab(&self, ray: &Ray) -> Option<Interval> {
        let mut t = Interval::UNIVERSE;

        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let span = Interval::new(self.min[axis], self.max[axis]);

            if d.abs() < 1e-12 {
                // Ray parallel to slab: must be inside the slab to intersect
                if !span.contains(o) {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / d;
            let t0 = (span.min - o) * inv_d;
            let t1 = (span.max - o) * inv_d;
            t = t.narrow(Interval::new(t0.min(t1), t0.max(t1)));

            if t.is_empty() {
                return None;
            }
        }

        Some(t)
    }
}
