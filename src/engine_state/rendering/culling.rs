//! View culling primitives.
//!
//! The world never does camera math itself. It only asks a [`Visibility`]
//! whether a chunk's bounding box can be seen, so any camera representation
//! can drive drawing. [`Frustum`] implements the usual test against the six
//! planes of a view-projection matrix.

use cgmath::{InnerSpace, Matrix4, Vector3, Vector4};

/// Axis-aligned bounding box stored as center and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vector3<f32>,
    pub extents: Vector3<f32>,
}

impl Aabb {
    pub fn new(center: Vector3<f32>, extents: Vector3<f32>) -> Self {
        Aabb { center, extents }
    }

    pub fn min(&self) -> Vector3<f32> {
        self.center - self.extents
    }

    pub fn max(&self) -> Vector3<f32> {
        self.center + self.extents
    }

    /// Overlap test, touching boxes included.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x
            && a_max.x >= b_min.x
            && a_min.y <= b_max.y
            && a_max.y >= b_min.y
            && a_min.z <= b_max.z
            && a_max.z >= b_min.z
    }
}

/// Decides whether a bounding box is worth drawing.
pub trait Visibility {
    fn intersects(&self, bounds: &Aabb) -> bool;
}

/// Draws everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllVisible;

impl Visibility for AllVisible {
    fn intersects(&self, _bounds: &Aabb) -> bool {
        true
    }
}

impl Visibility for Aabb {
    fn intersects(&self, bounds: &Aabb) -> bool {
        Aabb::intersects(self, bounds)
    }
}

/// A plane `normal · p + distance = 0`, normal pointing inside the frustum.
#[derive(Debug, Clone, Copy)]
struct Plane {
    normal: Vector3<f32>,
    distance: f32,
}

impl Plane {
    fn from_row(row: Vector4<f32>) -> Self {
        let normal = Vector3::new(row.x, row.y, row.z);
        let len = normal.magnitude();
        Plane {
            normal: normal / len,
            distance: row.w / len,
        }
    }
}

/// The six clip planes of a view-projection matrix.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Extracts the planes from a combined view-projection matrix.
    pub fn from_view_proj(vp: Matrix4<f32>) -> Self {
        let row = |i: usize| Vector4::new(vp.x[i], vp.y[i], vp.z[i], vp.w[i]);
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));
        Frustum {
            planes: [
                Plane::from_row(r3 + r0), // left
                Plane::from_row(r3 - r0), // right
                Plane::from_row(r3 + r1), // bottom
                Plane::from_row(r3 - r1), // top
                Plane::from_row(r3 + r2), // near
                Plane::from_row(r3 - r2), // far
            ],
        }
    }
}

impl Visibility for Frustum {
    fn intersects(&self, bounds: &Aabb) -> bool {
        let (min, max) = (bounds.min(), bounds.max());
        self.planes.iter().all(|plane| {
            // corner furthest along the plane normal
            let p = Vector3::new(
                if plane.normal.x >= 0.0 { max.x } else { min.x },
                if plane.normal.y >= 0.0 { max.y } else { min.y },
                if plane.normal.z >= 0.0 { max.z } else { min.z },
            );
            plane.normal.dot(p) + plane.distance >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{ortho, SquareMatrix};

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::new(Vector3::new(x, y, z), Vector3::new(0.5, 0.5, 0.5))
    }

    #[test]
    fn boxes_touching_on_a_face_intersect() {
        assert!(unit_box_at(0.0, 0.0, 0.0).intersects(&unit_box_at(1.0, 0.0, 0.0)));
        assert!(!unit_box_at(0.0, 0.0, 0.0).intersects(&unit_box_at(1.5, 0.0, 0.0)));
    }

    #[test]
    fn identity_frustum_is_the_clip_cube() {
        let frustum = Frustum::from_view_proj(Matrix4::identity());
        assert!(frustum.intersects(&unit_box_at(0.0, 0.0, 0.0)));
        assert!(frustum.intersects(&unit_box_at(1.2, 0.0, 0.0)));
        assert!(!frustum.intersects(&unit_box_at(3.0, 0.0, 0.0)));
    }

    #[test]
    fn orthographic_frustum_culls_far_chunks() {
        let frustum = Frustum::from_view_proj(ortho(0.0, 32.0, 0.0, 16.0, 0.1, 100.0));
        assert!(frustum.intersects(&Aabb::new(
            Vector3::new(7.5, 7.5, -10.0),
            Vector3::new(8.0, 8.0, 8.0)
        )));
        assert!(!frustum.intersects(&Aabb::new(
            Vector3::new(71.5, 7.5, -10.0),
            Vector3::new(8.0, 8.0, 8.0)
        )));
    }
}
