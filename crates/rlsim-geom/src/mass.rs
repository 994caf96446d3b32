use rlsim_core::types::{Isometry, Vec3};
use serde::{Deserialize, Serialize};
use crate::shape::{aabb_of, Shape};

/// Surface response of a collider.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material { pub friction: f32, pub restitution: f32 }

impl Default for Material {
    fn default() -> Self { Self { friction: 0.5, restitution: 0.0 } }
}

fn box_inertia(half: Vec3, mass: f32) -> Vec3 {
    let dims = half * 2.0;
    let x2 = dims.x * dims.x;
    let y2 = dims.y * dims.y;
    let z2 = dims.z * dims.z;
    Vec3::new(
        (1.0/12.0) * mass * (y2 + z2),
        (1.0/12.0) * mass * (x2 + z2),
        (1.0/12.0) * mass * (x2 + y2),
    )
}

/// Principal local inertia about the body origin.
///
/// Compounds are approximated by the box inertia of their local AABB extents;
/// child offsets move the AABB but do not change its size, so a translated
/// hitbox keeps the same inertia as a centred one.
pub fn local_inertia(shape: &Shape, mass: f32) -> Vec3 {
    match shape {
        Shape::Sphere { r } => Vec3::splat(0.4 * mass * r * r),
        Shape::Box { hx, hy, hz } => box_inertia(Vec3::new(*hx, *hy, *hz), mass),
        Shape::Plane { .. } => Vec3::ZERO,
        Shape::Compound { .. } => {
            let aabb = aabb_of(shape, &Isometry::default());
            box_inertia(aabb.half_extents(), mass)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rlsim_core::vec3;

    #[test]
    fn offset_does_not_change_compound_inertia() {
        let child = Shape::Box { hx: 1.0, hy: 0.5, hz: 0.25 };
        let centred = Shape::single_child_compound(Isometry::default(), child.clone());
        let shifted = Shape::single_child_compound(Isometry::from_translation(vec3(0.3, 0.0, 0.4)), child.clone());
        let a = local_inertia(&centred, 180.0);
        let b = local_inertia(&shifted, 180.0);
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-4);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-4);
        assert_relative_eq!(a.x, local_inertia(&child, 180.0).x, epsilon = 1e-4);
    }

    #[test]
    fn sphere_inertia() {
        let i = local_inertia(&Shape::Sphere { r: 2.0 }, 30.0);
        assert_relative_eq!(i.x, 0.4 * 30.0 * 4.0);
        assert_relative_eq!(i.z, i.y);
    }

    #[test]
    fn longest_axis_has_smallest_moment() {
        let i = local_inertia(&Shape::Box { hx: 2.0, hy: 1.0, hz: 0.5 }, 10.0);
        assert!(i.x < i.y && i.y < i.z);
    }
}
