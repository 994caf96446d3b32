use rlsim_core::types::{Isometry, Mat3, Vec3};
use serde::{Deserialize, Serialize};
use crate::aabb::Aabb;

/// Engine-independent description of a collision shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Sphere { r: f32 },
    Box { hx: f32, hy: f32, hz: f32 },
    /// Static half-space `{ p : p·normal <= offset }`.
    Plane { normal: Vec3, offset: f32 },
    /// Convex children placed at local poses.
    Compound { children: Vec<(Isometry, Shape)> },
}

impl Shape {
    #[inline] pub fn cuboid(half: Vec3) -> Self { Shape::Box { hx: half.x, hy: half.y, hz: half.z } }

    /// A compound holding a single child at `offset`.
    pub fn single_child_compound(offset: Isometry, child: Shape) -> Self {
        Shape::Compound { children: vec![(offset, child)] }
    }

    #[inline] pub fn is_convex(&self) -> bool { matches!(self, Shape::Sphere { .. } | Shape::Box { .. }) }
}

#[inline]
pub fn aabb_of(shape: &Shape, xf: &Isometry) -> Aabb {
    match shape {
        Shape::Sphere { r } => Aabb::from_center_half_extents(xf.pos, Vec3::splat(*r)),
        Shape::Box { hx, hy, hz } => {
            let he = Vec3::new(*hx, *hy, *hz);
            let rot = Mat3::from_quat(xf.rot);
            let m = Mat3::from_cols(rot.x_axis.abs(), rot.y_axis.abs(), rot.z_axis.abs());
            let world_he = m * he;
            Aabb::from_center_half_extents(xf.pos, world_he)
        }
        Shape::Plane { .. } => Aabb::everything(),
        Shape::Compound { children } => {
            let mut out: Option<Aabb> = None;
            for (local, child) in children {
                let child_xf = Isometry { pos: xf.transform_point(local.pos), rot: xf.rot * local.rot };
                let a = aabb_of(child, &child_xf);
                out = Some(match out { Some(acc) => acc.union(&a), None => a });
            }
            out.unwrap_or(Aabb::from_center_half_extents(xf.pos, Vec3::ZERO))
        }
    }
}
