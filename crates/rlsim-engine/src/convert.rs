use rapier3d::na::{Isometry3, Point3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rlsim_core::types::{Isometry, Vec3};
use rlsim_core::Quat;

#[inline] pub fn to_na(v: Vec3) -> Vector3<f32> { Vector3::new(v.x, v.y, v.z) }
#[inline] pub fn to_na_point(v: Vec3) -> Point3<f32> { Point3::new(v.x, v.y, v.z) }
#[inline] pub fn from_na(v: &Vector3<f32>) -> Vec3 { Vec3::new(v.x, v.y, v.z) }
#[inline] pub fn from_na_point(p: &Point3<f32>) -> Vec3 { Vec3::new(p.x, p.y, p.z) }

#[inline] pub fn to_na_quat(q: Quat) -> UnitQuaternion<f32> {
    UnitQuaternion::new_normalize(Quaternion::new(q.w, q.x, q.y, q.z))
}
#[inline] pub fn from_na_quat(q: &UnitQuaternion<f32>) -> Quat {
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

#[inline] pub fn to_na_iso(x: &Isometry) -> Isometry3<f32> {
    Isometry3::from_parts(Translation3::new(x.pos.x, x.pos.y, x.pos.z), to_na_quat(x.rot))
}
