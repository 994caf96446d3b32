use glam::{Vec3A, Mat3A, Quat};
use serde::{Deserialize, Serialize};
use crate::Scalar;

pub type Vec3 = Vec3A;
pub type Mat3 = Mat3A;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn iso(pos: Vec3, rot: Quat) -> Isometry { Isometry { pos, rot } }

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Isometry { pub pos: Vec3, pub rot: Quat }

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity { pub lin: Vec3, pub ang: Vec3 }

impl Default for Isometry {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

impl Isometry {
    #[inline] pub fn from_translation(pos: Vec3) -> Self { Self { pos, rot: Quat::IDENTITY } }
    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.pos + self.rot * p }
    #[inline] pub fn transform_vector(&self, v: Vec3) -> Vec3 { self.rot * v }
}

/// Pose and velocity of a rigid body, in whatever unit system the owner uses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysState {
    pub pose: Isometry,
    pub vel: Velocity,
}

impl PhysState {
    #[inline] pub fn at_rest(pos: Vec3) -> Self {
        Self { pose: Isometry::from_translation(pos), vel: Velocity::default() }
    }

    /// Same state with every length scaled by `k` (rotation and angular velocity unchanged).
    #[inline] pub fn scaled(self, k: Scalar) -> Self {
        Self {
            pose: Isometry { pos: self.pose.pos * k, rot: self.pose.rot },
            vel: Velocity { lin: self.vel.lin * k, ang: self.vel.ang },
        }
    }
}

/// Orientation as three basis vectors: where the body's local X, Y and Z axes point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotMat {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for RotMat {
    fn default() -> Self { Self::IDENTITY }
}

impl RotMat {
    pub const IDENTITY: Self = Self { forward: Vec3::X, right: Vec3::Y, up: Vec3::Z };

    #[inline] pub fn from_quat(q: Quat) -> Self {
        Self { forward: q * Vec3::X, right: q * Vec3::Y, up: q * Vec3::Z }
    }
    #[inline] pub fn to_quat(&self) -> Quat {
        Quat::from_mat3a(&Mat3A::from_cols(self.forward, self.right, self.up)).normalize()
    }
}

/// Euler-style orientation: yaw about world Z, then pitch (nose up positive), then roll about forward.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub yaw: Scalar,
    pub pitch: Scalar,
    pub roll: Scalar,
}

impl Angle {
    pub fn new(yaw: Scalar, pitch: Scalar, roll: Scalar) -> Self { Self { yaw, pitch, roll } }

    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_z(self.yaw) * Quat::from_rotation_y(-self.pitch) * Quat::from_rotation_x(self.roll)
    }

    pub fn to_rot_mat(&self) -> RotMat { RotMat::from_quat(self.to_quat()) }

    pub fn from_rot_mat(mat: &RotMat) -> Self {
        let f = mat.forward;
        let yaw = f.y.atan2(f.x);
        let pitch = f.z.atan2((f.x * f.x + f.y * f.y).sqrt());

        let no_roll = Angle { yaw, pitch, roll: 0.0 }.to_rot_mat();
        let cos_roll = mat.up.dot(no_roll.up);
        let sin_roll = -mat.up.dot(no_roll.right);
        Self { yaw, pitch, roll: sin_roll.atan2(cos_roll) }
    }

    pub fn forward_vector(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cp * cy, cp * sy, sp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn angle_survives_rot_mat_round_trip() {
        let a = Angle::new(0.7, -0.3, 1.1);
        let b = Angle::from_rot_mat(&a.to_rot_mat());
        assert_relative_eq!(a.yaw, b.yaw, epsilon = 1e-4);
        assert_relative_eq!(a.pitch, b.pitch, epsilon = 1e-4);
        assert_relative_eq!(a.roll, b.roll, epsilon = 1e-4);
    }

    #[test]
    fn positive_pitch_raises_the_nose() {
        let fwd = Angle::new(0.0, 0.5, 0.0).to_rot_mat().forward;
        assert!(fwd.z > 0.0);
        let v = Angle::new(0.0, 0.5, 0.0).forward_vector();
        assert_relative_eq!(fwd.z, v.z, epsilon = 1e-5);
        assert_relative_eq!(fwd.x, v.x, epsilon = 1e-5);
    }

    #[test]
    fn rot_mat_quat_identity() {
        let q = RotMat::IDENTITY.to_quat();
        assert_relative_eq!(q.angle_between(Quat::IDENTITY), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn scaled_keeps_rotation() {
        let s = PhysState {
            pose: iso(vec3(1.0, 2.0, 3.0), Quat::from_rotation_z(0.4)),
            vel: Velocity { lin: vec3(10.0, 0.0, 0.0), ang: vec3(0.0, 0.0, 2.0) },
        };
        let k = s.scaled(50.0);
        assert_eq!(k.pose.pos, vec3(50.0, 100.0, 150.0));
        assert_eq!(k.pose.rot, s.pose.rot);
        assert_eq!(k.vel.lin, vec3(500.0, 0.0, 0.0));
        assert_eq!(k.vel.ang, s.vel.ang);
    }
}
