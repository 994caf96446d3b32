//! Airborne inputs: air control, the second-jump decision and dodge impulses.
//!
//! Car-local axes: `+x` nose, `+y` left, `+z` roof. Angular quantities are
//! rad/s about those axes.

use rlsim_core::consts::*;
use rlsim_core::{vec3, Vec3};

use crate::controls::CarControls;

/// What a jump press in the air turns into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SecondJump {
    /// Stick inside the deadzone: straight upward impulse.
    DoubleJump,
    /// Stick outside the deadzone: directional dodge.
    Dodge {
        /// Horizontal dodge direction, car-local, unit length.
        dir: Vec3,
    },
}

/// Classify an air jump against the car's dodge deadzone.
pub fn second_jump(controls: &CarControls, dodge_deadzone: f32) -> SecondJump {
    let c = controls.clamped();
    if c.max_rotation_input() < dodge_deadzone {
        return SecondJump::DoubleJump;
    }
    // Stick forward (negative pitch) dodges toward the nose; yaw right dodges toward -y.
    let dir = vec3(-c.pitch, -(c.yaw + c.roll), 0.0);
    if dir.length_squared() <= f32::EPSILON {
        return SecondJump::DoubleJump;
    }
    SecondJump::Dodge { dir: dir.normalize() }
}

/// Car-local angular velocity kicked in by a dodge toward `dir`.
pub fn dodge_spin(dir: Vec3) -> Vec3 {
    // Forward dodge pitches the nose down (+y rotation); a right dodge rolls right (+x).
    vec3(-dir.y, dir.x, 0.0) * FLIP_ANGULAR_SPEED
}

/// Car-local angular velocity change for one tick of air control.
///
/// Roll damping always applies; pitch and yaw damping fade out as the
/// matching input approaches full deflection.
pub fn air_control_delta(controls: &CarControls, ang_vel_local: Vec3, dt: f32) -> Vec3 {
    let c = controls.clamped();
    let [t_pitch, t_yaw, t_roll] = CAR_AIR_CONTROL_TORQUE;
    let [d_pitch, d_yaw, d_roll] = CAR_AIR_CONTROL_DAMPING;

    // Nose up is a rotation about -y; yaw right about -z; roll right about +x.
    let torque = vec3(c.roll * t_roll, -c.pitch * t_pitch, -c.yaw * t_yaw);
    let damping = vec3(
        d_roll * ang_vel_local.x,
        d_pitch * (1.0 - c.pitch.abs()) * ang_vel_local.y,
        d_yaw * (1.0 - c.yaw.abs()) * ang_vel_local.z,
    );
    (torque - damping) * dt
}
