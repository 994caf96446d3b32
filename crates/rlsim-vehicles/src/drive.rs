//! Ground driving: throttle, brake and steering inputs for the vehicle helper.

use rlsim_core::consts::*;

use crate::controls::CarControls;
use crate::curve::LinearPieceCurve;

const STEER_CURVE: LinearPieceCurve<6> = LinearPieceCurve::new(STEER_ANGLE_FROM_SPEED);
const DRIVEN_WHEELS: f32 = 4.0;

/// Per-wheel inputs handed to the vehicle helper for one tick (engine units).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DriveInput {
    /// Drive force on each wheel. Mutually exclusive with `brake`.
    pub engine_force: f32,
    /// Braking impulse cap on each wheel.
    pub brake: f32,
    /// Steering angle for the front wheels (radians, positive turns left).
    pub steer_angle: f32,
    /// Back-wheel friction multiplier (handbrake).
    pub back_friction_scale: f32,
}

/// Largest steering angle at the given absolute forward speed (uu/s).
pub fn max_steer_angle(forward_speed: f32) -> f32 {
    STEER_CURVE.get(forward_speed.abs())
}

/// Map a controls snapshot to wheel inputs. `forward_speed` is in uu/s along the car's nose.
pub fn drive_input(controls: &CarControls, forward_speed: f32) -> DriveInput {
    let c = controls.clamped();
    let abs_speed = forward_speed.abs();

    let full_drive = CAR_MASS_BT * THROTTLE_ACCEL * UU_TO_BT / DRIVEN_WHEELS;
    let full_brake = CAR_MASS_BT * BRAKE_ACCEL * UU_TO_BT * TICK_TIME / DRIVEN_WHEELS;

    let (mut engine_force, mut brake) = (0.0, 0.0);
    if c.throttle.abs() >= THROTTLE_DEADZONE {
        let against_motion = abs_speed > STOPPING_FORWARD_VEL && c.throttle.signum() != forward_speed.signum();
        if against_motion {
            brake = full_brake;
        } else {
            engine_force = c.throttle * full_drive;
        }
    } else if abs_speed < STOPPING_FORWARD_VEL {
        brake = full_brake;
    } else {
        brake = full_brake * COASTING_BRAKE_FACTOR;
    }

    DriveInput {
        engine_force,
        brake,
        steer_angle: -c.steer * max_steer_angle(forward_speed),
        back_friction_scale: if c.handbrake { HANDBRAKE_FRICTION_SCALE } else { 1.0 },
    }
}
