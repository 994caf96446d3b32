//! Game constants. Lengths are game units (uu) unless the name ends in `_BT`.

/// Engine units per game unit.
pub const UU_TO_BT: f32 = 1.0 / 50.0;
/// Game units per engine unit.
pub const BT_TO_UU: f32 = 50.0;

pub const TICK_RATE: u32 = 120;
pub const TICK_TIME: f32 = 1.0 / TICK_RATE as f32;

pub const GRAVITY_Z: f32 = -650.0;

pub const CAR_MASS_BT: f32 = 180.0;
pub const BALL_MASS_BT: f32 = CAR_MASS_BT / 6.0;

pub const BALL_COLLISION_RADIUS_SOCCAR: f32 = 91.25;
pub const BALL_COLLISION_RADIUS_HOOPS: f32 = 96.3831;
pub const BALL_COLLISION_RADIUS_DROPSHOT: f32 = 100.2565;

pub const BALL_FRICTION: f32 = 0.35;
pub const BALL_RESTITUTION: f32 = 0.6;
pub const CAR_WORLD_FRICTION: f32 = 0.3;
pub const CAR_WORLD_RESTITUTION: f32 = 0.3;

/// Distance from the field centre to the soccar goal line.
pub const SOCCAR_GOAL_LINE_Y: f32 = 5120.0;

pub const BOOST_MAX: f32 = 100.0;
pub const BOOST_SPAWN_AMOUNT: f32 = 100.0 / 3.0;
pub const BOOST_USED_PER_SECOND: f32 = 100.0 / 3.0;
pub const BOOST_ACCEL_GROUND: f32 = 2975.0 / 3.0;
pub const BOOST_ACCEL_AIR: f32 = 3175.0 / 3.0;

/// Full-throttle ground acceleration (uu/s^2), spread over four driven wheels.
pub const THROTTLE_ACCEL: f32 = 1600.0;
/// Full-brake deceleration (uu/s^2), spread over four wheels.
pub const BRAKE_ACCEL: f32 = 3500.0;
pub const COASTING_BRAKE_FACTOR: f32 = 0.15;
/// Below this forward speed (uu/s) any throttle drives rather than brakes.
pub const STOPPING_FORWARD_VEL: f32 = 25.0;
pub const THROTTLE_DEADZONE: f32 = 0.001;
pub const HANDBRAKE_FRICTION_SCALE: f32 = 0.4;

pub const JUMP_IMMEDIATE_FORCE: f32 = 875.0 / 3.0;
pub const JUMP_ACCEL: f32 = 4375.0 / 3.0;
pub const JUMP_MIN_TIME: f32 = 0.025;
pub const JUMP_MAX_TIME: f32 = 0.2;
pub const DOUBLE_JUMP_WINDOW: f32 = 1.25;
pub const DODGE_IMPULSE: f32 = 500.0;
pub const FLIP_TORQUE_TIME: f32 = 0.65;
/// Angular velocity (rad/s) kicked into the car by a dodge, per unit of input.
pub const FLIP_ANGULAR_SPEED: f32 = 5.5;
pub const DEFAULT_DODGE_DEADZONE: f32 = 0.5;

/// Air control torque (pitch, yaw, roll), rad/s^2 per unit input.
pub const CAR_AIR_CONTROL_TORQUE: [f32; 3] = [130.0, 95.0, 400.0];
/// Air damping (pitch, yaw, roll) applied against the matching angular velocity.
pub const CAR_AIR_CONTROL_DAMPING: [f32; 3] = [30.0, 20.0, 50.0];

/// Forward speed (uu/s) -> max steer angle (rad).
pub const STEER_ANGLE_FROM_SPEED: [(f32, f32); 6] = [
    (0.0, 0.53356),
    (500.0, 0.31930),
    (1000.0, 0.18203),
    (1500.0, 0.10570),
    (1750.0, 0.08507),
    (3000.0, 0.03454),
];

pub mod vehicle {
    //! Raycast-vehicle tuning shared by every car.
    pub const SUSPENSION_FORCE_SCALE_FRONT: f32 = 36.0 - 0.25;
    pub const SUSPENSION_FORCE_SCALE_BACK: f32 = 54.0 + 0.25 + 0.015;
    pub const SUSPENSION_STIFFNESS: f32 = 500.0;
    pub const WHEELS_DAMPING_COMPRESSION: f32 = 25.0;
    pub const WHEELS_DAMPING_RELAXATION: f32 = 40.0;
    pub const MAX_SUSPENSION_TRAVEL: f32 = 12.0;
    pub const FRICTION_SLIP_AMOUNT: f32 = 1.0;
}

pub mod wheel_layout {
    //! Reference wheel geometry (uu, car-local).
    pub const FRONT_X: f32 = 51.25;
    pub const BACK_X: f32 = -33.75;
    pub const SIDE_Y: f32 = 29.5;
    pub const RAY_START_Z: f32 = 20.755;
    pub const FRONT_REST_Z: f32 = -4.0;
    pub const BACK_REST_Z: f32 = -2.3;
    pub const FRONT_RADIUS: f32 = 12.5;
    pub const BACK_RADIUS: f32 = 15.0;
}

pub mod kickoff {
    //! Soccar kickoff spawns for the blue side: (x, y, yaw). Orange is mirrored through the origin.
    use core::f32::consts::PI;

    pub const CAR_SPAWN_REST_Z: f32 = 17.0;
    pub const CAR_SPAWN_LOCATIONS_SOCCAR: [(f32, f32, f32); 5] = [
        (-2048.0, -2560.0, PI * 0.25),
        (2048.0, -2560.0, PI * 0.75),
        (-256.0, -3840.0, PI * 0.5),
        (256.0, -3840.0, PI * 0.5),
        (0.0, -4608.0, PI * 0.5),
    ];
}
