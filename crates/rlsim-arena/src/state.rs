use rlsim_core::consts::{BOOST_SPAWN_AMOUNT, BT_TO_UU, UU_TO_BT};
use rlsim_core::types::{Isometry, PhysState, RotMat, Vec3, Velocity};
use rlsim_vehicles::CarControls;
use serde::{Deserialize, Serialize};

/// Full car snapshot, game units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarState {
    pub pos: Vec3,
    pub rot_mat: RotMat,
    pub vel: Vec3,
    pub ang_vel: Vec3,

    pub is_on_ground: bool,
    pub wheels_with_contact: [bool; 4],

    pub has_jumped: bool,
    pub has_double_jumped: bool,
    pub has_flipped: bool,
    pub is_jumping: bool,
    pub jump_time: f32,
    pub flip_time: f32,
    /// Car-local spin kicked in by the last dodge.
    pub flip_rel_torque: Vec3,
    pub air_time_since_jump: f32,

    pub boost: f32,
    /// 1 while the handbrake is held, 0 otherwise.
    pub handbrake_val: f32,
    pub last_controls: CarControls,
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            rot_mat: RotMat::IDENTITY,
            vel: Vec3::ZERO,
            ang_vel: Vec3::ZERO,
            is_on_ground: false,
            wheels_with_contact: [false; 4],
            has_jumped: false,
            has_double_jumped: false,
            has_flipped: false,
            is_jumping: false,
            jump_time: 0.0,
            flip_time: 0.0,
            flip_rel_torque: Vec3::ZERO,
            air_time_since_jump: 0.0,
            boost: BOOST_SPAWN_AMOUNT,
            handbrake_val: 0.0,
            last_controls: CarControls::default(),
        }
    }
}

impl CarState {
    /// Engine-unit body state for this snapshot.
    pub fn phys(&self) -> PhysState {
        PhysState {
            pose: Isometry { pos: self.pos, rot: self.rot_mat.to_quat() },
            vel: Velocity { lin: self.vel, ang: self.ang_vel },
        }
        .scaled(UU_TO_BT)
    }

    /// Overwrite the kinematic fields from an engine-unit body state.
    pub fn set_phys(&mut self, phys: &PhysState) {
        let uu = phys.scaled(BT_TO_UU);
        self.pos = uu.pose.pos;
        self.rot_mat = RotMat::from_quat(uu.pose.rot);
        self.vel = uu.vel.lin;
        self.ang_vel = uu.vel.ang;
    }

    /// Forget jump, flip and air timers.
    pub fn clear_gameplay_timers(&mut self) {
        self.has_jumped = false;
        self.has_double_jumped = false;
        self.has_flipped = false;
        self.is_jumping = false;
        self.jump_time = 0.0;
        self.flip_time = 0.0;
        self.flip_rel_torque = Vec3::ZERO;
        self.air_time_since_jump = 0.0;
    }
}

/// Ball snapshot, game units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub ang_vel: Vec3,
}

impl BallState {
    pub fn phys(&self) -> PhysState {
        PhysState { pose: Isometry::from_translation(self.pos), vel: Velocity { lin: self.vel, ang: self.ang_vel } }
            .scaled(UU_TO_BT)
    }

    pub fn from_phys(phys: &PhysState) -> Self {
        let uu = phys.scaled(BT_TO_UU);
        Self { pos: uu.pose.pos, vel: uu.vel.lin, ang_vel: uu.vel.ang }
    }
}
