//! Kickoff placement on the Soccar spawn table.

use core::f32::consts::PI;

use rlsim_core::consts::kickoff::{CAR_SPAWN_LOCATIONS_SOCCAR, CAR_SPAWN_REST_Z};
use rlsim_core::types::{Angle, RotMat, Vec3};
use rlsim_core::{Team, XorShift64};

pub const SPAWN_SPOTS: usize = CAR_SPAWN_LOCATIONS_SOCCAR.len();

/// Position and orientation of a kickoff spot, game units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnPose {
    pub pos: Vec3,
    pub rot_mat: RotMat,
}

/// Spot `index` (wrapping) for `team`. Orange mirrors blue through the origin.
pub fn spawn_pose(team: Team, index: usize) -> SpawnPose {
    let (x, y, yaw) = CAR_SPAWN_LOCATIONS_SOCCAR[index % SPAWN_SPOTS];
    let (x, y, yaw) = match team {
        Team::Blue => (x, y, yaw),
        Team::Orange => (-x, -y, yaw + PI),
    };
    SpawnPose { pos: Vec3::new(x, y, CAR_SPAWN_REST_Z), rot_mat: Angle::new(yaw, 0.0, 0.0).to_rot_mat() }
}

/// A shuffled spot order. Both teams use the same order so kickoffs stay symmetric.
pub fn shuffled_spots(rng: &mut XorShift64) -> [usize; SPAWN_SPOTS] {
    let mut order: [usize; SPAWN_SPOTS] = core::array::from_fn(|i| i);
    rng.shuffle(&mut order);
    order
}
