use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rlsim_arena::{Arena, BallState, CarState};
use rlsim_core::consts::BOOST_MAX;
use rlsim_core::types::{Angle, RotMat, Vec3};
use rlsim_core::{CarId, GameMode, Team};
use rlsim_vehicles::{CarConfig, CarConfigPreset, CarControls};

/* ---------------- Snapshots ---------------- */

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub pos: Vec3,
    pub vel: Vec3,
    pub ang_vel: Vec3,
}

impl From<BallState> for BallView {
    fn from(b: BallState) -> Self { Self { pos: b.pos, vel: b.vel, ang_vel: b.ang_vel } }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CarView {
    pub pos: Vec3,
    pub rot_mat: RotMat,
    /// Pitch/yaw/roll derived from `rot_mat`.
    pub angle: Angle,
    pub forward: Vec3,
    pub vel: Vec3,
    pub ang_vel: Vec3,
    pub boost: f32,
    pub is_on_ground: bool,
}

impl From<&CarState> for CarView {
    fn from(s: &CarState) -> Self {
        let angle = Angle::from_rot_mat(&s.rot_mat);
        Self {
            pos: s.pos,
            rot_mat: s.rot_mat,
            angle,
            forward: angle.forward_vector(),
            vel: s.vel,
            ang_vel: s.ang_vel,
            boost: s.boost,
            is_on_ground: s.is_on_ground,
        }
    }
}

/// Everything a host reads back after a step, game units.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GameState {
    pub tick: u64,
    pub ball: BallView,
    pub car: CarView,
}

/* ---------------- Game ---------------- */

/// A Soccar arena with a single blue car.
pub struct Game {
    arena: Arena,
    car: CarId,
    preset: CarConfigPreset,
    collision_meshes: PathBuf,
}

impl Game {
    /// The mesh folder is only recorded; the floor is always a plane.
    pub fn new(collision_meshes: impl AsRef<Path>, preset: CarConfigPreset) -> Result<Self> {
        let collision_meshes = collision_meshes.as_ref().to_path_buf();
        if !collision_meshes.is_dir() {
            warn!(path = %collision_meshes.display(), "collision mesh folder not found");
        }
        let mut arena = Arena::create(GameMode::Soccar).context("creating soccar arena")?;
        let car = arena
            .add_car(Team::Blue, preset.config())
            .with_context(|| format!("adding {} car", preset.name()))?;
        debug!(preset = preset.name(), "game ready");
        Ok(Self { arena, car, preset, collision_meshes })
    }

    #[inline] pub fn arena(&self) -> &Arena { &self.arena }
    #[inline] pub fn car_id(&self) -> CarId { self.car }
    #[inline] pub fn preset(&self) -> CarConfigPreset { self.preset }
    #[inline] pub fn collision_meshes(&self) -> &Path { &self.collision_meshes }

    pub fn car_config(&self) -> CarConfig { self.preset.config() }

    pub fn controls(&self) -> Result<CarControls> {
        let car = self.car;
        self.arena.get_car(car).map(|c| c.controls).ok_or_else(|| anyhow!("{car} missing from arena"))
    }

    pub fn set_controls(&mut self, controls: CarControls) -> Result<()> {
        self.arena.set_car_controls(self.car, controls).context("setting controls")
    }

    /// Refill boost, then advance `ticks` ticks.
    pub fn step(&mut self, ticks: u32) -> Result<()> {
        let car = self.car;
        self.arena.get_car_mut(car).ok_or_else(|| anyhow!("{car} missing from arena"))?.set_boost(BOOST_MAX);
        self.arena.step(ticks).with_context(|| format!("stepping {ticks} ticks"))
    }

    pub fn state(&self) -> Result<GameState> {
        let ball = self.arena.ball_state()?;
        let car = self.arena.car_state(self.car)?;
        Ok(GameState { tick: self.arena.tick_count(), ball: ball.into(), car: CarView::from(&car) })
    }

    pub fn reset_to_kickoff(&mut self) -> Result<()> {
        self.arena.reset_to_random_kickoff(None).context("kickoff reset")
    }

    pub fn reset_to_kickoff_seeded(&mut self, seed: u64) -> Result<()> {
        self.arena.reset_to_random_kickoff(Some(seed)).context("kickoff reset")
    }

    pub fn state_hash(&self) -> Result<[u8; 32]> {
        Ok(self.arena.state_hash()?)
    }
}
