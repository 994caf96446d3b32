use tracing::trace;

use rlsim_core::consts::*;
use rlsim_core::types::{Isometry, PhysState, RotMat, Vec3};
use rlsim_core::{BodyHandle, CarId, EngineError, EngineResult, ShapeHandle, Team, VehicleHandle};
use rlsim_engine::{BodyDesc, PhysicsEngine, VehicleAxes, WheelDesc, WheelInfo};
use rlsim_geom::{Material, Shape};
use rlsim_vehicles::air::{air_control_delta, dodge_spin, second_jump};
use rlsim_vehicles::drive::drive_input;
use rlsim_vehicles::wheels::{SuspensionTuning, WHEEL_AXLE_CS, WHEEL_DIRECTION_CS};
use rlsim_vehicles::{CarConfig, CarControls, SecondJump, WheelLayout, WheelLayoutSource};

use crate::state::CarState;

/// Wheels that must touch the ground for the car to count as grounded.
const MIN_GROUND_WHEELS: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct CarHandles {
    shape: ShapeHandle,
    body: BodyHandle,
    vehicle: VehicleHandle,
}

/// Whatever was created before a construction fault, released in reverse.
#[derive(Default)]
struct Partial {
    shape: Option<ShapeHandle>,
    body: Option<BodyHandle>,
    in_world: bool,
    vehicle: Option<VehicleHandle>,
}

impl Partial {
    fn unwind<E: PhysicsEngine>(self, engine: &mut E) {
        if let Some(v) = self.vehicle { let _ = engine.destroy_vehicle(v); }
        if let Some(b) = self.body {
            if self.in_world { let _ = engine.remove_body(b); }
            let _ = engine.destroy_body(b);
        }
        if let Some(s) = self.shape { let _ = engine.destroy_shape(s); }
    }
}

/// The hitbox: one box inside a compound so it can sit off the body origin.
pub fn hitbox_shape(config: &CarConfig) -> Shape {
    Shape::single_child_compound(
        Isometry::from_translation(config.hitbox_pos_offset * UU_TO_BT),
        Shape::cuboid(config.hitbox_size * 0.5 * UU_TO_BT),
    )
}

fn apply_tuning(w: &mut WheelInfo, t: &SuspensionTuning) {
    w.suspension_stiffness = t.stiffness;
    w.damping_compression = t.damping_compression;
    w.damping_relaxation = t.damping_relaxation;
    w.max_suspension_travel = t.max_travel;
    w.max_suspension_force = t.max_force;
    w.friction_slip = t.friction_slip;
}

/// One car in an arena. Owns its engine shape, body and vehicle.
#[derive(Debug)]
pub struct Car {
    id: CarId,
    team: Team,
    config: CarConfig,
    /// Input for the next tick; the host overwrites it wholesale.
    pub controls: CarControls,
    state: CarState,
    back_friction_slip: f32,
    handles: CarHandles,
}

impl Car {
    /// Build the chassis and its four wheels. On any engine fault everything
    /// created so far is released and the fault is returned.
    pub(crate) fn spawn<E: PhysicsEngine>(
        engine: &mut E,
        id: CarId,
        team: Team,
        config: CarConfig,
        layout: WheelLayoutSource,
    ) -> EngineResult<Self> {
        let mut partial = Partial::default();
        match Self::build(engine, &config, layout, &mut partial) {
            Ok(handles) => Ok(Self {
                id,
                team,
                config,
                controls: CarControls::default(),
                state: CarState::default(),
                back_friction_slip: SuspensionTuning::for_axle(false).friction_slip,
                handles,
            }),
            Err(e) => {
                partial.unwind(engine);
                Err(e)
            }
        }
    }

    fn build<E: PhysicsEngine>(
        engine: &mut E,
        config: &CarConfig,
        layout: WheelLayoutSource,
        partial: &mut Partial,
    ) -> EngineResult<CarHandles> {
        let shape = engine.create_shape(hitbox_shape(config))?;
        partial.shape = Some(shape);

        let inertia = engine.local_inertia(shape, CAR_MASS_BT)?;
        let material = Material { friction: CAR_WORLD_FRICTION, restitution: CAR_WORLD_RESTITUTION };
        let desc = BodyDesc::dynamic(shape, CAR_MASS_BT, inertia, PhysState::default(), material).never_sleep();
        let body = engine.create_body(desc)?;
        partial.body = Some(body);
        engine.add_body(body)?;
        partial.in_world = true;

        let vehicle = engine.create_vehicle(body, VehicleAxes::Z_UP_X_FORWARD)?;
        partial.vehicle = Some(vehicle);

        for setup in WheelLayout::resolve(layout, config).setups() {
            let index = engine.add_wheel(vehicle, WheelDesc {
                connection_point: setup.ray_start,
                direction: WHEEL_DIRECTION_CS,
                axle: WHEEL_AXLE_CS,
                suspension_rest_length: setup.suspension_rest_length,
                radius: setup.radius,
                is_front: setup.is_front,
            })?;
            let wheels = engine.wheels_mut(vehicle)?;
            let count = wheels.len();
            let wheel = wheels.get_mut(index).ok_or(EngineError::WheelOutOfRange { vehicle, index, count })?;
            apply_tuning(wheel, &setup.tuning);
        }

        Ok(CarHandles { shape, body, vehicle })
    }

    #[inline] pub fn id(&self) -> CarId { self.id }
    #[inline] pub fn team(&self) -> Team { self.team }
    #[inline] pub fn config(&self) -> &CarConfig { &self.config }
    #[inline] pub fn shape(&self) -> ShapeHandle { self.handles.shape }
    #[inline] pub fn body(&self) -> BodyHandle { self.handles.body }
    #[inline] pub fn vehicle(&self) -> VehicleHandle { self.handles.vehicle }

    /// Gameplay state as of the last tick; kinematics may be stale.
    #[inline] pub fn last_state(&self) -> &CarState { &self.state }

    /// Current state with kinematics read from the engine.
    pub fn state<E: PhysicsEngine>(&self, engine: &E) -> EngineResult<CarState> {
        let mut s = self.state;
        s.set_phys(&engine.phys_state(self.handles.body)?);
        Ok(s)
    }

    /// Boost is gameplay-only state; the engine is not touched.
    pub fn set_boost(&mut self, boost: f32) { self.state.boost = boost.clamp(0.0, BOOST_MAX); }

    pub fn set_state<E: PhysicsEngine>(&mut self, engine: &mut E, state: &CarState) -> EngineResult<()> {
        engine.set_phys_state(self.handles.body, &state.phys())?;
        self.state = *state;
        Ok(())
    }

    /// Controls → vehicle: wheel inputs, boost, jumps, dodges and air control.
    pub(crate) fn pre_tick<E: PhysicsEngine>(&mut self, engine: &mut E, dt: f32) -> EngineResult<()> {
        let body = self.handles.body;
        let phys = engine.phys_state(body)?;
        self.state.set_phys(&phys);

        let controls = self.controls.clamped();
        let rot = phys.pose.rot;
        let forward = rot * Vec3::X;
        let up = rot * Vec3::Z;
        let forward_speed = self.state.vel.dot(forward);

        let drive = drive_input(&controls, forward_speed);
        for w in engine.wheels_mut(self.handles.vehicle)?.iter_mut() {
            w.engine_force = drive.engine_force;
            w.brake = drive.brake;
            if w.desc.is_front {
                w.steering = drive.steer_angle;
            } else {
                w.friction_slip = self.back_friction_slip * drive.back_friction_scale;
            }
        }
        self.state.handbrake_val = if controls.handbrake { 1.0 } else { 0.0 };

        let s = &mut self.state;
        let jump_pressed = controls.jump && !s.last_controls.jump;
        let mut dv = Vec3::ZERO;
        let mut new_ang_vel = None;

        if controls.boost && s.boost > 0.0 {
            let accel = if s.is_on_ground { BOOST_ACCEL_GROUND } else { BOOST_ACCEL_AIR };
            dv += forward * accel * dt;
            s.boost = (s.boost - BOOST_USED_PER_SECOND * dt).max(0.0);
        }

        if jump_pressed && s.is_on_ground && !s.has_jumped {
            s.has_jumped = true;
            s.is_jumping = true;
            s.jump_time = 0.0;
            dv += up * JUMP_IMMEDIATE_FORCE;
        } else if jump_pressed
            && !s.is_on_ground
            && !s.has_double_jumped
            && !s.has_flipped
            && s.air_time_since_jump < DOUBLE_JUMP_WINDOW
        {
            match second_jump(&controls, self.config.dodge_deadzone) {
                SecondJump::DoubleJump => {
                    s.has_double_jumped = true;
                    dv += up * JUMP_IMMEDIATE_FORCE;
                }
                SecondJump::Dodge { dir } => {
                    s.has_flipped = true;
                    s.is_jumping = false;
                    s.flip_time = 0.0;
                    s.flip_rel_torque = dodge_spin(dir);
                    let world_dir = rot * dir;
                    dv += Vec3::new(world_dir.x, world_dir.y, 0.0).normalize_or_zero() * DODGE_IMPULSE;
                    new_ang_vel = Some(rot * s.flip_rel_torque);
                }
            }
        }

        if s.is_jumping {
            if s.jump_time < JUMP_MIN_TIME || (controls.jump && s.jump_time < JUMP_MAX_TIME) {
                dv += up * JUMP_ACCEL * dt;
            } else {
                s.is_jumping = false;
            }
        }

        let flipping = s.has_flipped && s.flip_time < FLIP_TORQUE_TIME;
        if !s.is_on_ground && !flipping && new_ang_vel.is_none() {
            let local = rot.inverse() * s.ang_vel;
            new_ang_vel = Some(rot * (local + air_control_delta(&controls, local, dt)));
        }

        if let Some(ang) = new_ang_vel {
            let mut p = engine.phys_state(body)?;
            p.vel.ang = ang;
            engine.set_phys_state(body, &p)?;
        }
        if dv != Vec3::ZERO {
            engine.apply_central_impulse(body, dv * UU_TO_BT * CAR_MASS_BT)?;
        }
        Ok(())
    }

    /// Vehicle → car state: wheel contacts, ground flag, timers.
    pub(crate) fn post_tick<E: PhysicsEngine>(&mut self, engine: &E, dt: f32) -> EngineResult<()> {
        let wheels = engine.wheels(self.handles.vehicle)?;
        let s = &mut self.state;
        s.wheels_with_contact = [false; 4];
        for (slot, w) in s.wheels_with_contact.iter_mut().zip(wheels) {
            *slot = w.contact.in_contact;
        }
        let touching = s.wheels_with_contact.iter().filter(|c| **c).count();
        s.is_on_ground = touching >= MIN_GROUND_WHEELS;

        if s.is_jumping { s.jump_time += dt; }
        if s.has_flipped { s.flip_time += dt; }
        if s.has_jumped && !s.is_jumping { s.air_time_since_jump += dt; }

        if s.is_on_ground && !s.is_jumping && (s.has_jumped || s.has_double_jumped || s.has_flipped) {
            trace!(car = %self.id, "landed");
            s.clear_gameplay_timers();
        }

        s.last_controls = self.controls;
        s.set_phys(&engine.phys_state(self.handles.body)?);
        Ok(())
    }

    /// Put the car at a kickoff pose with spawn boost and fresh timers.
    pub(crate) fn reset_for_kickoff<E: PhysicsEngine>(&mut self, engine: &mut E, pos: Vec3, rot_mat: RotMat) -> EngineResult<()> {
        let state = CarState { pos, rot_mat, ..CarState::default() };
        self.set_state(engine, &state)
    }

    /// Vehicle, then body, then shape.
    pub(crate) fn release<E: PhysicsEngine>(&self, engine: &mut E) -> EngineResult<()> {
        engine.destroy_vehicle(self.handles.vehicle)?;
        if engine.is_in_world(self.handles.body) {
            engine.remove_body(self.handles.body)?;
        }
        engine.destroy_body(self.handles.body)?;
        engine.destroy_shape(self.handles.shape)
    }
}
