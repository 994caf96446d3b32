use rlsim_core::types::{PhysState, Vec3};
use rlsim_core::{BodyHandle, EngineResult, ShapeHandle, VehicleHandle};
use rlsim_geom::Shape;

use crate::desc::{BodyDesc, VehicleAxes, WheelDesc, WheelInfo};

/// What the arena needs from a rigid-body engine.
///
/// Creation and world membership are separate: a body is created, then
/// added, then removed, then destroyed. Handles are never reused.
/// After [`destroy_world`](Self::destroy_world) every world operation fails
/// with `WorldDestroyed` but resources can still be released.
pub trait PhysicsEngine {
    fn set_gravity(&mut self, gravity: Vec3);

    fn create_shape(&mut self, shape: Shape) -> EngineResult<ShapeHandle>;
    fn destroy_shape(&mut self, shape: ShapeHandle) -> EngineResult<()>;
    /// Principal inertia of `shape` at `mass`, about its local origin.
    fn local_inertia(&self, shape: ShapeHandle, mass: f32) -> EngineResult<Vec3>;

    fn create_body(&mut self, desc: BodyDesc) -> EngineResult<BodyHandle>;
    fn destroy_body(&mut self, body: BodyHandle) -> EngineResult<()>;
    fn add_body(&mut self, body: BodyHandle) -> EngineResult<()>;
    fn remove_body(&mut self, body: BodyHandle) -> EngineResult<()>;
    fn is_in_world(&self, body: BodyHandle) -> bool;

    /// Runs every live vehicle, then advances the world by exactly `dt`.
    fn step(&mut self, dt: f32) -> EngineResult<()>;
    fn destroy_world(&mut self);

    /// The chassis must already be in the world.
    fn create_vehicle(&mut self, chassis: BodyHandle, axes: VehicleAxes) -> EngineResult<VehicleHandle>;
    fn add_wheel(&mut self, vehicle: VehicleHandle, desc: WheelDesc) -> EngineResult<usize>;
    fn wheels(&self, vehicle: VehicleHandle) -> EngineResult<&[WheelInfo]>;
    fn wheels_mut(&mut self, vehicle: VehicleHandle) -> EngineResult<&mut [WheelInfo]>;
    fn destroy_vehicle(&mut self, vehicle: VehicleHandle) -> EngineResult<()>;

    fn phys_state(&self, body: BodyHandle) -> EngineResult<PhysState>;
    fn set_phys_state(&mut self, body: BodyHandle, state: &PhysState) -> EngineResult<()>;
    fn apply_central_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> EngineResult<()>;
}
