use rlsim_core::consts::{BALL_FRICTION, BALL_MASS_BT, BALL_RESTITUTION, UU_TO_BT};
use rlsim_core::{vec3, BodyHandle, EngineResult, ShapeHandle};
use rlsim_engine::{BodyDesc, PhysicsEngine};
use rlsim_geom::{Material, Shape};

use crate::state::BallState;

/// The arena's single ball: one sphere shape and one rigid body.
#[derive(Debug)]
pub struct Ball {
    radius: f32,
    shape: ShapeHandle,
    body: BodyHandle,
}

impl Ball {
    /// Create the ball resting on the floor and add it to the world.
    pub(crate) fn spawn<E: PhysicsEngine>(engine: &mut E, radius: f32) -> EngineResult<Self> {
        let shape = engine.create_shape(Shape::Sphere { r: radius * UU_TO_BT })?;
        match Self::spawn_body(engine, shape, radius) {
            Ok(body) => Ok(Self { radius, shape, body }),
            Err(e) => {
                let _ = engine.destroy_shape(shape);
                Err(e)
            }
        }
    }

    fn spawn_body<E: PhysicsEngine>(engine: &mut E, shape: ShapeHandle, radius: f32) -> EngineResult<BodyHandle> {
        let inertia = engine.local_inertia(shape, BALL_MASS_BT)?;
        let material = Material { friction: BALL_FRICTION, restitution: BALL_RESTITUTION };
        let desc = BodyDesc::dynamic(shape, BALL_MASS_BT, inertia, Self::rest_state(radius).phys(), material);
        let body = engine.create_body(desc)?;
        if let Err(e) = engine.add_body(body) {
            let _ = engine.destroy_body(body);
            return Err(e);
        }
        Ok(body)
    }

    /// Centre at `(0, 0, radius)`, no motion.
    pub fn rest_state(radius: f32) -> BallState {
        BallState { pos: vec3(0.0, 0.0, radius), ..BallState::default() }
    }

    #[inline] pub fn radius(&self) -> f32 { self.radius }
    #[inline] pub fn body(&self) -> BodyHandle { self.body }
    #[inline] pub fn shape(&self) -> ShapeHandle { self.shape }

    pub fn state<E: PhysicsEngine>(&self, engine: &E) -> EngineResult<BallState> {
        Ok(BallState::from_phys(&engine.phys_state(self.body)?))
    }

    pub fn set_state<E: PhysicsEngine>(&self, engine: &mut E, state: &BallState) -> EngineResult<()> {
        engine.set_phys_state(self.body, &state.phys())
    }

    /// Body first, then shape.
    pub(crate) fn release<E: PhysicsEngine>(&self, engine: &mut E) -> EngineResult<()> {
        if engine.is_in_world(self.body) {
            engine.remove_body(self.body)?;
        }
        engine.destroy_body(self.body)?;
        engine.destroy_shape(self.shape)
    }
}
