//! The simulated world: one [`Arena`] owning an engine, a ball and a list of
//! cars, advanced in fixed ticks.
//!
//! Public positions and velocities are in game units; everything handed to
//! the engine is converted to engine units at the boundary.

pub mod arena;
pub mod ball;
pub mod car;
pub mod config;
pub mod kickoff;
pub mod state;

pub use arena::{Arena, GoalScoreCallback};
pub use ball::Ball;
pub use car::Car;
pub use config::{ArenaConfig, BallRadiusPolicy};
pub use state::{BallState, CarState};

pub use rlsim_core::{CarId, GameMode, SimError, SimResult, Team};
pub use rlsim_engine::{PhysicsEngine, RapierEngine};
