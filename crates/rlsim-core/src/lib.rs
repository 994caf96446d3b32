//! Shared building blocks for the rlsim workspace.
//!
//! Everything here is engine-agnostic: ids for engine-owned resources, the
//! glam math aliases, game/engine unit conversion, game constants, the
//! deterministic RNG and blake3 state hashing.

pub mod ids;
pub mod types;
pub mod hash;
pub mod determinism;
pub mod rng;
pub mod consts;
pub mod game;
pub mod error;

pub use ids::{CarId, ShapeHandle, BodyHandle, VehicleHandle};
pub use types::{Vec3, Mat3, Isometry, Velocity, PhysState, RotMat, Angle, vec3, iso};
pub use hash::{StepHasher, hash_vec3, hash_quat, hash_f32, hex32};
pub use determinism::DeterminismContract;
pub use rng::XorShift64;
pub use game::{GameMode, Team};
pub use error::{EngineError, EngineResult, SimError, SimResult};
pub use glam::Quat;

/// Scalar type used throughout the simulation.
pub type Scalar = f32;
