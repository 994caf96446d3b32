//! Boundary facade for hosts that just want "a car and a ball".
//!
//! [`Game`] wraps a Soccar [`Arena`](rlsim_arena::Arena) with one blue car and
//! exposes flattened, serde-friendly [`GameState`] snapshots. Sessions can be
//! described in JSON ([`SessionDescriptor`]) and replayed with [`run_session`].

pub mod game;
pub mod session;

pub use game::{BallView, CarView, Game, GameState};
pub use session::{load_session, preset_by_name, run_session, ControlStep, SessionDescriptor};

pub use rlsim_core::consts::BALL_COLLISION_RADIUS_SOCCAR;
pub use rlsim_vehicles::{CarConfig, CarConfigPreset, CarControls};
