//! Engine adapter seam.
//!
//! The arena never talks to a physics library directly; it drives a
//! [`PhysicsEngine`] through opaque handles. [`RapierEngine`] is the
//! production backend. Everything crossing the seam is in engine units.

pub mod desc;
pub mod engine;
pub mod rapier;
mod convert;

pub use desc::{BodyDesc, BodyKind, VehicleAxes, WheelContact, WheelDesc, WheelInfo};
pub use engine::PhysicsEngine;
pub use rapier::RapierEngine;
