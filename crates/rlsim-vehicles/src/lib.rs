#![deny(missing_docs)]
//! Car description and the world-agnostic half of the car model.
//!
//! - [`CarConfig`] / [`CarConfigPreset`]: declarative hitbox + wheel shape.
//! - [`wheels`]: turns a config into four wheel setups with suspension tuning.
//! - [`drive`] and [`air`]: map a [`CarControls`] snapshot to engine inputs,
//!   velocity changes and dodge decisions.
//!
//! Nothing in here touches a physics world; the arena reads body state,
//! calls into these helpers and writes the results back.

pub mod config;
pub mod controls;
pub mod curve;
pub mod wheels;
pub mod drive;
pub mod air;

pub use config::{CarConfig, CarConfigPreset, WheelPairConfig};
pub use controls::CarControls;
pub use curve::LinearPieceCurve;
pub use wheels::{SuspensionTuning, WheelLayout, WheelLayoutSource, WheelPairLayout, WheelSetup};
pub use drive::DriveInput;
pub use air::SecondJump;
