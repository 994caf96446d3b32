//! Driver input for one tick.

use serde::{Deserialize, Serialize};

/// One tick of driver input. Analog axes are in `[-1, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarControls {
    /// Forward/backward drive.
    pub throttle: f32,
    /// Positive steers right.
    pub steer: f32,
    /// Positive pitches the nose up.
    pub pitch: f32,
    /// Positive yaws right.
    pub yaw: f32,
    /// Positive rolls right.
    pub roll: f32,
    /// Boost held.
    pub boost: bool,
    /// Jump held.
    pub jump: bool,
    /// Handbrake held.
    pub handbrake: bool,
}

impl CarControls {
    /// Copy with every analog axis clamped to `[-1, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            throttle: self.throttle.clamp(-1.0, 1.0),
            steer: self.steer.clamp(-1.0, 1.0),
            pitch: self.pitch.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            roll: self.roll.clamp(-1.0, 1.0),
            ..self
        }
    }

    /// Largest absolute pitch/yaw/roll input.
    #[inline]
    pub fn max_rotation_input(&self) -> f32 {
        self.pitch.abs().max(self.yaw.abs()).max(self.roll.abs())
    }
}
