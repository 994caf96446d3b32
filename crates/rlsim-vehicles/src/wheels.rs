//! Wheel geometry and suspension tuning for the four-wheel raycast model.
//!
//! Wheel indices: `0, 1` front, `2, 3` back; odd indices sit on the `+y`
//! (left) side. All outputs are in engine units, ready for the vehicle helper.

use rlsim_core::consts::{vehicle::*, wheel_layout, UU_TO_BT};
use rlsim_core::{vec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::{CarConfig, WheelPairConfig};

/// Geometry of one axle, car-local game units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelPairLayout {
    /// Longitudinal position of the axle.
    pub x: f32,
    /// Lateral distance of each wheel from the centre line.
    pub y: f32,
    /// Height the suspension ray starts from.
    pub ray_start_z: f32,
    /// Height of the wheel hub at suspension rest.
    pub rest_z: f32,
    /// Wheel radius.
    pub radius: f32,
}

impl WheelPairLayout {
    /// Rest length is derived from the two heights, never supplied directly.
    #[inline]
    pub fn suspension_rest_length(&self) -> f32 { self.ray_start_z - self.rest_z }

    fn from_pair_config(p: &WheelPairConfig) -> Self {
        let o = p.connection_point_offset;
        Self {
            x: o.x,
            y: o.y.abs(),
            ray_start_z: o.z,
            rest_z: o.z - p.suspension_rest_length,
            radius: p.wheel_radius,
        }
    }
}

/// Front and back axle geometry.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelLayout {
    /// Front axle.
    pub front: WheelPairLayout,
    /// Back axle.
    pub back: WheelPairLayout,
}

/// Where a car's wheel geometry comes from.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelLayoutSource {
    /// The fixed reference geometry, identical for every car body.
    #[default]
    Reference,
    /// Derived from the car's own [`WheelPairConfig`]s.
    FromCarConfig,
}

impl WheelLayout {
    /// Reference geometry shared by every car.
    pub fn reference() -> Self {
        use wheel_layout::*;
        Self {
            front: WheelPairLayout { x: FRONT_X, y: SIDE_Y, ray_start_z: RAY_START_Z, rest_z: FRONT_REST_Z, radius: FRONT_RADIUS },
            back: WheelPairLayout { x: BACK_X, y: SIDE_Y, ray_start_z: RAY_START_Z, rest_z: BACK_REST_Z, radius: BACK_RADIUS },
        }
    }

    /// Geometry read from the config's wheel pairs.
    pub fn from_config(config: &CarConfig) -> Self {
        Self {
            front: WheelPairLayout::from_pair_config(&config.front_wheels),
            back: WheelPairLayout::from_pair_config(&config.back_wheels),
        }
    }

    /// Resolve `source` against `config`.
    pub fn resolve(source: WheelLayoutSource, config: &CarConfig) -> Self {
        match source {
            WheelLayoutSource::Reference => Self::reference(),
            WheelLayoutSource::FromCarConfig => Self::from_config(config),
        }
    }

    /// The four wheel setups, front pair first.
    pub fn setups(&self) -> [WheelSetup; 4] {
        core::array::from_fn(|i| {
            let front = i < 2;
            let left = i % 2 == 1;
            let pair = if front { &self.front } else { &self.back };
            let y = if left { pair.y } else { -pair.y };
            WheelSetup {
                index: i,
                is_front: front,
                is_left: left,
                ray_start: vec3(pair.x, y, pair.ray_start_z) * UU_TO_BT,
                suspension_rest_length: pair.suspension_rest_length() * UU_TO_BT,
                radius: pair.radius * UU_TO_BT,
                tuning: SuspensionTuning::for_axle(front),
            }
        })
    }
}

/// Per-wheel suspension and friction overrides.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspensionTuning {
    /// Spring stiffness.
    pub stiffness: f32,
    /// Damping while compressing.
    pub damping_compression: f32,
    /// Damping while extending.
    pub damping_relaxation: f32,
    /// Maximum travel from rest, engine units.
    pub max_travel: f32,
    /// Force cap; unbounded.
    pub max_force: f32,
    /// Tyre friction coefficient.
    pub friction_slip: f32,
}

impl SuspensionTuning {
    /// Shared base constants scaled by the front or back force scale.
    pub fn for_axle(front: bool) -> Self {
        let scale = if front { SUSPENSION_FORCE_SCALE_FRONT } else { SUSPENSION_FORCE_SCALE_BACK };
        Self {
            stiffness: SUSPENSION_STIFFNESS * scale,
            damping_compression: WHEELS_DAMPING_COMPRESSION * scale,
            damping_relaxation: WHEELS_DAMPING_RELAXATION * scale,
            max_travel: MAX_SUSPENSION_TRAVEL * UU_TO_BT,
            max_force: f32::MAX,
            friction_slip: FRICTION_SLIP_AMOUNT,
        }
    }
}

/// Everything the vehicle helper needs to register one wheel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelSetup {
    /// Wheel index, `0..4`.
    pub index: usize,
    /// Front wheels steer.
    pub is_front: bool,
    /// `+y` side.
    pub is_left: bool,
    /// Suspension ray origin, car-local engine units.
    pub ray_start: Vec3,
    /// Rest length, engine units.
    pub suspension_rest_length: f32,
    /// Radius, engine units.
    pub radius: f32,
    /// Overrides applied right after registration.
    pub tuning: SuspensionTuning,
}

/// Suspension ray direction in car-local space.
pub const WHEEL_DIRECTION_CS: Vec3 = Vec3::NEG_Z;
/// Wheel axle in car-local space.
pub const WHEEL_AXLE_CS: Vec3 = Vec3::NEG_Y;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::config::CarConfigPreset;
    use rlsim_core::consts::BT_TO_UU;

    #[test]
    fn reference_rest_lengths_are_derived() {
        let l = WheelLayout::reference();
        assert_relative_eq!(l.front.suspension_rest_length(), 24.755, epsilon = 1e-4);
        assert_relative_eq!(l.back.suspension_rest_length(), 23.055, epsilon = 1e-4);
    }

    #[test]
    fn setups_order_and_mirroring() {
        let s = WheelLayout::reference().setups();
        assert!(s[0].is_front && s[1].is_front && !s[2].is_front && !s[3].is_front);
        assert!(!s[0].is_left && s[1].is_left);
        assert_relative_eq!(s[0].ray_start.y, -s[1].ray_start.y);
        assert_relative_eq!(s[2].ray_start.x * BT_TO_UU, -33.75, epsilon = 1e-4);
        assert_relative_eq!(s[0].radius * BT_TO_UU, 12.5, epsilon = 1e-4);
        assert_relative_eq!(s[3].radius * BT_TO_UU, 15.0, epsilon = 1e-4);
    }

    #[test]
    fn front_and_back_tuning_are_asymmetric() {
        let f = SuspensionTuning::for_axle(true);
        let b = SuspensionTuning::for_axle(false);
        assert_relative_eq!(f.stiffness, SUSPENSION_STIFFNESS * SUSPENSION_FORCE_SCALE_FRONT);
        assert_relative_eq!(b.damping_relaxation, WHEELS_DAMPING_RELAXATION * SUSPENSION_FORCE_SCALE_BACK);
        assert!(b.stiffness > f.stiffness);
        assert_eq!(f.max_travel, b.max_travel);
        assert_eq!(f.max_force, f32::MAX);
    }

    #[test]
    fn config_layout_uses_wheel_pairs() {
        let cfg = CarConfigPreset::Dominus.config();
        let l = WheelLayout::resolve(WheelLayoutSource::FromCarConfig, &cfg);
        assert_relative_eq!(l.front.radius, 12.0);
        assert_relative_eq!(l.back.suspension_rest_length(), cfg.back_wheels.suspension_rest_length, epsilon = 1e-4);
        assert_eq!(WheelLayout::resolve(WheelLayoutSource::Reference, &cfg), WheelLayout::reference());
    }
}
