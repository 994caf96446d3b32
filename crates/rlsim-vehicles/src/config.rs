//! Declarative car shape and the built-in presets.

use rlsim_core::consts::DEFAULT_DODGE_DEADZONE;
use rlsim_core::{vec3, Vec3};
use serde::{Deserialize, Serialize};

/// Geometry of one axle's wheel pair (game units, car-local).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelPairConfig {
    /// Wheel radius.
    pub wheel_radius: f32,
    /// Suspension rest length as listed for the car body.
    pub suspension_rest_length: f32,
    /// Where the right-side wheel attaches; the left wheel mirrors `y`.
    pub connection_point_offset: Vec3,
}

/// Immutable vehicle shape descriptor supplied at car creation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarConfig {
    /// Full hitbox extents (not half extents).
    pub hitbox_size: Vec3,
    /// Hitbox centre relative to the body origin.
    pub hitbox_pos_offset: Vec3,
    /// Front axle.
    pub front_wheels: WheelPairConfig,
    /// Back axle.
    pub back_wheels: WheelPairConfig,
    /// Stick magnitude at or above which a second jump becomes a dodge.
    pub dodge_deadzone: f32,
}

impl Default for CarConfig {
    fn default() -> Self { CarConfigPreset::Octane.config() }
}

/// Closed set of the game's car bodies.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarConfigPreset {
    /// Octane hitbox.
    #[default]
    Octane,
    /// Dominus hitbox.
    Dominus,
    /// Plank (Batmobile) hitbox.
    Plank,
    /// Breakout hitbox.
    Breakout,
    /// Hybrid hitbox.
    Hybrid,
    /// Merc hitbox.
    Merc,
}

const fn pair(radius: f32, rest: f32, x: f32, y: f32, z: f32) -> (f32, f32, [f32; 3]) {
    (radius, rest, [x, y, z])
}

// (hitbox size, hitbox offset, front pair, back pair)
type PresetRow = ([f32; 3], [f32; 3], (f32, f32, [f32; 3]), (f32, f32, [f32; 3]));

const PRESETS: [(CarConfigPreset, PresetRow); 6] = [
    (CarConfigPreset::Octane, (
        [120.507, 86.6994, 38.6591], [13.8757, 0.0, 20.755],
        pair(12.50, 38.755, 51.25, 25.90, 20.755), pair(15.00, 37.055, -33.75, 29.50, 20.755),
    )),
    (CarConfigPreset::Dominus, (
        [130.427, 85.7799, 33.8], [9.0, 0.0, 15.75],
        pair(12.00, 33.95, 50.30, 31.10, 15.75), pair(13.50, 33.85, -34.75, 33.00, 15.75),
    )),
    (CarConfigPreset::Plank, (
        [131.32, 87.1704, 31.8944], [9.00857, 0.0, 12.0942],
        pair(12.50, 31.9242, 49.97, 27.80, 10.08), pair(17.00, 27.9242, -35.43, 20.28, 10.08),
    )),
    (CarConfigPreset::Breakout, (
        [133.992, 83.021, 32.8], [12.5, 0.0, 11.75],
        pair(13.50, 29.7, 51.50, 26.67, 11.75), pair(15.00, 29.666, -35.75, 35.00, 11.75),
    )),
    (CarConfigPreset::Hybrid, (
        [129.519, 84.6879, 36.6591], [13.8757, 0.0, 20.755],
        pair(12.50, 38.755, 51.25, 25.90, 20.755), pair(15.00, 37.055, -34.00, 29.50, 20.755),
    )),
    (CarConfigPreset::Merc, (
        [123.22, 79.2103, 44.1591], [11.3757, 0.0, 21.505],
        pair(15.00, 39.505, 51.25, 25.90, 21.505), pair(15.00, 39.105, -33.75, 29.50, 21.505),
    )),
];

fn wheel_pair((radius, rest, [x, y, z]): (f32, f32, [f32; 3])) -> WheelPairConfig {
    WheelPairConfig { wheel_radius: radius, suspension_rest_length: rest, connection_point_offset: vec3(x, y, z) }
}

impl CarConfigPreset {
    /// Every preset, in declaration order.
    pub const ALL: [CarConfigPreset; 6] = [
        CarConfigPreset::Octane,
        CarConfigPreset::Dominus,
        CarConfigPreset::Plank,
        CarConfigPreset::Breakout,
        CarConfigPreset::Hybrid,
        CarConfigPreset::Merc,
    ];

    /// The constant config this preset names.
    pub fn config(self) -> CarConfig {
        let (_, (size, offset, front, back)) = PRESETS
            .iter()
            .find(|(p, _)| *p == self)
            .copied()
            .unwrap_or(PRESETS[0]);
        CarConfig {
            hitbox_size: vec3(size[0], size[1], size[2]),
            hitbox_pos_offset: vec3(offset[0], offset[1], offset[2]),
            front_wheels: wheel_pair(front),
            back_wheels: wheel_pair(back),
            dodge_deadzone: DEFAULT_DODGE_DEADZONE,
        }
    }

    /// Case-insensitive lookup by name (`"octane"`, `"DOMINUS"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let want = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|p| p.name() == want)
    }

    /// Lower-case preset name.
    pub fn name(self) -> &'static str {
        match self {
            CarConfigPreset::Octane => "octane",
            CarConfigPreset::Dominus => "dominus",
            CarConfigPreset::Plank => "plank",
            CarConfigPreset::Breakout => "breakout",
            CarConfigPreset::Hybrid => "hybrid",
            CarConfigPreset::Merc => "merc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_has_a_table_row() {
        for p in CarConfigPreset::ALL {
            assert!(PRESETS.iter().any(|(q, _)| *q == p), "{p:?} missing");
        }
    }

    #[test]
    fn presets_differ() {
        assert_ne!(CarConfigPreset::Octane.config(), CarConfigPreset::Dominus.config());
        assert_eq!(CarConfigPreset::Merc.config().front_wheels.wheel_radius, 15.0);
        assert_eq!(CarConfigPreset::Plank.config().back_wheels.wheel_radius, 17.0);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(CarConfigPreset::from_name("BREAKOUT"), Some(CarConfigPreset::Breakout));
        assert_eq!(CarConfigPreset::from_name("batmobile"), None);
        for p in CarConfigPreset::ALL {
            assert_eq!(CarConfigPreset::from_name(p.name()), Some(p));
        }
    }

    #[test]
    fn config_serde_shape() {
        let json = serde_json::to_value(CarConfigPreset::Octane.config()).unwrap();
        assert!(json.get("hitbox_size").is_some());
        assert!(json["front_wheels"].get("connection_point_offset").is_some());
        assert_eq!(serde_json::to_value(CarConfigPreset::Hybrid).unwrap(), "hybrid");
    }
}
