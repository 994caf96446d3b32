use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation variant. Fixed for an arena's lifetime.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Soccar,
    Hoops,
    Heatseeker,
    Dropshot,
}

impl GameMode {
    /// The ball radius this mode plays with in the real game.
    pub fn ball_radius(self) -> f32 {
        match self {
            GameMode::Soccar | GameMode::Heatseeker => BALL_COLLISION_RADIUS_SOCCAR,
            GameMode::Hoops => BALL_COLLISION_RADIUS_HOOPS,
            GameMode::Dropshot => BALL_COLLISION_RADIUS_DROPSHOT,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Blue,
    Orange,
}

impl Team {
    #[inline] pub fn opponent(self) -> Team {
        match self { Team::Blue => Team::Orange, Team::Orange => Team::Blue }
    }
}
