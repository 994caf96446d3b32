use rlsim_core::GameMode;
use rlsim_vehicles::WheelLayoutSource;
use serde::{Deserialize, Serialize};

/// How the ball radius is picked from the game mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallRadiusPolicy {
    /// Soccar radius in every mode.
    #[default]
    AlwaysDefault,
    /// [`GameMode::ball_radius`].
    PerMode,
}

impl BallRadiusPolicy {
    pub fn radius(self, mode: GameMode) -> f32 {
        match self {
            BallRadiusPolicy::AlwaysDefault => GameMode::Soccar.ball_radius(),
            BallRadiusPolicy::PerMode => mode.ball_radius(),
        }
    }
}

/// Arena-wide knobs. The default reproduces the reference behaviour.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub ball_radius_policy: BallRadiusPolicy,
    pub wheel_layout: WheelLayoutSource,
    /// Seed of the kickoff shuffle RNG.
    pub kickoff_seed: u64,
    pub goal_hook_enabled: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            ball_radius_policy: BallRadiusPolicy::AlwaysDefault,
            wheel_layout: WheelLayoutSource::Reference,
            kickoff_seed: 0x5EED_C0FFEE,
            goal_hook_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_ignores_mode() {
        let p = BallRadiusPolicy::default();
        assert_eq!(p.radius(GameMode::Hoops), p.radius(GameMode::Soccar));
        assert_ne!(BallRadiusPolicy::PerMode.radius(GameMode::Hoops), p.radius(GameMode::Soccar));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: ArenaConfig = serde_json::from_str(r#"{ "ball_radius_policy": "per_mode" }"#).unwrap();
        assert_eq!(c.ball_radius_policy, BallRadiusPolicy::PerMode);
        assert_eq!(c.wheel_layout, WheelLayoutSource::Reference);
        assert!(c.goal_hook_enabled);
    }
}
