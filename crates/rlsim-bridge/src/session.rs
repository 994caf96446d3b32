use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rlsim_vehicles::{CarConfigPreset, CarControls};

use crate::game::Game;

const MAX_SESSION_TICKS: u32 = 120 * 60 * 60;

/// A scripted run: which car, how long, and what the driver does when.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionDescriptor {
    pub collision_meshes: PathBuf,
    pub preset: String,
    #[serde(default)]
    pub kickoff_seed: Option<u64>,
    pub ticks: u32,
    /// Control changes, strictly increasing `at_tick`.
    #[serde(default)]
    pub controls: Vec<ControlStep>,
}

/// Controls that take effect at `at_tick` and hold until the next step.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ControlStep {
    pub at_tick: u32,
    pub controls: CarControls,
}

/// Case-insensitive preset lookup with a helpful error.
pub fn preset_by_name(name: &str) -> Result<CarConfigPreset> {
    CarConfigPreset::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = CarConfigPreset::ALL.iter().map(|p| p.name()).collect();
        anyhow!("unknown car preset {name:?} (expected one of {})", known.join(", "))
    })
}

fn check_axis(what: &str, v: f32, at: u32) -> Result<()> {
    if !v.is_finite() || !(-1.0..=1.0).contains(&v) {
        bail!("controls at tick {at}: {what} = {v} outside [-1, 1]");
    }
    Ok(())
}

impl SessionDescriptor {
    /// Check everything the runner relies on and resolve the preset.
    pub fn validate(&self) -> Result<CarConfigPreset> {
        let preset = preset_by_name(&self.preset)?;
        if self.ticks == 0 || self.ticks > MAX_SESSION_TICKS {
            bail!("ticks out of range: {} (1..={MAX_SESSION_TICKS})", self.ticks);
        }

        let mut prev: Option<u32> = None;
        for step in &self.controls {
            if prev.is_some_and(|p| step.at_tick <= p) {
                bail!("control schedule not strictly increasing at tick {}", step.at_tick);
            }
            if step.at_tick >= self.ticks {
                bail!("control step at tick {} is past the session end ({})", step.at_tick, self.ticks);
            }
            let c = &step.controls;
            for (what, v) in [("throttle", c.throttle), ("steer", c.steer), ("pitch", c.pitch), ("yaw", c.yaw), ("roll", c.roll)] {
                check_axis(what, v, step.at_tick)?;
            }
            prev = Some(step.at_tick);
        }
        Ok(preset)
    }

    /// `(start, end, controls)` spans covering the schedule; ticks before the
    /// first step run with neutral controls.
    pub fn spans(&self) -> Vec<(u32, u32, CarControls)> {
        let mut out = Vec::with_capacity(self.controls.len() + 1);
        let mut start = 0;
        let mut current = CarControls::default();
        for step in &self.controls {
            if step.at_tick > start {
                out.push((start, step.at_tick, current));
            }
            start = step.at_tick;
            current = step.controls;
        }
        if self.ticks > start {
            out.push((start, self.ticks, current));
        }
        out
    }
}

pub fn load_session(path: impl AsRef<Path>) -> Result<SessionDescriptor> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading session {}", path.display()))?;
    let session: SessionDescriptor =
        serde_json::from_str(&text).with_context(|| format!("parsing session {}", path.display()))?;
    session.validate().with_context(|| format!("validating session {}", path.display()))?;
    Ok(session)
}

/// Build a [`Game`] for `session` and play the whole schedule.
pub fn run_session(session: &SessionDescriptor) -> Result<Game> {
    let preset = session.validate()?;
    let mut game = Game::new(&session.collision_meshes, preset)?;
    if let Some(seed) = session.kickoff_seed {
        game.reset_to_kickoff_seeded(seed)?;
    }
    for (start, end, controls) in session.spans() {
        debug!(start, end, "session span");
        game.set_controls(controls)?;
        game.step(end - start)?;
    }
    Ok(game)
}
