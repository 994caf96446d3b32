//! rlsim — drive one car around a soccar arena from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rlsim_bridge::{load_session, preset_by_name, run_session, CarControls, ControlStep, GameState, SessionDescriptor};
use rlsim_core::hex32;

#[derive(Parser, Debug)]
#[command(name = "rlsim", version, about = "Step a single-car soccar arena and print the final state")]
struct Opts {
    /// JSON session file; overrides every flag below except the output ones.
    #[arg(long)]
    session: Option<PathBuf>,

    /// Collision mesh folder (recorded only)
    #[arg(long, default_value = "collision_meshes")]
    meshes: PathBuf,

    /// Car preset: octane, dominus, plank, breakout, hybrid, merc
    #[arg(long, default_value = "octane")]
    preset: String,

    /// Ticks to simulate at 120 Hz
    #[arg(long, default_value_t = 120)]
    ticks: u32,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    throttle: f32,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    steer: f32,

    #[arg(long, action = ArgAction::SetTrue)]
    boost: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    jump: bool,

    /// Kickoff seed; without it the car stays at the arena origin
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final state as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Print the blake3 state hash
    #[arg(long, action = ArgAction::SetTrue)]
    hash: bool,
}

impl Opts {
    fn session(&self) -> Result<SessionDescriptor> {
        if let Some(path) = &self.session {
            return load_session(path);
        }
        let controls = CarControls {
            throttle: self.throttle,
            steer: self.steer,
            boost: self.boost,
            jump: self.jump,
            ..Default::default()
        };
        let session = SessionDescriptor {
            collision_meshes: self.meshes.clone(),
            preset: self.preset.clone(),
            kickoff_seed: self.seed,
            ticks: self.ticks,
            controls: vec![ControlStep { at_tick: 0, controls }],
        };
        session.validate().context("invalid flags")?;
        Ok(session)
    }
}

fn print_state(s: &GameState) {
    let c = &s.car;
    println!("Tick:   {}", s.tick);
    println!("Ball:   pos ({:.2}, {:.2}, {:.2})  vel ({:.2}, {:.2}, {:.2})",
        s.ball.pos.x, s.ball.pos.y, s.ball.pos.z, s.ball.vel.x, s.ball.vel.y, s.ball.vel.z);
    println!("Car:    pos ({:.2}, {:.2}, {:.2})  vel ({:.2}, {:.2}, {:.2})",
        c.pos.x, c.pos.y, c.pos.z, c.vel.x, c.vel.y, c.vel.z);
    println!("Angle:  yaw {:.4}  pitch {:.4}  roll {:.4}", c.angle.yaw, c.angle.pitch, c.angle.roll);
    println!("Boost:  {:.2}  on ground: {}", c.boost, c.is_on_ground);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let session = opts.session()?;
    let preset = preset_by_name(&session.preset)?;
    info!(preset = preset.name(), ticks = session.ticks, "running session");

    let game = run_session(&session)?;
    let state = game.state()?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("Preset: {}", preset.name());
        print_state(&state);
    }
    if opts.hash {
        println!("Hash:   {}", hex32(game.state_hash()?));
    }
    Ok(())
}
