use std::mem;

use tracing::{debug, trace, warn};

use rlsim_core::consts::{CAR_WORLD_FRICTION, CAR_WORLD_RESTITUTION, GRAVITY_Z, SOCCAR_GOAL_LINE_Y, TICK_TIME, UU_TO_BT};
use rlsim_core::{
    hash_f32, hash_quat, hash_vec3, vec3, BodyHandle, CarId, DeterminismContract, EngineResult, GameMode, ShapeHandle, SimError, SimResult,
    StepHasher, Team, XorShift64,
};
use rlsim_engine::{BodyDesc, PhysicsEngine, RapierEngine, WheelInfo};
use rlsim_geom::{Material, Shape};
use rlsim_vehicles::{CarConfig, CarControls};

use crate::ball::Ball;
use crate::car::Car;
use crate::config::ArenaConfig;
use crate::kickoff::{self, SPAWN_SPOTS};
use crate::state::{BallState, CarState};

/// Invoked once per goal with the scoring team.
pub type GoalScoreCallback<E> = Box<dyn FnMut(&Arena<E>, Team)>;

/// Static collision owned by the arena rather than by a car or the ball.
#[derive(Debug)]
struct AuxObject {
    shape: ShapeHandle,
    body: BodyHandle,
}

impl AuxObject {
    /// The floor: a static half-space below `z = 0`.
    fn ground<E: PhysicsEngine>(engine: &mut E) -> EngineResult<Self> {
        let shape = engine.create_shape(Shape::Plane { normal: vec3(0.0, 0.0, 1.0), offset: 0.0 })?;
        let material = Material { friction: CAR_WORLD_FRICTION, restitution: CAR_WORLD_RESTITUTION };
        let body = match engine.create_body(BodyDesc::fixed(shape, material)) {
            Ok(b) => b,
            Err(e) => {
                let _ = engine.destroy_shape(shape);
                return Err(e);
            }
        };
        if let Err(e) = engine.add_body(body) {
            let _ = engine.destroy_body(body);
            let _ = engine.destroy_shape(shape);
            return Err(e);
        }
        Ok(Self { shape, body })
    }

    fn release<E: PhysicsEngine>(&self, engine: &mut E) -> EngineResult<()> {
        if engine.is_in_world(self.body) {
            engine.remove_body(self.body)?;
        }
        engine.destroy_body(self.body)?;
        engine.destroy_shape(self.shape)
    }
}

/// A world holding one ball and any number of cars, advanced in fixed ticks.
pub struct Arena<E: PhysicsEngine = RapierEngine> {
    engine: E,
    game_mode: GameMode,
    config: ArenaConfig,
    ball: Ball,
    cars: Vec<Car>,
    last_car_id: u32,
    tick_count: u64,
    aux: Vec<AuxObject>,
    goal_callbacks: Vec<GoalScoreCallback<E>>,
    goal_latched: bool,
    rng: XorShift64,
}

impl Arena<RapierEngine> {
    /// Arena on the rapier backend with the default configuration.
    pub fn create(game_mode: GameMode) -> SimResult<Self> {
        Self::with_engine(RapierEngine::new(), game_mode, ArenaConfig::default())
    }

    pub fn create_with_config(game_mode: GameMode, config: ArenaConfig) -> SimResult<Self> {
        Self::with_engine(RapierEngine::new(), game_mode, config)
    }
}

impl<E: PhysicsEngine> Arena<E> {
    /// Set gravity, lay the floor and spawn the ball. Nothing is left behind
    /// in `engine` if any of that fails.
    pub fn with_engine(mut engine: E, game_mode: GameMode, config: ArenaConfig) -> SimResult<Self> {
        engine.set_gravity(vec3(0.0, 0.0, GRAVITY_Z * UU_TO_BT));
        let ground = AuxObject::ground(&mut engine)?;

        let ball = match Ball::spawn(&mut engine, config.ball_radius_policy.radius(game_mode)) {
            Ok(b) => b,
            Err(e) => {
                let _ = ground.release(&mut engine);
                return Err(e.into());
            }
        };

        debug!(?game_mode, ball_radius = ball.radius(), "arena created");
        Ok(Self {
            engine,
            game_mode,
            config,
            ball,
            cars: Vec::new(),
            last_car_id: 0,
            tick_count: 0,
            aux: vec![ground],
            goal_callbacks: Vec::new(),
            goal_latched: false,
            rng: XorShift64::new(config.kickoff_seed),
        })
    }

    #[inline] pub fn game_mode(&self) -> GameMode { self.game_mode }
    #[inline] pub fn config(&self) -> &ArenaConfig { &self.config }
    #[inline] pub fn tick_count(&self) -> u64 { self.tick_count }
    #[inline] pub fn engine(&self) -> &E { &self.engine }
    #[inline] pub fn ball(&self) -> &Ball { &self.ball }

    /* ---- cars ---- */

    /// Build a car at the origin and return its id. Ids start at 1 and are
    /// never reused; a failed build leaves the arena unchanged.
    pub fn add_car(&mut self, team: Team, config: CarConfig) -> SimResult<CarId> {
        let id = CarId(self.last_car_id + 1);
        let car = Car::spawn(&mut self.engine, id, team, config, self.config.wheel_layout)?;
        self.last_car_id = id.0;
        self.cars.push(car);
        debug!(car = %id, ?team, "car added");
        Ok(id)
    }

    /// `false` if no car has this id.
    pub fn remove_car(&mut self, id: CarId) -> bool {
        let Some(idx) = self.cars.iter().position(|c| c.id() == id) else { return false };
        let car = self.cars.remove(idx);
        if let Err(e) = car.release(&mut self.engine) {
            warn!(car = %id, error = %e, "car release failed");
        }
        debug!(car = %id, "car removed");
        true
    }

    pub fn get_car(&self, id: CarId) -> Option<&Car> {
        self.cars.iter().find(|c| c.id() == id)
    }

    pub fn get_car_mut(&mut self, id: CarId) -> Option<&mut Car> {
        self.cars.iter_mut().find(|c| c.id() == id)
    }

    /// Cars in insertion order.
    pub fn cars(&self) -> impl Iterator<Item = &Car> + '_ { self.cars.iter() }
    #[inline] pub fn num_cars(&self) -> usize { self.cars.len() }

    fn car_index(&self, id: CarId) -> SimResult<usize> {
        self.cars.iter().position(|c| c.id() == id).ok_or(SimError::UnknownCar(id))
    }

    pub fn car_state(&self, id: CarId) -> SimResult<CarState> {
        let car = &self.cars[self.car_index(id)?];
        Ok(car.state(&self.engine)?)
    }

    pub fn set_car_state(&mut self, id: CarId, state: &CarState) -> SimResult<()> {
        let idx = self.car_index(id)?;
        self.cars[idx].set_state(&mut self.engine, state)?;
        Ok(())
    }

    pub fn set_car_controls(&mut self, id: CarId, controls: CarControls) -> SimResult<()> {
        let idx = self.car_index(id)?;
        self.cars[idx].controls = controls;
        Ok(())
    }

    /// Wheel tuning and last contacts, front pair first.
    pub fn car_wheels(&self, id: CarId) -> SimResult<&[WheelInfo]> {
        let car = &self.cars[self.car_index(id)?];
        Ok(self.engine.wheels(car.vehicle())?)
    }

    /* ---- ball ---- */

    pub fn ball_state(&self) -> SimResult<BallState> {
        Ok(self.ball.state(&self.engine)?)
    }

    pub fn set_ball_state(&mut self, state: &BallState) -> SimResult<()> {
        self.ball.set_state(&mut self.engine, state)?;
        self.goal_latched = false;
        Ok(())
    }

    /* ---- goals ---- */

    pub fn register_goal_score_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&Arena<E>, Team) + 'static,
    {
        self.goal_callbacks.push(Box::new(callback));
    }

    /// Team credited if the ball is beyond a Soccar goal line right now.
    fn goal_scorer(&self) -> SimResult<Option<Team>> {
        if self.game_mode != GameMode::Soccar {
            return Ok(None);
        }
        let y = self.ball_state()?.pos.y;
        if y.abs() <= SOCCAR_GOAL_LINE_Y + self.ball.radius() {
            return Ok(None);
        }
        Ok(Some(if y > 0.0 { Team::Blue } else { Team::Orange }))
    }

    fn check_goal(&mut self) -> SimResult<()> {
        let Some(scorer) = self.goal_scorer()? else {
            self.goal_latched = false;
            return Ok(());
        };
        if mem::replace(&mut self.goal_latched, true) {
            return Ok(());
        }
        debug!(?scorer, tick = self.tick_count, "goal scored");
        let mut callbacks = mem::take(&mut self.goal_callbacks);
        for cb in callbacks.iter_mut() {
            cb(&*self, scorer);
        }
        self.goal_callbacks = callbacks;
        Ok(())
    }

    /* ---- stepping ---- */

    /// Advance `ticks` fixed ticks. Each tick runs every car's pre-tick hook,
    /// one engine step of [`TICK_TIME`], every car's post-tick hook, then the
    /// goal check. Cars are visited in insertion order in both passes.
    pub fn step(&mut self, ticks: u32) -> SimResult<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    fn tick(&mut self) -> SimResult<()> {
        let dt = TICK_TIME;
        for car in &mut self.cars {
            car.pre_tick(&mut self.engine, dt)?;
        }
        self.engine.step(dt)?;
        for car in &mut self.cars {
            car.post_tick(&self.engine, dt)?;
        }
        self.tick_count += 1;
        trace!(tick = self.tick_count, cars = self.cars.len(), "tick");

        if self.config.goal_hook_enabled {
            self.check_goal()?;
        }
        Ok(())
    }

    /* ---- kickoff ---- */

    /// Ball to its spawn, cars onto shuffled kickoff spots with spawn boost.
    /// `seed` reseeds the shuffle RNG first.
    pub fn reset_to_random_kickoff(&mut self, seed: Option<u64>) -> SimResult<()> {
        if let Some(seed) = seed {
            self.rng = XorShift64::new(seed);
        }
        let order = kickoff::shuffled_spots(&mut self.rng);
        let mut placed = [0usize; 2];
        for car in &mut self.cars {
            let n = &mut placed[car.team() as usize];
            let spawn = kickoff::spawn_pose(car.team(), order[*n % SPAWN_SPOTS]);
            *n += 1;
            car.reset_for_kickoff(&mut self.engine, spawn.pos, spawn.rot_mat)?;
        }
        self.ball.set_state(&mut self.engine, &Ball::rest_state(self.ball.radius()))?;
        self.goal_latched = false;
        debug!(cars = self.cars.len(), rng = self.rng.state(), "kickoff reset");
        Ok(())
    }

    /* ---- hashing ---- */

    /// blake3 digest of the tick counter, RNG, ball and every car in order.
    pub fn state_hash(&self) -> SimResult<[u8; 32]> {
        let mut h = StepHasher::new();
        h.update_bytes(&DeterminismContract::default_contract().digest());
        h.update_bytes(&self.tick_count.to_le_bytes());
        h.update_bytes(&self.rng.state().to_le_bytes());

        let ball = self.engine.phys_state(self.ball.body())?;
        hash_vec3(&mut h, &ball.pose.pos);
        hash_vec3(&mut h, &ball.vel.lin);
        hash_vec3(&mut h, &ball.vel.ang);

        for car in &self.cars {
            let p = self.engine.phys_state(car.body())?;
            let s = car.last_state();
            h.update_bytes(&car.id().0.to_le_bytes());
            hash_vec3(&mut h, &p.pose.pos);
            hash_quat(&mut h, &p.pose.rot);
            hash_vec3(&mut h, &p.vel.lin);
            hash_vec3(&mut h, &p.vel.ang);
            hash_f32(&mut h, s.boost);
            let flags = [s.is_on_ground, s.has_jumped, s.has_double_jumped, s.has_flipped, s.is_jumping];
            h.update_bytes(&flags.map(u8::from));
        }
        Ok(h.finalize())
    }
}

impl<E: PhysicsEngine> Drop for Arena<E> {
    /// World first, then floor, then cars, then the ball.
    fn drop(&mut self) {
        self.engine.destroy_world();
        for aux in self.aux.drain(..) {
            if let Err(e) = aux.release(&mut self.engine) {
                warn!(error = %e, "aux object release failed");
            }
        }
        for car in self.cars.drain(..) {
            if let Err(e) = car.release(&mut self.engine) {
                warn!(car = %car.id(), error = %e, "car release failed");
            }
        }
        if let Err(e) = self.ball.release(&mut self.engine) {
            warn!(error = %e, "ball release failed");
        }
        debug!(ticks = self.tick_count, "arena destroyed");
    }
}
