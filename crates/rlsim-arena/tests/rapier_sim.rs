use approx::assert_relative_eq;
use rlsim_arena::{Arena, ArenaConfig, BallRadiusPolicy, BallState, CarState};
use rlsim_core::consts::kickoff::CAR_SPAWN_REST_Z;
use rlsim_core::consts::vehicle::MAX_SUSPENSION_TRAVEL;
use rlsim_core::consts::{BALL_COLLISION_RADIUS_HOOPS, BALL_COLLISION_RADIUS_SOCCAR};
use rlsim_core::{vec3, CarId, GameMode, Team};
use rlsim_vehicles::{CarConfigPreset, CarControls};

fn kickoff_arena(seed: u64) -> (Arena, Vec<CarId>) {
    let mut a = Arena::create(GameMode::Soccar).unwrap();
    let ids = vec![
        a.add_car(Team::Blue, CarConfigPreset::Octane.config()).unwrap(),
        a.add_car(Team::Orange, CarConfigPreset::Dominus.config()).unwrap(),
    ];
    a.reset_to_random_kickoff(Some(seed)).unwrap();
    (a, ids)
}

fn drive(a: &mut Arena, ids: &[CarId]) {
    let c = CarControls { throttle: 1.0, steer: 0.3, boost: true, ..Default::default() };
    for id in ids {
        a.set_car_controls(*id, c).unwrap();
    }
}

fn assert_finite(a: &Arena, ids: &[CarId]) {
    let ball = a.ball_state().unwrap();
    assert!(ball.pos.is_finite() && ball.vel.is_finite() && ball.ang_vel.is_finite(), "ball = {ball:?}");
    for id in ids {
        let car = a.car_state(*id).unwrap();
        assert!(car.pos.is_finite() && car.vel.is_finite() && car.ang_vel.is_finite(), "{id}: {car:?}");
    }
}

fn parked_car(a: &mut Arena) -> CarId {
    let id = a.add_car(Team::Blue, CarConfigPreset::Octane.config()).unwrap();
    let spawn = CarState { pos: vec3(0.0, -2000.0, CAR_SPAWN_REST_Z), ..CarState::default() };
    a.set_car_state(id, &spawn).unwrap();
    id
}

#[test]
fn origin_spawn_stays_finite_and_within_suspension_travel() {
    let mut a = Arena::create(GameMode::Soccar).unwrap();
    let id = a.add_car(Team::Blue, CarConfigPreset::Octane.config()).unwrap();
    assert_eq!(id, CarId(1));
    a.step(1).unwrap();

    assert_finite(&a, &[id]);
    let car = a.car_state(id).unwrap();
    assert!(car.pos.z.abs() <= MAX_SUSPENSION_TRAVEL, "car z = {}", car.pos.z);
}

#[test]
fn single_car_first_tick_stays_within_suspension_travel() {
    let mut a = Arena::create(GameMode::Soccar).unwrap();
    let id = parked_car(&mut a);
    assert_eq!(id, CarId(1));
    a.step(1).unwrap();

    assert_finite(&a, &[id]);
    let car = a.car_state(id).unwrap();
    assert!((car.pos.z - CAR_SPAWN_REST_Z).abs() <= MAX_SUSPENSION_TRAVEL, "car z = {}", car.pos.z);

    let ball = a.ball_state().unwrap();
    assert!((ball.pos.z - a.ball().radius()).abs() < 1.0, "ball z = {}", ball.pos.z);
    assert!(ball.vel.length() < 10.0, "ball speed = {}", ball.vel.length());
}

#[test]
fn idle_car_settles_on_its_wheels() {
    let mut a = Arena::create(GameMode::Soccar).unwrap();
    let id = parked_car(&mut a);

    let mut peak = f32::MIN;
    for _ in 0..240 {
        a.step(1).unwrap();
        peak = peak.max(a.car_state(id).unwrap().pos.z);
    }
    assert_finite(&a, &[id]);

    let car = a.car_state(id).unwrap();
    assert!(peak <= CAR_SPAWN_REST_Z + MAX_SUSPENSION_TRAVEL, "peak z = {peak}");
    assert!((car.pos.z - CAR_SPAWN_REST_Z).abs() <= MAX_SUSPENSION_TRAVEL, "car z = {}", car.pos.z);
    assert!(car.vel.z.abs() < 5.0, "vz = {}", car.vel.z);
    assert!(car.vel.length() < 10.0, "speed = {}", car.vel.length());
    assert!(car.is_on_ground);
    assert_eq!(car.wheels_with_contact, [true; 4]);
}

#[test]
fn throttle_drives_the_car_along_the_ground() {
    let mut a = Arena::create(GameMode::Soccar).unwrap();
    let id = parked_car(&mut a);
    a.step(60).unwrap();
    a.set_car_controls(id, CarControls { throttle: 1.0, ..Default::default() }).unwrap();
    a.step(120).unwrap();

    assert_finite(&a, &[id]);
    let car = a.car_state(id).unwrap();
    assert!(car.vel.x > 300.0, "forward speed = {}", car.vel.x);
    assert!(car.is_on_ground);
    assert!((car.pos.z - CAR_SPAWN_REST_Z).abs() <= MAX_SUSPENSION_TRAVEL, "car z = {}", car.pos.z);
}

#[test]
fn identical_arenas_stay_in_lockstep() {
    let (mut a, ids_a) = kickoff_arena(11);
    let (mut b, ids_b) = kickoff_arena(11);
    let start = a.car_state(ids_a[0]).unwrap().pos;
    drive(&mut a, &ids_a);
    drive(&mut b, &ids_b);
    for _ in 0..4 {
        a.step(30).unwrap();
        b.step(30).unwrap();
        assert_finite(&a, &ids_a);
        assert_eq!(a.state_hash().unwrap(), b.state_hash().unwrap());
    }
    let moved = (a.car_state(ids_a[0]).unwrap().pos - start).length();
    assert!(moved > 200.0, "blue car moved {moved}");
}

#[test]
fn one_multi_tick_step_matches_single_ticks() {
    let (mut a, ids_a) = kickoff_arena(5);
    let (mut b, ids_b) = kickoff_arena(5);
    drive(&mut a, &ids_a);
    drive(&mut b, &ids_b);

    a.step(40).unwrap();
    for _ in 0..40 {
        b.step(1).unwrap();
    }
    assert_finite(&a, &ids_a);
    assert_finite(&b, &ids_b);
    assert_eq!(a.tick_count(), b.tick_count());
    assert_eq!(a.state_hash().unwrap(), b.state_hash().unwrap());
    assert_eq!(a.car_state(ids_a[1]).unwrap().pos, b.car_state(ids_b[1]).unwrap().pos);
}

#[test]
fn dropped_ball_settles_on_the_floor() {
    let mut a = Arena::create(GameMode::Soccar).unwrap();
    let r = a.ball().radius();
    a.set_ball_state(&BallState { pos: vec3(0.0, 0.0, 300.0), ..BallState::default() }).unwrap();
    a.step(600).unwrap();
    let ball = a.ball_state().unwrap();
    assert!((ball.pos.z - r).abs() < 2.0, "ball z = {}", ball.pos.z);
    assert!(ball.vel.length() < 20.0);
}

#[test]
fn ball_radius_follows_policy() {
    let a = Arena::create(GameMode::Hoops).unwrap();
    assert_relative_eq!(a.ball().radius(), BALL_COLLISION_RADIUS_SOCCAR);

    let cfg = ArenaConfig { ball_radius_policy: BallRadiusPolicy::PerMode, ..ArenaConfig::default() };
    let b = Arena::create_with_config(GameMode::Hoops, cfg).unwrap();
    assert_relative_eq!(b.ball().radius(), BALL_COLLISION_RADIUS_HOOPS);
    assert_relative_eq!(b.ball_state().unwrap().pos.z, BALL_COLLISION_RADIUS_HOOPS, epsilon = 1e-3);
}

#[test]
fn removed_cars_leave_the_world() {
    let (mut a, ids) = kickoff_arena(1);
    assert_eq!(a.engine().live_body_count(), 4);
    assert!(a.remove_car(ids[0]));
    assert_eq!(a.engine().live_body_count(), 3);
    a.step(10).unwrap();
    assert_eq!(a.num_cars(), 1);
}
