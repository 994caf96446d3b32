use rapier3d::control::{DynamicRayCastVehicleController, WheelTuning};
use rapier3d::na::{Isometry3, Translation3, Unit};
use rapier3d::prelude::{
    CCDSolver, ColliderBuilder, ColliderSet, DefaultBroadPhase, ImpulseJointSet, IntegrationParameters,
    IslandManager, MassProperties, MultibodyJointSet, NarrowPhase, PhysicsPipeline, QueryFilter, QueryPipeline,
    RigidBodyBuilder, RigidBodyHandle, RigidBodySet, SharedShape,
};
use tracing::{debug, trace};

use rlsim_core::types::{Isometry, PhysState, Vec3, Velocity};
use rlsim_core::{BodyHandle, EngineError, EngineResult, ShapeHandle, VehicleHandle};
use rlsim_geom::mass::local_inertia;
use rlsim_geom::Shape;

use crate::convert::{from_na, from_na_point, from_na_quat, to_na, to_na_iso, to_na_point, to_na_quat};
use crate::desc::{BodyDesc, BodyKind, VehicleAxes, WheelDesc, WheelInfo};
use crate::engine::PhysicsEngine;

struct World {
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    queries: QueryPipeline,
    /// Colliders were added or removed since the query pipeline last saw them.
    queries_dirty: bool,
}

impl World {
    fn new() -> Self {
        Self {
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            queries: QueryPipeline::new(),
            queries_dirty: false,
        }
    }

    fn read_state(&self, rb: RigidBodyHandle) -> Option<PhysState> {
        let b = self.bodies.get(rb)?;
        Some(PhysState {
            pose: Isometry { pos: from_na(b.translation()), rot: from_na_quat(b.rotation()) },
            vel: Velocity { lin: from_na(b.linvel()), ang: from_na(b.angvel()) },
        })
    }
}

struct ShapeEntry {
    shape: Shape,
    shared: SharedShape,
}

struct BodyEntry {
    desc: BodyDesc,
    live: Option<RigidBodyHandle>,
}

struct VehicleEntry {
    chassis: BodyHandle,
    controller: DynamicRayCastVehicleController,
    wheels: Vec<WheelInfo>,
}

/// [`PhysicsEngine`] backed by rapier3d, stepped on the calling thread.
///
/// Vehicles are updated in creation order before every pipeline step, so two
/// engines fed the same calls produce bit-identical states.
pub struct RapierEngine {
    world: Option<World>,
    gravity: Vec3,
    shapes: Vec<Option<ShapeEntry>>,
    bodies: Vec<Option<BodyEntry>>,
    vehicles: Vec<Option<VehicleEntry>>,
}

impl Default for RapierEngine {
    fn default() -> Self { Self::new() }
}

impl RapierEngine {
    pub fn new() -> Self {
        Self { world: Some(World::new()), gravity: Vec3::ZERO, shapes: Vec::new(), bodies: Vec::new(), vehicles: Vec::new() }
    }

    /// Number of bodies currently in the world.
    pub fn live_body_count(&self) -> usize {
        self.bodies.iter().flatten().filter(|b| b.live.is_some()).count()
    }

    #[inline] pub fn world_destroyed(&self) -> bool { self.world.is_none() }

    fn shape(&self, h: ShapeHandle) -> EngineResult<&ShapeEntry> {
        self.shapes.get(h.0 as usize).and_then(Option::as_ref).ok_or(EngineError::UnknownShape(h))
    }

    fn body(&self, h: BodyHandle) -> EngineResult<&BodyEntry> {
        self.bodies.get(h.0 as usize).and_then(Option::as_ref).ok_or(EngineError::UnknownBody(h))
    }

    fn body_mut(&mut self, h: BodyHandle) -> EngineResult<&mut BodyEntry> {
        self.bodies.get_mut(h.0 as usize).and_then(Option::as_mut).ok_or(EngineError::UnknownBody(h))
    }

    fn vehicle(&self, h: VehicleHandle) -> EngineResult<&VehicleEntry> {
        self.vehicles.get(h.0 as usize).and_then(Option::as_ref).ok_or(EngineError::UnknownVehicle(h))
    }

    fn vehicle_mut(&mut self, h: VehicleHandle) -> EngineResult<&mut VehicleEntry> {
        self.vehicles.get_mut(h.0 as usize).and_then(Option::as_mut).ok_or(EngineError::UnknownVehicle(h))
    }

    fn live(&self, h: BodyHandle) -> EngineResult<RigidBodyHandle> {
        self.body(h)?.live.ok_or(EngineError::BodyNotInWorld(h))
    }
}

fn shared_shape(shape: &Shape) -> EngineResult<SharedShape> {
    Ok(match shape {
        Shape::Sphere { r } => SharedShape::ball(*r),
        Shape::Box { hx, hy, hz } => SharedShape::cuboid(*hx, *hy, *hz),
        Shape::Plane { normal, .. } => SharedShape::halfspace(Unit::new_normalize(to_na(*normal))),
        Shape::Compound { children } => {
            let mut parts = Vec::with_capacity(children.len());
            for (local, child) in children {
                if !child.is_convex() { return Err(EngineError::NonConvexCompoundChild); }
                parts.push((to_na_iso(local), shared_shape(child)?));
            }
            SharedShape::compound(parts)
        }
    })
}

/// Collider placement relative to its body; only planes carry an offset.
fn collider_offset(shape: &Shape) -> Isometry3<f32> {
    match shape {
        Shape::Plane { normal, offset } => {
            let t = normal.normalize_or_zero() * *offset;
            Isometry3::from_parts(Translation3::new(t.x, t.y, t.z), to_na_quat(rlsim_core::Quat::IDENTITY))
        }
        _ => Isometry3::identity(),
    }
}

/// rapier multiplies the spring and damper terms by the chassis mass, so the
/// absolute tuning in [`WheelInfo`] is divided by it on the way in.
fn push_wheel(rw: &mut rapier3d::control::Wheel, w: &WheelInfo, inv_mass: f32) {
    rw.suspension_stiffness = w.suspension_stiffness * inv_mass;
    rw.damping_compression = w.damping_compression * inv_mass;
    rw.damping_relaxation = w.damping_relaxation * inv_mass;
    rw.max_suspension_travel = w.max_suspension_travel;
    rw.max_suspension_force = w.max_suspension_force;
    rw.friction_slip = w.friction_slip;
    rw.engine_force = w.engine_force;
    rw.brake = w.brake;
    rw.steering = w.steering;
}

impl PhysicsEngine for RapierEngine {
    fn set_gravity(&mut self, gravity: Vec3) { self.gravity = gravity; }

    fn create_shape(&mut self, shape: Shape) -> EngineResult<ShapeHandle> {
        let shared = shared_shape(&shape)?;
        let h = ShapeHandle(self.shapes.len() as u32);
        self.shapes.push(Some(ShapeEntry { shape, shared }));
        trace!(%h, "shape created");
        Ok(h)
    }

    fn destroy_shape(&mut self, shape: ShapeHandle) -> EngineResult<()> {
        let slot = self.shapes.get_mut(shape.0 as usize).ok_or(EngineError::UnknownShape(shape))?;
        slot.take().ok_or(EngineError::UnknownShape(shape))?;
        trace!(h = %shape, "shape destroyed");
        Ok(())
    }

    fn local_inertia(&self, shape: ShapeHandle, mass: f32) -> EngineResult<Vec3> {
        Ok(local_inertia(&self.shape(shape)?.shape, mass))
    }

    fn create_body(&mut self, desc: BodyDesc) -> EngineResult<BodyHandle> {
        self.shape(desc.shape)?;
        let h = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(Some(BodyEntry { desc, live: None }));
        trace!(%h, kind = ?desc.kind, "body created");
        Ok(h)
    }

    fn destroy_body(&mut self, body: BodyHandle) -> EngineResult<()> {
        if self.body(body)?.live.is_some() { return Err(EngineError::BodyAlreadyInWorld(body)); }
        self.bodies[body.0 as usize] = None;
        trace!(h = %body, "body destroyed");
        Ok(())
    }

    fn add_body(&mut self, body: BodyHandle) -> EngineResult<()> {
        let entry = self.body(body)?;
        if entry.live.is_some() { return Err(EngineError::BodyAlreadyInWorld(body)); }
        let desc = entry.desc;
        let shape = self.shape(desc.shape)?;
        let collider = ColliderBuilder::new(shape.shared.clone())
            .position(collider_offset(&shape.shape))
            .density(0.0)
            .friction(desc.material.friction)
            .restitution(desc.material.restitution)
            .build();

        let builder = match desc.kind {
            BodyKind::Dynamic => RigidBodyBuilder::dynamic().additional_mass_properties(MassProperties::new(
                to_na_point(Vec3::ZERO),
                desc.mass,
                to_na(desc.inertia),
            )),
            BodyKind::Static => RigidBodyBuilder::fixed(),
        };
        let rb = builder
            .position(to_na_iso(&desc.state.pose))
            .linvel(to_na(desc.state.vel.lin))
            .angvel(to_na(desc.state.vel.ang))
            .can_sleep(desc.can_sleep)
            .build();

        let w = self.world.as_mut().ok_or(EngineError::WorldDestroyed)?;
        let rbh = w.bodies.insert(rb);
        w.colliders.insert_with_parent(collider, rbh, &mut w.bodies);
        // The vehicle update runs before the pipeline, so mass must be valid now.
        if let Some(rb) = w.bodies.get_mut(rbh) {
            rb.recompute_mass_properties_from_colliders(&w.colliders);
        }
        w.queries_dirty = true;
        self.body_mut(body)?.live = Some(rbh);
        debug!(h = %body, "body added to world");
        Ok(())
    }

    fn remove_body(&mut self, body: BodyHandle) -> EngineResult<()> {
        let rbh = self.live(body)?;
        let w = self.world.as_mut().ok_or(EngineError::WorldDestroyed)?;
        let last = w.read_state(rbh);
        w.bodies.remove(rbh, &mut w.islands, &mut w.colliders, &mut w.impulse_joints, &mut w.multibody_joints, true);
        w.queries_dirty = true;
        let entry = self.body_mut(body)?;
        if let Some(s) = last { entry.desc.state = s; }
        entry.live = None;
        debug!(h = %body, "body removed from world");
        Ok(())
    }

    fn is_in_world(&self, body: BodyHandle) -> bool {
        self.world.is_some() && self.body(body).map(|b| b.live.is_some()).unwrap_or(false)
    }

    fn step(&mut self, dt: f32) -> EngineResult<()> {
        let Self { world, gravity, bodies, vehicles, .. } = self;
        let w = world.as_mut().ok_or(EngineError::WorldDestroyed)?;
        w.params.dt = dt;
        if w.queries_dirty {
            w.queries.update(&w.colliders);
            w.queries_dirty = false;
        }

        for v in vehicles.iter_mut().flatten() {
            let Some(rbh) = bodies.get(v.chassis.0 as usize).and_then(Option::as_ref).and_then(|b| b.live) else {
                continue;
            };
            let mass = w.bodies.get(rbh).map(|b| b.mass()).unwrap_or(0.0);
            let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
            for (rw, info) in v.controller.wheels_mut().iter_mut().zip(v.wheels.iter()) {
                push_wheel(rw, info, inv_mass);
            }
            v.controller.update_vehicle(dt, &mut w.bodies, &w.colliders, &w.queries, QueryFilter::new().exclude_rigid_body(rbh));
            for (info, rw) in v.wheels.iter_mut().zip(v.controller.wheels().iter()) {
                let rc = rw.raycast_info();
                info.contact.in_contact = rc.is_in_contact;
                info.contact.suspension_length = rc.suspension_length;
                info.contact.contact_point = from_na_point(&rc.contact_point_ws);
            }
        }

        w.pipeline.step(
            &to_na(*gravity),
            &w.params,
            &mut w.islands,
            &mut w.broad_phase,
            &mut w.narrow_phase,
            &mut w.bodies,
            &mut w.colliders,
            &mut w.impulse_joints,
            &mut w.multibody_joints,
            &mut w.ccd,
            Some(&mut w.queries),
            &(),
            &(),
        );
        Ok(())
    }

    fn destroy_world(&mut self) {
        let Some(w) = self.world.take() else { return };
        let mut released = 0usize;
        for entry in self.bodies.iter_mut().flatten() {
            if let Some(rbh) = entry.live.take() {
                if let Some(s) = w.read_state(rbh) { entry.desc.state = s; }
                released += 1;
            }
        }
        debug!(released, "physics world destroyed");
    }

    fn create_vehicle(&mut self, chassis: BodyHandle, axes: VehicleAxes) -> EngineResult<VehicleHandle> {
        let rbh = self.live(chassis)?;
        if self.world.is_none() { return Err(EngineError::WorldDestroyed); }
        let mut controller = DynamicRayCastVehicleController::new(rbh);
        controller.index_up_axis = axes.up;
        controller.index_forward_axis = axes.forward;
        let h = VehicleHandle(self.vehicles.len() as u32);
        self.vehicles.push(Some(VehicleEntry { chassis, controller, wheels: Vec::new() }));
        trace!(%h, %chassis, "vehicle created");
        Ok(h)
    }

    fn add_wheel(&mut self, vehicle: VehicleHandle, desc: WheelDesc) -> EngineResult<usize> {
        let v = self.vehicle_mut(vehicle)?;
        let info = WheelInfo::new(desc);
        let tuning = WheelTuning {
            suspension_stiffness: info.suspension_stiffness,
            suspension_compression: info.damping_compression,
            suspension_damping: info.damping_relaxation,
            max_suspension_travel: info.max_suspension_travel,
            friction_slip: info.friction_slip,
            max_suspension_force: info.max_suspension_force,
            ..WheelTuning::default()
        };
        v.controller.add_wheel(
            to_na_point(desc.connection_point),
            to_na(desc.direction),
            to_na(desc.axle),
            desc.suspension_rest_length,
            desc.radius,
            &tuning,
        );
        v.wheels.push(info);
        Ok(v.wheels.len() - 1)
    }

    fn wheels(&self, vehicle: VehicleHandle) -> EngineResult<&[WheelInfo]> {
        Ok(&self.vehicle(vehicle)?.wheels)
    }

    fn wheels_mut(&mut self, vehicle: VehicleHandle) -> EngineResult<&mut [WheelInfo]> {
        Ok(&mut self.vehicle_mut(vehicle)?.wheels)
    }

    fn destroy_vehicle(&mut self, vehicle: VehicleHandle) -> EngineResult<()> {
        let slot = self.vehicles.get_mut(vehicle.0 as usize).ok_or(EngineError::UnknownVehicle(vehicle))?;
        slot.take().ok_or(EngineError::UnknownVehicle(vehicle))?;
        trace!(h = %vehicle, "vehicle destroyed");
        Ok(())
    }

    fn phys_state(&self, body: BodyHandle) -> EngineResult<PhysState> {
        let entry = self.body(body)?;
        let live = entry.live.zip(self.world.as_ref()).and_then(|(rbh, w)| w.read_state(rbh));
        Ok(live.unwrap_or(entry.desc.state))
    }

    fn set_phys_state(&mut self, body: BodyHandle, state: &PhysState) -> EngineResult<()> {
        let entry = self.body_mut(body)?;
        entry.desc.state = *state;
        let Some(rbh) = entry.live else { return Ok(()) };
        let w = self.world.as_mut().ok_or(EngineError::WorldDestroyed)?;
        let rb = w.bodies.get_mut(rbh).ok_or(EngineError::UnknownBody(body))?;
        rb.set_translation(to_na(state.pose.pos), true);
        rb.set_rotation(to_na_quat(state.pose.rot), true);
        rb.set_linvel(to_na(state.vel.lin), true);
        rb.set_angvel(to_na(state.vel.ang), true);
        Ok(())
    }

    fn apply_central_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> EngineResult<()> {
        let rbh = self.live(body)?;
        let w = self.world.as_mut().ok_or(EngineError::WorldDestroyed)?;
        let rb = w.bodies.get_mut(rbh).ok_or(EngineError::UnknownBody(body))?;
        rb.apply_impulse(to_na(impulse), true);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rlsim_core::vec3;
    use rlsim_geom::Material;

    fn ground(e: &mut RapierEngine) -> BodyHandle {
        let s = e.create_shape(Shape::Plane { normal: Vec3::Z, offset: 0.0 }).unwrap();
        let b = e.create_body(BodyDesc::fixed(s, Material::default())).unwrap();
        e.add_body(b).unwrap();
        b
    }

    fn ball(e: &mut RapierEngine, z: f32) -> BodyHandle {
        let s = e.create_shape(Shape::Sphere { r: 1.0 }).unwrap();
        let inertia = e.local_inertia(s, 30.0).unwrap();
        let desc = BodyDesc::dynamic(s, 30.0, inertia, PhysState::at_rest(vec3(0.0, 0.0, z)), Material::default());
        e.create_body(desc).unwrap()
    }

    #[test]
    fn ball_falls_and_rests_on_ground() {
        let mut e = RapierEngine::new();
        e.set_gravity(vec3(0.0, 0.0, -13.0));
        ground(&mut e);
        let b = ball(&mut e, 3.0);
        e.add_body(b).unwrap();
        for _ in 0..600 { e.step(1.0 / 120.0).unwrap(); }
        let z = e.phys_state(b).unwrap().pose.pos.z;
        assert!((z - 1.0).abs() < 0.05, "z = {z}");
    }

    #[test]
    fn membership_is_checked() {
        let mut e = RapierEngine::new();
        let b = ball(&mut e, 0.0);
        assert_eq!(e.remove_body(b), Err(EngineError::BodyNotInWorld(b)));
        e.add_body(b).unwrap();
        assert_eq!(e.add_body(b), Err(EngineError::BodyAlreadyInWorld(b)));
        assert_eq!(e.destroy_body(b), Err(EngineError::BodyAlreadyInWorld(b)));
        e.remove_body(b).unwrap();
        e.destroy_body(b).unwrap();
        assert_eq!(e.phys_state(b), Err(EngineError::UnknownBody(b)));
    }

    #[test]
    fn destroyed_world_keeps_last_state_and_allows_release() {
        let mut e = RapierEngine::new();
        let b = ball(&mut e, 5.0);
        e.add_body(b).unwrap();
        e.set_phys_state(b, &PhysState::at_rest(vec3(1.0, 2.0, 3.0))).unwrap();
        e.destroy_world();
        assert!(e.world_destroyed());
        assert!(!e.is_in_world(b));
        assert_eq!(e.step(0.01), Err(EngineError::WorldDestroyed));
        assert_eq!(e.phys_state(b).unwrap().pose.pos, vec3(1.0, 2.0, 3.0));
        e.destroy_body(b).unwrap();
        assert_eq!(e.live_body_count(), 0);
    }

    #[test]
    fn compound_rejects_planes() {
        let mut e = RapierEngine::new();
        let bad = Shape::single_child_compound(Isometry::default(), Shape::Plane { normal: Vec3::Z, offset: 0.0 });
        assert_eq!(e.create_shape(bad), Err(EngineError::NonConvexCompoundChild));
    }

    #[test]
    fn added_body_has_its_mass_before_the_first_step() {
        let mut e = RapierEngine::new();
        let b = ball(&mut e, 2.0);
        e.add_body(b).unwrap();
        let rbh = e.live(b).unwrap();
        let rb = &e.world.as_ref().unwrap().bodies[rbh];
        assert_relative_eq!(rb.mass(), 30.0, epsilon = 1e-4);
    }

    fn chassis_with_wheels(e: &mut RapierEngine) -> (BodyHandle, VehicleHandle) {
        let s = e
            .create_shape(Shape::single_child_compound(Isometry::default(), Shape::Box { hx: 1.0, hy: 0.5, hz: 0.2 }))
            .unwrap();
        let inertia = e.local_inertia(s, 180.0).unwrap();
        let chassis = e
            .create_body(
                BodyDesc::dynamic(s, 180.0, inertia, PhysState::at_rest(vec3(0.0, 0.0, 0.6)), Material::default())
                    .never_sleep(),
            )
            .unwrap();
        e.add_body(chassis).unwrap();
        let v = e.create_vehicle(chassis, VehicleAxes::Z_UP_X_FORWARD).unwrap();
        for (x, y) in [(0.8, 0.5), (0.8, -0.5), (-0.8, 0.5), (-0.8, -0.5)] {
            e.add_wheel(v, WheelDesc {
                connection_point: vec3(x, y, 0.0),
                direction: -Vec3::Z,
                axle: -Vec3::Y,
                suspension_rest_length: 0.4,
                radius: 0.25,
                is_front: x > 0.0,
            })
            .unwrap();
        }
        // 4 x 12000 x 0.05 compression carries 180 x 13.
        for w in e.wheels_mut(v).unwrap() {
            w.suspension_stiffness = 12_000.0;
            w.damping_compression = 1_000.0;
            w.damping_relaxation = 1_400.0;
            w.max_suspension_force = f32::MAX;
        }
        (chassis, v)
    }

    #[test]
    fn vehicle_wheels_touch_ground() {
        let mut e = RapierEngine::new();
        e.set_gravity(vec3(0.0, 0.0, -13.0));
        ground(&mut e);
        let (chassis, v) = chassis_with_wheels(&mut e);
        e.step(1.0 / 120.0).unwrap();

        let wheels = e.wheels(v).unwrap();
        assert_eq!(wheels.len(), 4);
        assert!(wheels.iter().all(|w| w.contact.in_contact));
        assert!(wheels.iter().all(|w| w.contact.contact_point.z.abs() < 1e-3));

        let s = e.phys_state(chassis).unwrap();
        assert!(s.pose.pos.is_finite() && s.vel.lin.is_finite() && s.vel.ang.is_finite());
        assert!((s.pose.pos.z - 0.6).abs() < 0.01, "z = {}", s.pose.pos.z);

        e.destroy_vehicle(v).unwrap();
        assert!(e.wheels(v).is_err());
    }

    #[test]
    fn suspended_chassis_settles_at_rest_height() {
        let mut e = RapierEngine::new();
        e.set_gravity(vec3(0.0, 0.0, -13.0));
        ground(&mut e);
        let (chassis, v) = chassis_with_wheels(&mut e);

        let mut peak = 0.0f32;
        for _ in 0..240 {
            e.step(1.0 / 120.0).unwrap();
            let z = e.phys_state(chassis).unwrap().pose.pos.z;
            assert!(z.is_finite());
            peak = peak.max(z);
        }
        let s = e.phys_state(chassis).unwrap();
        assert!(peak < 0.7, "peak z = {peak}");
        assert!((s.pose.pos.z - 0.6).abs() < 0.05, "z = {}", s.pose.pos.z);
        assert!(s.vel.lin.z.abs() < 0.05, "vz = {}", s.vel.lin.z);
        assert!(e.wheels(v).unwrap().iter().all(|w| w.contact.in_contact));
    }
}
