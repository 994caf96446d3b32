//! A [`PhysicsEngine`] that records every mutating call and simulates nothing.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use rlsim_core::types::{PhysState, Vec3};
use rlsim_core::{BodyHandle, EngineError, EngineResult, ShapeHandle, VehicleHandle};
use rlsim_engine::{BodyDesc, PhysicsEngine, VehicleAxes, WheelDesc, WheelInfo};
use rlsim_geom::mass::local_inertia;
use rlsim_geom::Shape;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Call {
    SetGravity,
    CreateShape(ShapeHandle),
    DestroyShape(ShapeHandle),
    CreateBody(BodyHandle),
    DestroyBody(BodyHandle),
    AddBody(BodyHandle),
    RemoveBody(BodyHandle),
    Step,
    DestroyWorld,
    CreateVehicle(VehicleHandle),
    AddWheel(VehicleHandle),
    DestroyVehicle(VehicleHandle),
}

/// Shared so it can be inspected after the arena (and its engine) is dropped.
pub type Ledger = Rc<RefCell<Vec<Call>>>;

/// Which call should fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fault {
    /// The n-th `add_wheel` (0-based, counted across all vehicles).
    AddWheel(usize),
    /// Every `create_vehicle`.
    CreateVehicle,
    /// Every sphere `create_shape`.
    SphereShape,
}

struct BodySlot {
    state: PhysState,
    in_world: bool,
}

pub struct RecordingEngine {
    pub ledger: Ledger,
    fault: Option<Fault>,
    wheels_added: usize,
    world_alive: bool,
    next_shape: u32,
    next_body: u32,
    next_vehicle: u32,
    shapes: BTreeMap<u32, Shape>,
    bodies: BTreeMap<u32, BodySlot>,
    vehicles: BTreeMap<u32, Vec<WheelInfo>>,
}

impl RecordingEngine {
    pub fn new() -> (Self, Ledger) {
        let ledger = Ledger::default();
        let engine = Self {
            ledger: ledger.clone(),
            fault: None,
            wheels_added: 0,
            world_alive: true,
            next_shape: 0,
            next_body: 0,
            next_vehicle: 0,
            shapes: BTreeMap::new(),
            bodies: BTreeMap::new(),
            vehicles: BTreeMap::new(),
        };
        (engine, ledger)
    }

    pub fn failing(fault: Fault) -> (Self, Ledger) {
        let (mut e, l) = Self::new();
        e.fault = Some(fault);
        (e, l)
    }

    fn log(&self, c: Call) { self.ledger.borrow_mut().push(c); }

    fn slot(&self, b: BodyHandle) -> EngineResult<&BodySlot> {
        self.bodies.get(&b.0).ok_or(EngineError::UnknownBody(b))
    }

    fn slot_mut(&mut self, b: BodyHandle) -> EngineResult<&mut BodySlot> {
        self.bodies.get_mut(&b.0).ok_or(EngineError::UnknownBody(b))
    }
}

impl PhysicsEngine for RecordingEngine {
    fn set_gravity(&mut self, _gravity: Vec3) { self.log(Call::SetGravity); }

    fn create_shape(&mut self, shape: Shape) -> EngineResult<ShapeHandle> {
        if self.fault == Some(Fault::SphereShape) && matches!(shape, Shape::Sphere { .. }) {
            return Err(EngineError::NonConvexCompoundChild);
        }
        let h = ShapeHandle(self.next_shape);
        self.next_shape += 1;
        self.shapes.insert(h.0, shape);
        self.log(Call::CreateShape(h));
        Ok(h)
    }

    fn destroy_shape(&mut self, shape: ShapeHandle) -> EngineResult<()> {
        self.shapes.remove(&shape.0).ok_or(EngineError::UnknownShape(shape))?;
        self.log(Call::DestroyShape(shape));
        Ok(())
    }

    fn local_inertia(&self, shape: ShapeHandle, mass: f32) -> EngineResult<Vec3> {
        let s = self.shapes.get(&shape.0).ok_or(EngineError::UnknownShape(shape))?;
        Ok(local_inertia(s, mass))
    }

    fn create_body(&mut self, desc: BodyDesc) -> EngineResult<BodyHandle> {
        if !self.shapes.contains_key(&desc.shape.0) {
            return Err(EngineError::UnknownShape(desc.shape));
        }
        let h = BodyHandle(self.next_body);
        self.next_body += 1;
        self.bodies.insert(h.0, BodySlot { state: desc.state, in_world: false });
        self.log(Call::CreateBody(h));
        Ok(h)
    }

    fn destroy_body(&mut self, body: BodyHandle) -> EngineResult<()> {
        if self.slot(body)?.in_world {
            return Err(EngineError::BodyAlreadyInWorld(body));
        }
        self.bodies.remove(&body.0);
        self.log(Call::DestroyBody(body));
        Ok(())
    }

    fn add_body(&mut self, body: BodyHandle) -> EngineResult<()> {
        if !self.world_alive {
            return Err(EngineError::WorldDestroyed);
        }
        let slot = self.slot_mut(body)?;
        if slot.in_world {
            return Err(EngineError::BodyAlreadyInWorld(body));
        }
        slot.in_world = true;
        self.log(Call::AddBody(body));
        Ok(())
    }

    fn remove_body(&mut self, body: BodyHandle) -> EngineResult<()> {
        let slot = self.slot_mut(body)?;
        if !slot.in_world {
            return Err(EngineError::BodyNotInWorld(body));
        }
        slot.in_world = false;
        self.log(Call::RemoveBody(body));
        Ok(())
    }

    fn is_in_world(&self, body: BodyHandle) -> bool {
        self.bodies.get(&body.0).map(|s| s.in_world).unwrap_or(false)
    }

    fn step(&mut self, _dt: f32) -> EngineResult<()> {
        if !self.world_alive {
            return Err(EngineError::WorldDestroyed);
        }
        self.log(Call::Step);
        Ok(())
    }

    fn destroy_world(&mut self) {
        self.world_alive = false;
        for slot in self.bodies.values_mut() {
            slot.in_world = false;
        }
        self.log(Call::DestroyWorld);
    }

    fn create_vehicle(&mut self, chassis: BodyHandle, _axes: VehicleAxes) -> EngineResult<VehicleHandle> {
        if !self.slot(chassis)?.in_world {
            return Err(EngineError::BodyNotInWorld(chassis));
        }
        if self.fault == Some(Fault::CreateVehicle) {
            return Err(EngineError::WorldDestroyed);
        }
        let h = VehicleHandle(self.next_vehicle);
        self.next_vehicle += 1;
        self.vehicles.insert(h.0, Vec::new());
        self.log(Call::CreateVehicle(h));
        Ok(h)
    }

    fn add_wheel(&mut self, vehicle: VehicleHandle, desc: WheelDesc) -> EngineResult<usize> {
        let n = self.wheels_added;
        self.wheels_added += 1;
        if self.fault == Some(Fault::AddWheel(n)) {
            return Err(EngineError::UnknownVehicle(vehicle));
        }
        let wheels = self.vehicles.get_mut(&vehicle.0).ok_or(EngineError::UnknownVehicle(vehicle))?;
        wheels.push(WheelInfo::new(desc));
        let index = wheels.len() - 1;
        self.log(Call::AddWheel(vehicle));
        Ok(index)
    }

    fn wheels(&self, vehicle: VehicleHandle) -> EngineResult<&[WheelInfo]> {
        self.vehicles.get(&vehicle.0).map(Vec::as_slice).ok_or(EngineError::UnknownVehicle(vehicle))
    }

    fn wheels_mut(&mut self, vehicle: VehicleHandle) -> EngineResult<&mut [WheelInfo]> {
        self.vehicles.get_mut(&vehicle.0).map(Vec::as_mut_slice).ok_or(EngineError::UnknownVehicle(vehicle))
    }

    fn destroy_vehicle(&mut self, vehicle: VehicleHandle) -> EngineResult<()> {
        self.vehicles.remove(&vehicle.0).ok_or(EngineError::UnknownVehicle(vehicle))?;
        self.log(Call::DestroyVehicle(vehicle));
        Ok(())
    }

    fn phys_state(&self, body: BodyHandle) -> EngineResult<PhysState> {
        Ok(self.slot(body)?.state)
    }

    fn set_phys_state(&mut self, body: BodyHandle, state: &PhysState) -> EngineResult<()> {
        self.slot_mut(body)?.state = *state;
        Ok(())
    }

    fn apply_central_impulse(&mut self, body: BodyHandle, _impulse: Vec3) -> EngineResult<()> {
        if !self.slot(body)?.in_world {
            return Err(EngineError::BodyNotInWorld(body));
        }
        Ok(())
    }
}
