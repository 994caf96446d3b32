use rlsim_core::types::{PhysState, Vec3};
use rlsim_core::ShapeHandle;
use rlsim_geom::Material;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BodyKind { Dynamic, Static }

/// Input descriptor when creating a body. The body starts outside the world.
#[derive(Copy, Clone, Debug)]
pub struct BodyDesc {
    pub shape: ShapeHandle,
    pub kind: BodyKind,
    pub mass: f32,
    /// Principal local inertia; ignored for static bodies.
    pub inertia: Vec3,
    pub state: PhysState,
    pub material: Material,
    pub can_sleep: bool,
}

impl BodyDesc {
    pub fn fixed(shape: ShapeHandle, material: Material) -> Self {
        Self {
            shape,
            kind: BodyKind::Static,
            mass: 0.0,
            inertia: Vec3::ZERO,
            state: PhysState::default(),
            material,
            can_sleep: true,
        }
    }

    pub fn dynamic(shape: ShapeHandle, mass: f32, inertia: Vec3, state: PhysState, material: Material) -> Self {
        Self { shape, kind: BodyKind::Dynamic, mass, inertia, state, material, can_sleep: true }
    }

    #[inline] pub fn never_sleep(mut self) -> Self { self.can_sleep = false; self }
}

/// Chassis-local axis indices (0 = x, 1 = y, 2 = z) for the raycast vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VehicleAxes { pub right: usize, pub up: usize, pub forward: usize }

impl VehicleAxes {
    /// x forward, z up, right along -y.
    pub const Z_UP_X_FORWARD: Self = Self { right: 1, up: 2, forward: 0 };
}

/// Static wheel geometry passed when a wheel is attached.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelDesc {
    pub connection_point: Vec3,
    pub direction: Vec3,
    pub axle: Vec3,
    pub suspension_rest_length: f32,
    pub radius: f32,
    pub is_front: bool,
}

/// Result of the last suspension raycast.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelContact {
    pub in_contact: bool,
    pub suspension_length: f32,
    pub contact_point: Vec3,
}

/// One wheel of a raycast vehicle: geometry, tuning, per-tick inputs and
/// the contact written back after each step.
///
/// Spring and damper values are absolute (force per unit of compression,
/// force per unit of suspension speed), independent of the chassis mass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelInfo {
    pub desc: WheelDesc,

    pub suspension_stiffness: f32,
    pub damping_compression: f32,
    pub damping_relaxation: f32,
    pub max_suspension_travel: f32,
    pub max_suspension_force: f32,
    pub friction_slip: f32,

    pub engine_force: f32,
    pub brake: f32,
    pub steering: f32,

    pub contact: WheelContact,
}

impl WheelInfo {
    /// Defaults sized for a unit-mass chassis.
    pub fn new(desc: WheelDesc) -> Self {
        Self {
            desc,
            suspension_stiffness: 5.88,
            damping_compression: 0.83,
            damping_relaxation: 0.88,
            max_suspension_travel: 5.0,
            max_suspension_force: 6000.0,
            friction_slip: 10.5,
            engine_force: 0.0,
            brake: 0.0,
            steering: 0.0,
            contact: WheelContact { suspension_length: desc.suspension_rest_length, ..WheelContact::default() },
        }
    }
}
