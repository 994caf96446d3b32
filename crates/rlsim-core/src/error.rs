use thiserror::Error;

use crate::ids::{BodyHandle, CarId, ShapeHandle, VehicleHandle};

/// Faults raised by a physics engine adapter.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("unknown shape handle: {0}")]
    UnknownShape(ShapeHandle),

    #[error("unknown body handle: {0}")]
    UnknownBody(BodyHandle),

    #[error("unknown vehicle handle: {0}")]
    UnknownVehicle(VehicleHandle),

    #[error("{0} is already in the world")]
    BodyAlreadyInWorld(BodyHandle),

    #[error("{0} is not in the world")]
    BodyNotInWorld(BodyHandle),

    #[error("the physics world has been destroyed")]
    WorldDestroyed,

    #[error("wheel index {index} out of range for {vehicle} ({count} wheels)")]
    WheelOutOfRange { vehicle: VehicleHandle, index: usize, count: usize },

    #[error("compound child must be a convex primitive")]
    NonConvexCompoundChild,
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by arena-level operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("no car with id {0}")]
    UnknownCar(CarId),
}

pub type SimResult<T> = Result<T, SimError>;
