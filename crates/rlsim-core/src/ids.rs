use core::fmt;
use serde::{Deserialize, Serialize};

/// Arena-scoped car identifier. Assigned from 1 upwards, never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct CarId(pub u32);
impl fmt::Display for CarId { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "CarId({})", self.0) } }

/// Engine-owned collision shape.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShapeHandle(pub u32);
impl fmt::Display for ShapeHandle { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "ShapeHandle({})", self.0) } }

/// Engine-owned rigid body.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct BodyHandle(pub u32);
impl fmt::Display for BodyHandle { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "BodyHandle({})", self.0) } }

/// Engine-owned raycast vehicle helper.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct VehicleHandle(pub u32);
impl fmt::Display for VehicleHandle { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "VehicleHandle({})", self.0) } }
