use rlsim_core::types::Vec3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aabb { pub min: Vec3, pub max: Vec3 }

impl Aabb {
    /// Unbounded box, used for planes.
    #[inline] pub fn everything() -> Self {
        Self { min: Vec3::splat(f32::NEG_INFINITY), max: Vec3::splat(f32::INFINITY) }
    }
    #[inline] pub fn from_center_half_extents(c: Vec3, he: Vec3) -> Self {
        Self { min: c - he, max: c + he }
    }
    #[inline] pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb { min: self.min.min(other.min), max: self.max.max(other.max) }
    }
    #[inline] pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }
    #[inline] pub fn half_extents(&self) -> Vec3 { (self.max - self.min) * 0.5 }
    #[inline] pub fn is_finite(&self) -> bool { self.min.is_finite() && self.max.is_finite() }
}
