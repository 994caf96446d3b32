use crate::consts::{TICK_RATE, TICK_TIME};
use crate::StepHasher;

/// The fixed-step contract every arena runs under.
#[derive(Copy, Clone, Debug)]
pub struct DeterminismContract {
    pub tick_rate: u32,
    pub fixed_dt: f32,
    pub float: &'static str,
    pub fma: bool,
    pub stable_iteration: bool,
}

impl DeterminismContract {
    pub fn default_contract() -> Self {
        Self {
            tick_rate: TICK_RATE,
            fixed_dt: TICK_TIME,
            float: "f32",
            fma: false,
            stable_iteration: true,
        }
    }

    /// Digest mixed into every state hash so runs under different contracts never compare equal.
    pub fn digest(&self) -> [u8; 32] {
        let mut h = StepHasher::new();
        h.update_bytes(&self.tick_rate.to_le_bytes());
        h.update_bytes(&self.fixed_dt.to_le_bytes());
        h.update_bytes(self.float.as_bytes());
        h.update_bytes(&[self.fma as u8, self.stable_iteration as u8]);
        h.finalize()
    }
}

impl Default for DeterminismContract {
    fn default() -> Self { Self::default_contract() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_tracks_the_tick_rate() {
        let a = DeterminismContract::default();
        let b = DeterminismContract { tick_rate: 60, fixed_dt: 1.0 / 60.0, ..a };
        assert_eq!(a.digest(), DeterminismContract::default_contract().digest());
        assert_ne!(a.digest(), b.digest());
    }
}
