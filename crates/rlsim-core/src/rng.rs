#[derive(Copy, Clone, Debug)]
pub struct XorShift64 { state: u64 }

impl XorShift64 {
    pub fn new(seed: u64) -> Self { Self { state: seed | 1 } }
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x >> 12; x ^= x << 25; x ^= x >> 27;
        self.state = x;
        ((x.wrapping_mul(2685821657736338717)) >> 32) as u32
    }
    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: u32) -> u32 { self.next_u32() % n }
    /// Deterministic Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
    pub fn state(&self) -> u64 { self.state }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift64::new(42);
        let mut b = XorShift64::new(42);
        for _ in 0..16 { assert_eq!(a.next_u32(), b.next_u32()); }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = XorShift64::new(7);
        let mut v = [0, 1, 2, 3, 4];
        rng.shuffle(&mut v);
        let mut sorted = v;
        sorted.sort();
        assert_eq!(sorted, [0, 1, 2, 3, 4]);
    }
}
