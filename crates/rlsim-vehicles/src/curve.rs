//! Piecewise-linear curves used for speed-dependent tuning.

/// Piecewise-linear lookup over sorted `(x, y)` points, clamped at both ends.
#[derive(Copy, Clone, Debug)]
pub struct LinearPieceCurve<const N: usize> {
    /// Control points sorted by `x`.
    pub points: [(f32, f32); N],
}

impl<const N: usize> LinearPieceCurve<N> {
    /// Wrap a fixed point table.
    pub const fn new(points: [(f32, f32); N]) -> Self { Self { points } }

    /// Interpolated value at `x`.
    pub fn get(&self, x: f32) -> f32 {
        let Some(&(first_x, first_y)) = self.points.first() else { return 0.0 };
        if x <= first_x { return first_y; }
        for w in self.points.windows(2) {
            let (x0, y0) = w[0];
            let (x1, y1) = w[1];
            if x < x1 {
                let t = (x - x0) / (x1 - x0);
                return y0 + (y1 - y0) * t;
            }
        }
        self.points[N - 1].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interpolates_and_clamps() {
        let c = LinearPieceCurve::new([(0.0, 1.0), (10.0, 0.0)]);
        assert_relative_eq!(c.get(-5.0), 1.0);
        assert_relative_eq!(c.get(5.0), 0.5);
        assert_relative_eq!(c.get(50.0), 0.0);
    }
}
