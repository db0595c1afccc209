//! Forward differences for uniformly stepped cubics.

use crate::basis::horner;

/// The value and first three forward differences of a cubic at the current
/// step.
///
/// Stepping costs three additions. Round-off accumulates with the number of
/// steps, which stays small at the sampling densities used for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardDifferences {
    d: [f64; 4],
}

impl ForwardDifferences {
    /// Start from the first four samples `f(0), f(δ), f(2δ), f(3δ)`.
    pub fn from_samples(f: [f64; 4]) -> Self {
        Self {
            d: [
                f[0],
                f[1] - f[0],
                f[2] - 2.0 * f[1] + f[0],
                f[3] - 3.0 * f[2] + 3.0 * f[1] - f[0],
            ],
        }
    }

    /// Start from a value and its differences, as read off a difference matrix.
    pub fn from_differences(d: [f64; 4]) -> Self {
        Self { d }
    }

    /// Differences of the cubic with `coefficients` (`[a, b, c, d]`) stepped by `delta`.
    pub fn for_cubic(coefficients: &[f64; 4], delta: f64) -> Self {
        Self::from_samples([0.0, 1.0, 2.0, 3.0].map(|i| horner(coefficients, i * delta)))
    }

    /// Value at the current step.
    pub fn value(&self) -> f64 {
        self.d[0]
    }

    /// Advance by one step.
    pub fn step(&mut self) {
        self.d[0] += self.d[1];
        self.d[1] += self.d[2];
        self.d[2] += self.d[3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_steps_match_direct_evaluation() {
        let c = [1.5, -2.0, 0.25, 3.0];
        let n = 100;
        let delta = 1.0 / n as f64;
        let mut fd = ForwardDifferences::for_cubic(&c, delta);
        for i in 0..=n {
            assert_abs_diff_eq!(fd.value(), horner(&c, i as f64 * delta), epsilon = 1e-8);
            fd.step();
        }
    }

    #[test]
    fn test_quadratic_has_zero_third_difference() {
        let fd = ForwardDifferences::from_samples([0.0, 1.0, 4.0, 9.0]);
        assert_eq!(fd, ForwardDifferences::from_differences([0.0, 1.0, 2.0, 0.0]));
    }

    #[test]
    fn test_step_order() {
        // t² at t = 0, 1, 2, ...
        let mut fd = ForwardDifferences::from_differences([0.0, 1.0, 2.0, 0.0]);
        let values: Vec<f64> = (0..5)
            .map(|_| {
                let v = fd.value();
                fd.step();
                v
            })
            .collect();
        assert_eq!(values, vec![0.0, 1.0, 4.0, 9.0, 16.0]);
    }
}
