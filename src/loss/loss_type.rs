use serde::{Serialize, Deserialize};

/// Transition point between the quadratic and linear parts of `Huber`.
const HUBER_DELTA: f64 = 1.0;

/// Selects the discrepancy measure a `LossBlock` computes.
///
/// - `L2`   : sum of squared differences; gradient `2·(input − expected)`.
/// - `Mse`  : mean of squared differences.
/// - `Mae`  : mean absolute difference; sub-gradient 0 where input equals expected.
/// - `Huber`: mean Huber loss with δ = 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    L2,
    Mse,
    Mae,
    Huber,
}

impl LossType {
    /// Scalar loss for one example. Slices must have equal length.
    pub fn value(&self, input: &[f64], expected: &[f64]) -> f64 {
        let sum: f64 = input.iter().zip(expected.iter())
            .map(|(x, y)| self.element(x - y))
            .sum();
        sum / self.normaliser(input.len())
    }

    /// Gradient of `value` with respect to `input`.
    pub fn gradient(&self, input: &[f64], expected: &[f64]) -> Vec<f64> {
        let n = self.normaliser(input.len());
        input.iter().zip(expected.iter())
            .map(|(x, y)| self.element_derivative(x - y) / n)
            .collect()
    }

    fn normaliser(&self, len: usize) -> f64 {
        match self {
            LossType::L2 => 1.0,
            LossType::Mse | LossType::Mae | LossType::Huber => len.max(1) as f64,
        }
    }

    fn element(&self, d: f64) -> f64 {
        match self {
            LossType::L2 | LossType::Mse => d * d,
            LossType::Mae => d.abs(),
            LossType::Huber => {
                if d.abs() <= HUBER_DELTA {
                    0.5 * d * d
                } else {
                    HUBER_DELTA * (d.abs() - 0.5 * HUBER_DELTA)
                }
            }
        }
    }

    fn element_derivative(&self, d: f64) -> f64 {
        match self {
            LossType::L2 | LossType::Mse => 2.0 * d,
            LossType::Mae => {
                if d > 0.0 { 1.0 } else if d < 0.0 { -1.0 } else { 0.0 }
            }
            LossType::Huber => {
                if d.abs() <= HUBER_DELTA { d } else { HUBER_DELTA * d.signum() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_l2_values() {
        assert_eq!(LossType::L2.value(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_eq!(LossType::L2.value(&[3.0, 1.0], &[1.0, 1.0]), 4.0);
        assert_eq!(LossType::L2.gradient(&[3.0, 1.0], &[1.0, 1.0]), vec![4.0, 0.0]);
    }

    #[test]
    fn test_mse_is_mean_of_l2() {
        let x = [0.5, -1.0, 2.0];
        let y = [0.0, 1.0, 1.0];
        assert_abs_diff_eq!(LossType::Mse.value(&x, &y), LossType::L2.value(&x, &y) / 3.0, epsilon = 1e-12);
        let g = LossType::Mse.gradient(&x, &y);
        assert_abs_diff_eq!(g[1], 2.0 * -2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mae_subgradient_at_equality() {
        assert_eq!(LossType::Mae.gradient(&[1.0, 2.0], &[1.0, 0.0]), vec![0.0, 0.5]);
        assert_abs_diff_eq!(LossType::Mae.value(&[1.0, 2.0], &[1.0, 0.0]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_huber_switches_to_linear() {
        assert_abs_diff_eq!(LossType::Huber.value(&[0.5], &[0.0]), 0.125, epsilon = 1e-12);
        assert_abs_diff_eq!(LossType::Huber.value(&[3.0], &[0.0]), 2.5, epsilon = 1e-12);
        assert_eq!(LossType::Huber.gradient(&[-3.0], &[0.0]), vec![-1.0]);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&LossType::L2).unwrap(), "\"l2\"");
        let parsed: LossType = serde_json::from_str("\"huber\"").unwrap();
        assert_eq!(parsed, LossType::Huber);
    }
}
