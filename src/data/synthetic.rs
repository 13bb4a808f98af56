use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::data::dataset::{Dataset, Example};
use crate::error::Result;

/// The regression target used by the demo: `y = x0·x1 + 2·x0 + 1`.
pub fn product_plus_linear_target(x0: f64, x1: f64) -> f64 {
    x0 * x1 + 2.0 * x0 + 1.0
}

/// `n` samples with `x0, x1` drawn uniformly from [0, 1) and one target column.
pub fn product_plus_linear(n: usize, seed: u64) -> Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(seed);
    let examples = (0..n)
        .map(|_| {
            let x0: f64 = rng.gen();
            let x1: f64 = rng.gen();
            Example::new(vec![x0, x1], vec![product_plus_linear_target(x0, x1)])
        })
        .collect();
    Dataset::new(examples)
}

/// The four XOR samples with a single 0/1 target.
pub fn xor() -> Dataset {
    let examples = vec![
        Example::new(vec![0.0, 0.0], vec![0.0]),
        Example::new(vec![0.0, 1.0], vec![1.0]),
        Example::new(vec![1.0, 0.0], vec![1.0]),
        Example::new(vec![1.0, 1.0], vec![0.0]),
    ];
    Dataset { examples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_product_plus_linear_targets() {
        let ds = product_plus_linear(50, 42).unwrap();
        assert_eq!(ds.len(), 50);
        for ex in &ds {
            assert!(ex.input.iter().all(|x| (0.0..1.0).contains(x)));
            let y = ex.input[0] * ex.input[1] + 2.0 * ex.input[0] + 1.0;
            assert_abs_diff_eq!(ex.expected[0], y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_product_plus_linear_is_seeded() {
        let a = product_plus_linear(5, 9).unwrap();
        let b = product_plus_linear(5, 9).unwrap();
        assert_eq!(a.examples(), b.examples());
    }

    #[test]
    fn test_zero_samples_is_an_error() {
        assert!(product_plus_linear(0, 1).is_err());
    }

    #[test]
    fn test_xor_shape() {
        let ds = xor();
        assert_eq!((ds.len(), ds.input_dim(), ds.output_dim()), (4, 2, 1));
    }
}
