use rand::Rng;
use rand_distr::StandardNormal;

/// Variance of the zero-mean Gaussian used to initialise neuron weights.
pub const WEIGHT_INIT_VARIANCE: f64 = 0.1;

/// Dot product of two equal-length slices.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Returns `v * s` element-wise.
pub fn scaled(v: &[f64], s: f64) -> Vec<f64> {
    v.iter().map(|x| x * s).collect()
}

/// Adds `rhs` into `acc` element-wise.
pub fn add_assign(acc: &mut [f64], rhs: &[f64]) {
    debug_assert_eq!(acc.len(), rhs.len());
    for (a, r) in acc.iter_mut().zip(rhs.iter()) {
        *a += r;
    }
}

/// Samples `len` values from N(0, variance).
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, len: usize, variance: f64) -> Vec<f64> {
    let std_dev = variance.sqrt();
    (0..len)
        .map(|_| rng.sample::<f64, _>(StandardNormal) * std_dev)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dot() {
        assert_abs_diff_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, -5.0, 0.5]), -4.5, epsilon = 1e-12);
        assert_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn test_add_assign_and_scaled() {
        let mut acc = vec![1.0, 1.0];
        add_assign(&mut acc, &scaled(&[2.0, -4.0], 0.5));
        assert_eq!(acc, vec![2.0, -1.0]);
    }

    #[test]
    fn test_gaussian_is_seeded_and_centred() {
        let a = gaussian(&mut StdRng::seed_from_u64(7), 4000, WEIGHT_INIT_VARIANCE);
        let b = gaussian(&mut StdRng::seed_from_u64(7), 4000, WEIGHT_INIT_VARIANCE);
        assert_eq!(a, b);

        let mean = a.iter().sum::<f64>() / a.len() as f64;
        let var = a.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / a.len() as f64;
        assert!(mean.abs() < 0.05, "mean = {mean}");
        assert!((var - WEIGHT_INIT_VARIANCE).abs() < 0.02, "var = {var}");
    }
}
