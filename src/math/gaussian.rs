//! Discrete Gaussian sampling
//!
//! Provides a truncated discrete Gaussian over Z, used both for ordinary
//! encryption noise and for the wide smudging noise of collective key
//! switching.

use super::modular::ModQ;
use super::poly::Poly;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default Gaussian standard deviation
pub const DEFAULT_SIGMA: f64 = 3.2;

/// Truncation multiplier: samples are confined to ±trunc(6σ)
pub const TAILCUT: f64 = 6.0;

/// Discrete Gaussian sampler over Z using rejection sampling.
///
/// The sampler holds only the distribution; randomness comes from the RNG
/// passed to each call, so one sampler can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianSampler {
    /// Standard deviation σ
    sigma: f64,
    /// Samples are rejected outside [-bound, bound]
    bound: i64,
}

impl GaussianSampler {
    /// Create a sampler truncated at ±trunc(6σ).
    pub fn new(sigma: f64) -> Self {
        Self::with_bound(sigma, (TAILCUT * sigma) as i64)
    }

    /// Create a sampler with an explicit truncation bound.
    ///
    /// # Panics
    ///
    /// Panics if `sigma` is negative or not finite, or if `bound` is negative.
    pub fn with_bound(sigma: f64, bound: i64) -> Self {
        assert!(
            sigma.is_finite() && sigma >= 0.0,
            "sigma must be finite and non-negative"
        );
        assert!(bound >= 0, "bound must be non-negative");
        Self { sigma, bound }
    }

    /// Get the standard deviation
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the truncation bound
    pub fn bound(&self) -> i64 {
        self.bound
    }

    /// Sample a single value from the truncated discrete Gaussian D_σ
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        // σ = 0 or a zero-width window collapse to a point mass
        if self.sigma == 0.0 || self.bound == 0 {
            return 0;
        }

        let sigma_sq_2 = 2.0 * self.sigma * self.sigma;
        loop {
            let x = rng.gen_range(-self.bound..=self.bound);

            // Accept with probability exp(-x²/(2σ²))
            let xf = x as f64;
            let prob = (-(xf * xf) / sigma_sq_2).exp();

            let u: f64 = rng.gen();
            if u < prob {
                return x;
            }
        }
    }

    /// Overwrite `out` with fresh coefficient-domain noise
    pub fn sample_poly<R: Rng + ?Sized>(&self, out: &mut Poly, rng: &mut R) {
        let q = out.modulus();
        for c in out.coeffs_mut() {
            *c = ModQ::from_signed(self.sample(rng), q);
        }
        out.set_ntt_domain(false);
    }
}

impl Default for GaussianSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SIGMA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::DEFAULT_Q;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn sample_vec(sampler: &GaussianSampler, len: usize, rng: &mut ChaCha20Rng) -> Vec<i64> {
        (0..len).map(|_| sampler.sample(rng)).collect()
    }

    #[test]
    fn test_tailcut_bounds() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let sampler = GaussianSampler::new(DEFAULT_SIGMA);
        assert_eq!(sampler.bound(), 19);

        for _ in 0..100_000 {
            let s = sampler.sample(&mut rng);
            assert!(s.abs() <= 19, "Sample {} exceeds 6σ bound", s);
        }
    }

    #[test]
    fn test_bound_truncates_toward_zero() {
        assert_eq!(GaussianSampler::new(1.9).bound(), 11);
        assert_eq!(GaussianSampler::new(1024.0).bound(), 6144);
    }

    #[test]
    fn test_deterministic_seeding() {
        let sampler = GaussianSampler::new(DEFAULT_SIGMA);
        let mut rng1 = ChaCha20Rng::seed_from_u64(12345);
        let mut rng2 = ChaCha20Rng::seed_from_u64(12345);

        assert_eq!(
            sample_vec(&sampler, 100, &mut rng1),
            sample_vec(&sampler, 100, &mut rng2)
        );
    }

    #[test]
    fn test_distribution_moments() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let sampler = GaussianSampler::new(DEFAULT_SIGMA);
        let n = 100_000;

        let samples = sample_vec(&sampler, n, &mut rng);
        let mean: f64 = samples.iter().map(|&x| x as f64).sum::<f64>() / n as f64;
        let variance: f64 = samples
            .iter()
            .map(|&x| (x as f64 - mean).powi(2))
            .sum::<f64>()
            / n as f64;

        assert!(mean.abs() < 0.1, "Mean {} is too far from 0", mean);
        let expected = DEFAULT_SIGMA * DEFAULT_SIGMA;
        let relative_error = (variance - expected).abs() / expected;
        assert!(
            relative_error < 0.1,
            "Variance {} differs from expected {}",
            variance,
            expected
        );
    }

    #[test]
    fn test_wide_sampler_does_not_overflow() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let sigma = (1u64 << 40) as f64;
        let sampler = GaussianSampler::new(sigma);

        for _ in 0..1000 {
            assert!(sampler.sample(&mut rng).abs() <= sampler.bound());
        }
    }

    #[test]
    fn test_zero_sigma_is_point_mass() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        let sampler = GaussianSampler::new(0.0);

        assert_eq!(sampler.bound(), 0);
        assert!(sample_vec(&sampler, 64, &mut rng).iter().all(|&x| x == 0));
    }

    #[test]
    fn test_sample_poly_is_centered_in_zq() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let sampler = GaussianSampler::new(DEFAULT_SIGMA);
        let mut p = Poly::zero(256, DEFAULT_Q);

        sampler.sample_poly(&mut p, &mut rng);
        assert!(!p.is_ntt());
        assert!(p.linf_norm() <= 19);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_sigma_panics() {
        GaussianSampler::new(-1.0);
    }
}
