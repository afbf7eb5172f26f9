//! Ternary sampling for keys and ephemeral masks

use super::modular::ModQ;
use super::poly::Poly;
use super::ring::RingEngine;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ternary distribution over {-1, 0, 1}.
///
/// Each coefficient is nonzero with probability `density`, and a nonzero
/// coefficient is ±1 with equal probability. The density is a per-call
/// argument, matching how the distribution is used for both keys and masks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TernarySampler;

impl TernarySampler {
    /// Create a ternary sampler
    pub fn new() -> Self {
        Self
    }

    /// Sample a single value in {-1, 0, 1}
    pub fn sample<R: Rng + ?Sized>(&self, density: f64, rng: &mut R) -> i64 {
        debug_assert!((0.0..=1.0).contains(&density), "density must be in [0, 1]");
        if rng.gen::<f64>() < density {
            if rng.gen::<bool>() {
                1
            } else {
                -1
            }
        } else {
            0
        }
    }

    /// Overwrite `out` with fresh ternary coefficients (coefficient domain)
    pub fn sample_poly<R: Rng + ?Sized>(&self, density: f64, out: &mut Poly, rng: &mut R) {
        let q = out.modulus();
        for c in out.coeffs_mut() {
            *c = ModQ::from_signed(self.sample(density, rng), q);
        }
        out.set_ntt_domain(false);
    }

    /// Overwrite `out` with fresh ternary values, delivered in `ring`'s evaluation domain
    pub fn sample_poly_eval<E, R>(&self, ring: &E, density: f64, out: &mut Poly, rng: &mut R)
    where
        E: RingEngine + ?Sized,
        R: Rng + ?Sized,
    {
        ring.check(out);
        self.sample_poly(density, out, rng);
        ring.to_eval_inplace(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{NttContext, DEFAULT_Q};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_values_are_ternary() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let sampler = TernarySampler::new();
        let mut p = Poly::zero(1024, DEFAULT_Q);

        sampler.sample_poly(0.5, &mut p, &mut rng);
        assert!(p.to_signed().iter().all(|&c| (-1..=1).contains(&c)));
    }

    #[test]
    fn test_density() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let sampler = TernarySampler::new();
        let n = 100_000;

        let values: Vec<i64> = (0..n).map(|_| sampler.sample(0.5, &mut rng)).collect();
        let nonzero = values.iter().filter(|&&v| v != 0).count() as f64 / n as f64;
        let positive = values.iter().filter(|&&v| v == 1).count() as f64;
        let negative = values.iter().filter(|&&v| v == -1).count() as f64;

        assert!((nonzero - 0.5).abs() < 0.01, "density {}", nonzero);
        assert!((positive / negative - 1.0).abs() < 0.05);
    }

    #[test]
    fn test_zero_density_gives_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut p = Poly::zero(64, DEFAULT_Q);
        TernarySampler::new().sample_poly(0.0, &mut p, &mut rng);
        assert!(p.is_zero());
    }

    #[test]
    fn test_eval_output_matches_coefficient_sample() {
        let ring = NttContext::with_default_q(64);
        let sampler = TernarySampler::new();

        let mut coeff = ring.new_poly();
        sampler.sample_poly(0.5, &mut coeff, &mut ChaCha20Rng::seed_from_u64(4));

        let mut eval = ring.new_poly();
        sampler.sample_poly_eval(&ring, 0.5, &mut eval, &mut ChaCha20Rng::seed_from_u64(4));
        assert!(eval.is_ntt());

        ring.to_coeff_inplace(&mut eval);
        assert_eq!(eval, coeff);
    }
}
