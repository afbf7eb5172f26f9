//! Schoolbook reference ring.
//!
//! [`NaiveRing`] implements [`RingEngine`] with the identity as its
//! "evaluation domain" and O(d²) negacyclic convolution as `mul_eval`. It is
//! slow, but it has no twiddle tables or Montgomery constants to get wrong,
//! so anything built on [`RingEngine`] can be checked against it.

use super::modular::ModQ;
use super::poly::Poly;
use super::ring::RingEngine;

/// Reference engine for R_q = Z_q[X]/(X^d + 1) without any transform.
#[derive(Debug, Clone)]
pub struct NaiveRing {
    n: usize,
    q: u64,
}

impl NaiveRing {
    /// Creates a reference ring.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a power of two or `q < 2`.
    pub fn new(n: usize, q: u64) -> Self {
        assert!(n.is_power_of_two(), "n must be a power of two");
        assert!(q >= 2, "q must be at least 2");
        Self { n, q }
    }

    fn negacyclic(&self, a: &[u64], b: &[u64]) -> Vec<u64> {
        let n = self.n;
        let q = self.q;
        let mut out = vec![0u64; n];

        for (i, &x) in a.iter().enumerate() {
            if x == 0 {
                continue;
            }
            for (j, &y) in b.iter().enumerate() {
                let prod = ModQ::mul(x, y, q);
                let k = i + j;
                if k < n {
                    out[k] = ModQ::add(out[k], prod, q);
                } else {
                    // X^n = -1
                    out[k - n] = ModQ::sub(out[k - n], prod, q);
                }
            }
        }
        out
    }
}

impl RingEngine for NaiveRing {
    fn dimension(&self) -> usize {
        self.n
    }

    fn modulus(&self) -> u64 {
        self.q
    }

    fn to_eval_inplace(&self, p: &mut Poly) {
        self.check(p);
        assert!(!p.is_ntt(), "Polynomial is already in NTT domain");
        p.set_ntt_domain(true);
    }

    fn to_coeff_inplace(&self, p: &mut Poly) {
        self.check(p);
        assert!(p.is_ntt(), "Polynomial is not in NTT domain");
        p.set_ntt_domain(false);
    }

    fn mul_eval(&self, a: &Poly, b: &Poly, out: &mut Poly) {
        self.check(a);
        self.check(b);
        self.check(out);
        assert!(
            a.is_ntt() && b.is_ntt(),
            "Both polynomials must be in NTT domain"
        );
        let prod = self.negacyclic(a.coeffs(), b.coeffs());
        out.coeffs_mut().copy_from_slice(&prod);
        out.set_ntt_domain(true);
    }

    fn mul_eval_add(&self, a: &Poly, b: &Poly, acc: &mut Poly) {
        self.check(a);
        self.check(b);
        self.check(acc);
        assert!(
            a.is_ntt() && b.is_ntt() && acc.is_ntt(),
            "All polynomials must be in NTT domain"
        );
        let prod = self.negacyclic(a.coeffs(), b.coeffs());
        let q = self.q;
        for (c, p) in acc.coeffs_mut().iter_mut().zip(prod) {
            *c = ModQ::add(*c, p, q);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ring::mul;
    use crate::math::{NttContext, DEFAULT_Q};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_negacyclic_wraparound() {
        let n = 8;
        let ring = NaiveRing::new(n, DEFAULT_Q);

        let mut a = Poly::zero(n, DEFAULT_Q);
        a.coeffs_mut()[1] = 1;
        let mut b = Poly::zero(n, DEFAULT_Q);
        b.coeffs_mut()[n - 1] = 1;

        let result = mul(&ring, &a, &b);
        assert_eq!(result.coeff(0), DEFAULT_Q - 1);
        assert!(result.coeffs()[1..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_agrees_with_ntt() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for n in [2, 32, 128] {
            let naive = NaiveRing::new(n, DEFAULT_Q);
            let ntt = NttContext::with_default_q(n);

            let a = Poly::random(n, DEFAULT_Q, &mut rng);
            let b = Poly::random(n, DEFAULT_Q, &mut rng);

            assert_eq!(mul(&naive, &a, &b), mul(&ntt, &a, &b), "n = {}", n);
        }
    }

    #[test]
    fn test_mul_eval_add_accumulates() {
        let n = 4;
        let ring = NaiveRing::new(n, DEFAULT_Q);

        let mut a = Poly::from_coeffs(vec![1, 1, 0, 0], DEFAULT_Q);
        ring.to_eval_inplace(&mut a);
        let mut acc = ring.new_poly();
        ring.to_eval_inplace(&mut acc);

        ring.mul_eval_add(&a, &a, &mut acc);
        ring.mul_eval_add(&a, &a, &mut acc);
        ring.to_coeff_inplace(&mut acc);

        assert_eq!(acc.coeffs(), &[2, 4, 2, 0]);
    }
}
