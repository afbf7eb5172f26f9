//! Number-Theoretic Transform (NTT) for fast polynomial multiplication.
//!
//! Implements Cooley-Tukey radix-2 NTT for negacyclic convolution over
//! R_q = Z_q[X]/(X^d + 1).
//!
//! # Theory
//!
//! For negacyclic convolution (multiplication modulo X^n + 1), we use a
//! primitive 2n-th root of unity ψ where ψ^n = -1. The NTT evaluates a
//! polynomial at powers of ψ, enabling pointwise multiplication in the
//! evaluation domain.
//!
//! # Montgomery form
//!
//! Evaluation-domain values are kept in Montgomery form (`a · 2^64 mod q`).
//! `forward` converts on the way in and `inverse` converts back, so a
//! pointwise Montgomery product of two forward-transformed inputs is the
//! forward transform of their ring product.
//!
//! # Example
//!
//! ```
//! use pcks::math::NttContext;
//!
//! let ctx = NttContext::with_default_q(256);
//!
//! let mut coeffs = vec![1u64; 256];
//! ctx.forward(&mut coeffs);
//! ctx.inverse(&mut coeffs);
//! assert_eq!(coeffs[0], 1);
//! ```

use super::modular::{ModQ, DEFAULT_Q, MAX_MODULUS_BITS};

/// Precomputed NTT context with twiddle factors.
///
/// Create once per (dimension, modulus) and share it read-only.
#[derive(Clone)]
pub struct NttContext {
    /// Ring dimension (power of two).
    n: usize,
    /// Prime modulus, q ≡ 1 (mod 2n).
    q: u64,
    /// -q^(-1) mod 2^64.
    q_inv_neg: u64,
    /// R^2 mod q for converting to Montgomery form.
    r_squared: u64,
    /// Forward twiddle factors (powers of ψ, bit-reversed order, Montgomery form).
    psi_powers: Vec<u64>,
    /// Inverse twiddle factors (powers of ψ^(-1)).
    psi_inv_powers: Vec<u64>,
    /// n^(-1) mod q in Montgomery form.
    n_inv: u64,
}

impl NttContext {
    /// Creates an NTT context for the given dimension and modulus.
    ///
    /// # Panics
    ///
    /// Panics if `n` is not a power of two at least 2, if q is not a prime
    /// below 2^62, or if q ≢ 1 (mod 2n).
    pub fn new(n: usize, q: u64) -> Self {
        assert!(
            n.is_power_of_two() && n >= 2,
            "n must be a power of two >= 2"
        );
        assert!(q < 1 << MAX_MODULUS_BITS, "q must be below 2^62");
        assert!(ModQ::is_prime(q), "q must be prime");
        let two_n = (n as u64).checked_mul(2);
        assert!(
            two_n.is_some_and(|m| q % m == 1),
            "q must be ≡ 1 (mod 2n)"
        );

        let q_inv_neg = Self::compute_q_inv_neg(q);
        let r_squared = Self::compute_r_squared(q);

        let psi = Self::find_primitive_root(2 * n as u64, q);
        let psi_mont = Self::to_montgomery(psi, q, r_squared, q_inv_neg);
        let psi_powers = Self::compute_twiddle_factors(n, psi_mont, q, q_inv_neg, r_squared);

        let psi_inv = ModQ::pow(psi, q - 2, q);
        let psi_inv_mont = Self::to_montgomery(psi_inv, q, r_squared, q_inv_neg);
        let psi_inv_powers =
            Self::compute_twiddle_factors(n, psi_inv_mont, q, q_inv_neg, r_squared);

        let n_inv = Self::to_montgomery(ModQ::pow(n as u64, q - 2, q), q, r_squared, q_inv_neg);

        Self {
            n,
            q,
            q_inv_neg,
            r_squared,
            psi_powers,
            psi_inv_powers,
            n_inv,
        }
    }

    /// Creates an NTT context with the default modulus.
    pub fn with_default_q(n: usize) -> Self {
        Self::new(n, DEFAULT_Q)
    }

    /// Returns the ring dimension.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Returns the modulus q.
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// Performs forward NTT in-place.
    ///
    /// Input coefficients must be reduced mod q; output is in Montgomery form.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs.len() != n`.
    pub fn forward(&self, coeffs: &mut [u64]) {
        assert_eq!(coeffs.len(), self.n, "Input length must match dimension");

        for c in coeffs.iter_mut() {
            *c = Self::to_montgomery(*c, self.q, self.r_squared, self.q_inv_neg);
        }

        let n = self.n;
        let q = self.q;
        let mut t = n;
        let mut m = 1;

        while m < n {
            t >>= 1;
            for i in 0..m {
                let j1 = 2 * i * t;
                let w = self.psi_powers[m + i];

                for j in j1..(j1 + t) {
                    let u = coeffs[j];
                    let v = self.montgomery_mul(coeffs[j + t], w);

                    coeffs[j] = if u + v >= q { u + v - q } else { u + v };
                    coeffs[j + t] = if u >= v { u - v } else { q - v + u };
                }
            }
            m <<= 1;
        }
    }

    /// Performs inverse NTT in-place using Gentleman-Sande butterflies.
    ///
    /// Output is converted out of Montgomery form.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs.len() != n`.
    pub fn inverse(&self, coeffs: &mut [u64]) {
        assert_eq!(coeffs.len(), self.n, "Input length must match dimension");

        let n = self.n;
        let q = self.q;
        let mut t = 1;
        let mut m = n;

        while m > 1 {
            m >>= 1;
            for i in 0..m {
                let j1 = i * 2 * t;
                let w = self.psi_inv_powers[m + i];

                for j in j1..(j1 + t) {
                    let u = coeffs[j];
                    let v = coeffs[j + t];

                    coeffs[j] = if u + v >= q { u + v - q } else { u + v };
                    let diff = if u >= v { u - v } else { q - v + u };
                    coeffs[j + t] = self.montgomery_mul(diff, w);
                }
            }
            t <<= 1;
        }

        // n^(-1) scaling and Montgomery exit in one multiplication each
        for c in coeffs.iter_mut() {
            *c = self.montgomery_mul(self.montgomery_mul(*c, self.n_inv), 1);
        }
    }

    /// Pointwise Montgomery multiplication in NTT domain: `result = a ⊙ b`.
    ///
    /// # Panics
    ///
    /// Panics if any slice length differs from n.
    pub fn pointwise_mul(&self, a: &[u64], b: &[u64], result: &mut [u64]) {
        assert_eq!(a.len(), self.n, "Input length must match dimension");
        assert_eq!(b.len(), self.n, "Input length must match dimension");
        assert_eq!(result.len(), self.n, "Output length must match dimension");

        for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
            *r = self.montgomery_mul(x, y);
        }
    }

    /// Pointwise multiply-accumulate in NTT domain: `acc += a ⊙ b`.
    pub fn pointwise_mul_acc(&self, a: &[u64], b: &[u64], acc: &mut [u64]) {
        assert_eq!(a.len(), self.n, "Input length must match dimension");
        assert_eq!(b.len(), self.n, "Input length must match dimension");
        assert_eq!(acc.len(), self.n, "Output length must match dimension");

        for ((r, &x), &y) in acc.iter_mut().zip(a).zip(b) {
            *r = ModQ::add(*r, self.montgomery_mul(x, y), self.q);
        }
    }

    #[inline]
    fn montgomery_mul(&self, a: u64, b: u64) -> u64 {
        Self::montgomery_reduce((a as u128) * (b as u128), self.q, self.q_inv_neg)
    }

    #[inline]
    fn montgomery_reduce(ab: u128, q: u64, q_inv_neg: u64) -> u64 {
        let m = ((ab as u64).wrapping_mul(q_inv_neg)) as u128;
        let t = ((ab + m * (q as u128)) >> 64) as u64;
        if t >= q {
            t - q
        } else {
            t
        }
    }

    fn to_montgomery(a: u64, q: u64, r_squared: u64, q_inv_neg: u64) -> u64 {
        Self::montgomery_reduce((a as u128) * (r_squared as u128), q, q_inv_neg)
    }

    fn compute_q_inv_neg(q: u64) -> u64 {
        let mut y: u64 = 1;
        for i in 1..64 {
            let yi = y.wrapping_mul(q) & (1u64 << i);
            y |= yi;
        }
        y.wrapping_neg()
    }

    fn compute_r_squared(q: u64) -> u64 {
        let r_mod_q = (1u128 << 64) % (q as u128);
        ((r_mod_q * r_mod_q) % (q as u128)) as u64
    }

    /// Find a primitive `order`-th root of unity modulo q
    fn find_primitive_root(order: u64, q: u64) -> u64 {
        let exp = (q - 1) / order;

        for g in 2..q {
            let candidate = ModQ::pow(g, exp, q);
            if ModQ::pow(candidate, order / 2, q) != 1 {
                return candidate;
            }
        }
        panic!("No primitive root found (should not happen for valid parameters)");
    }

    /// Twiddle factors in bit-reversed order: `factors[m + i] = ψ^bitrev(m + i)`
    fn compute_twiddle_factors(
        n: usize,
        psi: u64,
        q: u64,
        q_inv_neg: u64,
        r_squared: u64,
    ) -> Vec<u64> {
        let one = Self::to_montgomery(1, q, r_squared, q_inv_neg);
        let mut factors = vec![0u64; n];

        for m in 1..n {
            if m.is_power_of_two() {
                let exp = n / (2 * m);
                let mut pow = one;
                for _ in 0..exp {
                    pow = Self::montgomery_reduce((pow as u128) * (psi as u128), q, q_inv_neg);
                }
                factors[m] = pow;
            } else {
                let prev_idx = m & (m - 1); // clear lowest set bit
                let step_idx = m & m.wrapping_neg(); // lowest set bit
                factors[m] = Self::montgomery_reduce(
                    (factors[prev_idx] as u128) * (factors[step_idx] as u128),
                    q,
                    q_inv_neg,
                );
            }
        }

        factors
    }
}

impl std::fmt::Debug for NttContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NttContext")
            .field("n", &self.n)
            .field("q", &self.q)
            .finish()
    }
}
