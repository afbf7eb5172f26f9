//! Polynomials over R_q = Z_q[X]/(X^d + 1).
//!
//! A [`Poly`] is a plain coefficient vector tagged with its modulus and with
//! the domain its values live in. Which transform the "evaluation" domain
//! means is decided by the [`RingEngine`](super::RingEngine) that produced it;
//! `Poly` itself only checks that operands agree.

use super::modular::ModQ;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// Polynomial in R_q = Z_q[X]/(X^d + 1).
///
/// # Example
///
/// ```
/// use pcks::math::{Poly, DEFAULT_Q};
///
/// let poly = Poly::constant(42, 256, DEFAULT_Q);
/// assert_eq!(poly.coeff(0), 42);
/// assert_eq!(poly.dimension(), 256);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poly {
    /// Coefficients, or evaluations when `is_ntt` is set.
    coeffs: Vec<u64>,
    /// Modulus q.
    q: u64,
    /// Whether values are in the evaluation (transform) domain.
    is_ntt: bool,
}

impl Poly {
    /// Create zero polynomial with given dimension and modulus
    pub fn zero(dim: usize, q: u64) -> Self {
        Self {
            coeffs: vec![0; dim],
            q,
            is_ntt: false,
        }
    }

    /// Create polynomial from coefficient vector
    pub fn from_coeffs(coeffs: Vec<u64>, q: u64) -> Self {
        let coeffs = coeffs.into_iter().map(|c| c % q).collect();
        Self {
            coeffs,
            q,
            is_ntt: false,
        }
    }

    /// Create polynomial with a single coefficient (constant polynomial)
    pub fn constant(value: u64, dim: usize, q: u64) -> Self {
        let mut p = Self::zero(dim, q);
        p.coeffs[0] = value % q;
        p
    }

    /// Generate a uniformly random polynomial with given RNG
    pub fn random<R: Rng + ?Sized>(dim: usize, q: u64, rng: &mut R) -> Self {
        Self {
            coeffs: (0..dim).map(|_| rng.gen_range(0..q)).collect(),
            q,
            is_ntt: false,
        }
    }

    /// Get polynomial dimension
    pub fn dimension(&self) -> usize {
        self.coeffs.len()
    }

    /// Get modulus
    pub fn modulus(&self) -> u64 {
        self.q
    }

    /// Check if in evaluation domain
    pub fn is_ntt(&self) -> bool {
        self.is_ntt
    }

    /// Mark the domain the values are in.
    ///
    /// Only ring engines and samplers should call this, right after they
    /// wrote values of that domain.
    #[inline]
    pub fn set_ntt_domain(&mut self, is_ntt: bool) {
        self.is_ntt = is_ntt;
    }

    /// Get coefficient at index (only valid in coefficient domain)
    pub fn coeff(&self, i: usize) -> u64 {
        assert!(!self.is_ntt, "Cannot access coefficients in NTT domain");
        self.coeffs[i]
    }

    /// Get reference to the value vector
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Get mutable reference to the value vector
    pub fn coeffs_mut(&mut self) -> &mut [u64] {
        &mut self.coeffs
    }

    /// Coefficients as centered signed integers in [-q/2, q/2]
    pub fn to_signed(&self) -> Vec<i64> {
        assert!(!self.is_ntt, "Cannot center values in NTT domain");
        self.coeffs
            .iter()
            .map(|&c| ModQ::to_signed(c, self.q))
            .collect()
    }

    /// Check that `other` lives in the same ring as `self`.
    ///
    /// # Panics
    ///
    /// Panics on a dimension or modulus mismatch.
    #[inline]
    pub fn assert_compatible(&self, other: &Self) {
        assert_eq!(self.q, other.q, "Moduli must match");
        assert_eq!(
            self.coeffs.len(),
            other.coeffs.len(),
            "Dimensions must match"
        );
    }

    /// Overwrite with the values and domain of `src`, reusing the allocation
    pub fn copy_from(&mut self, src: &Self) {
        self.assert_compatible(src);
        self.coeffs.copy_from_slice(&src.coeffs);
        self.is_ntt = src.is_ntt;
    }

    /// Reset every value to zero in place
    pub fn set_zero(&mut self) {
        self.coeffs.iter_mut().for_each(|c| *c = 0);
    }

    /// Check if polynomial is zero
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Scalar multiplication
    pub fn scalar_mul(&self, scalar: u64) -> Self {
        let scalar = scalar % self.q;
        Self {
            coeffs: self
                .coeffs
                .iter()
                .map(|&c| ModQ::mul(c, scalar, self.q))
                .collect(),
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }

    /// L-infinity norm in centered representation
    pub fn linf_norm(&self) -> u64 {
        self.to_signed()
            .into_iter()
            .map(i64::unsigned_abs)
            .max()
            .unwrap_or(0)
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: Self) -> Self::Output {
        self.assert_compatible(rhs);
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        Poly {
            coeffs: self
                .coeffs
                .iter()
                .zip(&rhs.coeffs)
                .map(|(&a, &b)| ModQ::add(a, b, self.q))
                .collect(),
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }
}

impl AddAssign<&Poly> for Poly {
    fn add_assign(&mut self, rhs: &Self) {
        self.assert_compatible(rhs);
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        let q = self.q;
        for (a, &b) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *a = ModQ::add(*a, b, q);
        }
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: Self) -> Self::Output {
        self.assert_compatible(rhs);
        assert_eq!(self.is_ntt, rhs.is_ntt, "NTT domains must match");

        Poly {
            coeffs: self
                .coeffs
                .iter()
                .zip(&rhs.coeffs)
                .map(|(&a, &b)| ModQ::sub(a, b, self.q))
                .collect(),
            q: self.q,
            is_ntt: self.is_ntt,
        }
    }
}
