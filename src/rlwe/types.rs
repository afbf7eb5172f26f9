//! RLWE key and ciphertext types.
//!
//! Ring-LWE over R_q = Z_q[X]/(X^d + 1). Keys are stored in the ring
//! engine's evaluation domain, ciphertexts in the coefficient domain.

use crate::math::{Poly, RingEngine};
use serde::{Deserialize, Serialize};

/// RLWE secret key (or one party's additive share of it).
///
/// # Fields
///
/// * `poly` - Ternary secret polynomial, evaluation domain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretKey {
    /// Secret polynomial in R_q, evaluation domain.
    pub poly: Poly,
}

/// RLWE public key `(p0, p1) = (-a·s + e, a)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    /// `-a·s + e`, evaluation domain.
    pub p0: Poly,
    /// Uniform `a`, evaluation domain.
    pub p1: Poly,
}

/// RLWE ciphertext `(c0, c1)` with `c0 + c1·s = Δ·m + e`.
///
/// Both components are in the coefficient domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    /// Body
    pub c0: Poly,
    /// Mask, the component multiplied by the secret key
    pub c1: Poly,
}

impl SecretKey {
    /// Wraps an evaluation-domain polynomial.
    ///
    /// # Panics
    ///
    /// Panics if `poly` is in the coefficient domain.
    pub fn from_poly(poly: Poly) -> Self {
        assert!(poly.is_ntt(), "Secret key must be in NTT domain");
        Self { poly }
    }

    /// Returns the ring dimension.
    pub fn ring_dim(&self) -> usize {
        self.poly.dimension()
    }
}

impl PublicKey {
    /// Creates a public key from its components.
    ///
    /// # Panics
    ///
    /// Panics if the components disagree on ring or are not in the evaluation domain.
    pub fn from_parts(p0: Poly, p1: Poly) -> Self {
        p0.assert_compatible(&p1);
        assert!(
            p0.is_ntt() && p1.is_ntt(),
            "Public key must be in NTT domain"
        );
        Self { p0, p1 }
    }

    /// Returns the ring dimension.
    pub fn ring_dim(&self) -> usize {
        self.p0.dimension()
    }
}

impl Ciphertext {
    /// Creates a ciphertext from component polynomials.
    ///
    /// # Panics
    ///
    /// Panics if `c0` and `c1` have different dimensions or moduli.
    pub fn from_parts(c0: Poly, c1: Poly) -> Self {
        c0.assert_compatible(&c1);
        Self { c0, c1 }
    }

    /// Allocates a zero ciphertext in `ring`, to be used as an output buffer.
    pub fn zero<R: RingEngine + ?Sized>(ring: &R) -> Self {
        Self {
            c0: ring.new_poly(),
            c1: ring.new_poly(),
        }
    }

    /// Returns the ring dimension.
    pub fn ring_dim(&self) -> usize {
        self.c0.dimension()
    }

    /// Returns the modulus q.
    pub fn modulus(&self) -> u64 {
        self.c0.modulus()
    }
}
