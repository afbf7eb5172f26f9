//! Parameter sets for the RLWE scheme hosting collective key switching

use crate::error::{ParamsError, Result};
use crate::math::gaussian::DEFAULT_SIGMA;
use crate::math::modular::MAX_MODULUS_BITS;
use crate::math::{ModQ, DEFAULT_Q};
use serde::{Deserialize, Serialize};

/// Smallest ring dimension the NTT engine supports
pub const MIN_RING_DIM: usize = 2;

/// Core scheme parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeParams {
    /// Ring dimension d (power of two)
    pub ring_dim: usize,

    /// Ciphertext modulus q
    /// Must be NTT-friendly: q ≡ 1 (mod 2d)
    pub q: u64,

    /// Plaintext modulus p
    pub p: u64,

    /// Standard deviation of ordinary encryption noise
    pub sigma: f64,
}

impl SchemeParams {
    /// Parameters for d = 2048 with the 60-bit default prime
    pub fn d2048() -> Self {
        Self {
            ring_dim: 2048,
            q: DEFAULT_Q,
            p: 65537,
            sigma: DEFAULT_SIGMA,
        }
    }

    /// Small ring for tests and demos. Not secure.
    pub fn insecure_test(ring_dim: usize) -> Self {
        Self {
            ring_dim,
            p: 65536,
            ..Self::d2048()
        }
    }

    /// Scaling factor Δ = ⌊q/p⌋
    pub fn delta(&self) -> u64 {
        self.q / self.p
    }

    /// Check if parameters are valid
    pub fn validate(&self) -> Result<()> {
        if !self.ring_dim.is_power_of_two() || self.ring_dim < MIN_RING_DIM {
            return Err(ParamsError::RingDimension {
                got: self.ring_dim,
                min: MIN_RING_DIM,
            });
        }

        if self.q >= 1 << MAX_MODULUS_BITS {
            return Err(ParamsError::ModulusTooLarge {
                q: self.q,
                max_bits: MAX_MODULUS_BITS,
            });
        }

        if !ModQ::is_prime(self.q) {
            return Err(ParamsError::NotPrime { q: self.q });
        }

        let two_d = (self.ring_dim as u64).checked_mul(2);
        if two_d.map_or(true, |m| self.q % m != 1) {
            return Err(ParamsError::NotNttFriendly {
                q: self.q,
                ring_dim: self.ring_dim,
            });
        }

        if self.p < 2 || self.p >= self.q {
            return Err(ParamsError::PlaintextModulus {
                p: self.p,
                q: self.q,
            });
        }

        validate_sigma("sigma", self.sigma)
    }
}

impl Default for SchemeParams {
    fn default() -> Self {
        Self::d2048()
    }
}

/// Check that a noise deviation is usable
pub fn validate_sigma(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::Deviation { name, value })
    }
}
