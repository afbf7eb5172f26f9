//! Error handling for parameter configuration
//!
//! Protocol operations themselves have no recoverable failure mode: mismatched
//! rings or domains are contract violations and panic. The only fallible
//! surface is turning user-supplied parameters into a ring.

use thiserror::Error;

/// Invalid scheme parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamsError {
    /// Ring dimension is not a power of two or is below the supported minimum
    #[error("ring_dim must be a power of two >= {min}, got {got}")]
    RingDimension { got: usize, min: usize },

    /// Modulus is too wide for the Montgomery NTT
    #[error("q = {q} must be below 2^{max_bits}")]
    ModulusTooLarge { q: u64, max_bits: u32 },

    /// Modulus is composite, so Z_q has no NTT structure
    #[error("q = {q} must be prime")]
    NotPrime { q: u64 },

    /// Modulus does not admit a negacyclic NTT of this dimension
    #[error("q = {q} must be ≡ 1 (mod 2·{ring_dim}) for NTT")]
    NotNttFriendly { q: u64, ring_dim: usize },

    /// Plaintext modulus out of range
    #[error("plaintext modulus p = {p} must satisfy 1 < p < q = {q}")]
    PlaintextModulus { p: u64, q: u64 },

    /// Noise deviation is negative or not finite
    #[error("{name} = {value} must be finite and non-negative")]
    Deviation { name: &'static str, value: f64 },
}

/// Result type for parameter handling
pub type Result<T> = std::result::Result<T, ParamsError>;
