//! Per-party PCKS share

use crate::math::Poly;
use serde::{Deserialize, Serialize};

/// One party's public contribution to a collective public-key switch.
///
/// ```text
/// h0 = s_i·c1 + u_i·pk0 + e0_i      (e0_i smudging noise)
/// h1 = u_i·pk1 + e1_i
/// ```
///
/// Both components are in the coefficient domain. A share is safe to
/// broadcast; it lives for a single protocol round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PcksShare {
    /// Contribution to the new ciphertext body
    pub h0: Poly,
    /// Contribution to the new ciphertext mask
    pub h1: Poly,
}

impl PcksShare {
    /// Returns the ring dimension.
    pub fn ring_dim(&self) -> usize {
        self.h0.dimension()
    }

    /// Returns the modulus q.
    pub fn modulus(&self) -> u64 {
        self.h0.modulus()
    }
}
