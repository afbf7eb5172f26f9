//! Collective public-key switching (PCKS)
//!
//! N parties hold additive shares `s_i` of a key `s = Σ s_i`. Given a
//! ciphertext `(c0, c1)` under `s` and a target public key `(pk0, pk1)`, the
//! protocol re-encrypts it under the target key in a single round:
//!
//! 1. Every party calls [`PcksProtocol::generate_share`] with its own `s_i`
//!    and broadcasts the resulting [`PcksShare`].
//! 2. The shares are summed in any order or tree shape with
//!    [`PcksProtocol::aggregate_shares`] / [`PcksProtocol::aggregate_into`].
//! 3. [`PcksProtocol::key_switch`] combines the full sum with `c0`.
//!
//! ```text
//! Σ h0_i = s·c1 + u·pk0 + e0        u = Σ u_i
//! Σ h1_i = u·pk1 + e1
//! (c0 + Σ h0_i) + (Σ h1_i)·s' = Δ·m + e + u·e_pk + e0 + e1·s'
//! ```
//!
//! The smudging noise `e0_i` is wide on purpose: it hides what `h0_i` would
//! otherwise reveal about `s_i`. Moving shares between parties is left to
//! the caller.

mod protocol;
mod share;

pub use protocol::{PcksProtocol, MASK_DENSITY, SMUDGING_TAILCUT};
pub use share::PcksShare;
