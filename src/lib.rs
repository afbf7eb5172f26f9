//! Collective public-key switching for multiparty RLWE
//!
//! This crate implements the one-round PCKS protocol: N parties holding
//! additive shares of a decryption key jointly re-encrypt a ciphertext under
//! a new, independently generated public key, without reconstructing their
//! shared key.
//!
//! Key components:
//! - `math`: the ring engine (Montgomery NTT, polynomials, samplers) behind
//!   the `RingEngine` trait, plus a schoolbook reference engine
//! - `rlwe`: the minimal RLWE scheme whose keys and ciphertexts the protocol consumes
//! - `pcks`: the protocol itself

pub mod context;
pub mod error;
pub mod math;
pub mod params;
pub mod pcks;
pub mod rlwe;

pub use context::SchemeContext;
pub use error::ParamsError;
pub use params::SchemeParams;
pub use pcks::{PcksProtocol, PcksShare};
pub use rlwe::{Ciphertext, PublicKey, SecretKey};
