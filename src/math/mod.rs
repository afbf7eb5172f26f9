//! Ring arithmetic for collective key switching.
//!
//! This module provides the ring engine the protocol is written against:
//!
//! - **Modular arithmetic** over Z_q
//! - **Number-Theoretic Transform (NTT)** with Montgomery pointwise products
//! - **Polynomials** over R_q = Z_q[X]/(X^d + 1)
//! - **The [`RingEngine`] capability trait**, with a fast NTT engine and a
//!   schoolbook reference engine
//! - **Samplers**: truncated discrete Gaussian and ternary
//!
//! # Example
//!
//! ```
//! use pcks::math::{NttContext, RingEngine};
//!
//! let ctx = NttContext::with_default_q(256);
//! let mut poly = ctx.new_poly();
//! ctx.to_eval_inplace(&mut poly);
//! assert!(poly.is_ntt());
//! ```

pub mod gaussian;
pub mod modular;
pub mod ntt;
pub mod poly;
pub mod reference;
pub mod ring;
pub mod ternary;

pub use gaussian::GaussianSampler;
pub use modular::{ModQ, DEFAULT_Q};
pub use ntt::NttContext;
pub use poly::Poly;
pub use reference::NaiveRing;
pub use ring::RingEngine;
pub use ternary::TernarySampler;
