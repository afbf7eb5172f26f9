//! Minimal RLWE scheme hosting the collective key switch.
//!
//! # Overview
//!
//! - Secret key s: ternary polynomial (evaluation domain)
//! - Public key (p0, p1) = (-a·s + e, a)
//! - Ciphertext (c0, c1) with c0 + c1·s = Δ·m + e, Δ = ⌊q/p⌋
//!
//! This is exactly the ciphertext and key layout the PCKS protocol consumes,
//! and enough of an encryption scheme to check that a switched ciphertext
//! really decrypts under the new key.
//!
//! # Example
//!
//! ```
//! use pcks::context::SchemeContext;
//! use pcks::math::Poly;
//! use pcks::params::SchemeParams;
//! use pcks::rlwe::{Ciphertext, PublicKey, SecretKey};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(0);
//! let ctx = SchemeContext::new(SchemeParams::insecure_test(64));
//!
//! let sk = SecretKey::generate(&ctx, &mut rng);
//! let pk = PublicKey::generate(&ctx, &sk, &mut rng);
//!
//! let message = Poly::constant(7, 64, ctx.params().p);
//! let ct = Ciphertext::encrypt(&ctx, &pk, &message, &mut rng);
//! assert_eq!(ct.decrypt(&ctx, &sk), message);
//! ```

mod enc;
mod types;

pub use enc::{ENCRYPTION_MASK_DENSITY, SECRET_KEY_DENSITY};
pub use types::{Ciphertext, PublicKey, SecretKey};
