//! RLWE key generation, public-key encryption and decryption
//!
//! Encryption under `pk = (p0, p1)` with ephemeral ternary `u`:
//! `(c0, c1) = (u·p0 + e0 + Δ·m, u·p1 + e1)`, where Δ = ⌊q/p⌋.

use rand::{CryptoRng, RngCore};

use crate::context::SchemeContext;
use crate::math::{Poly, RingEngine};

use super::types::{Ciphertext, PublicKey, SecretKey};

/// Probability that a secret-key coefficient is nonzero
pub const SECRET_KEY_DENSITY: f64 = 2.0 / 3.0;

/// Probability that a coefficient of an encryption mask `u` is nonzero
pub const ENCRYPTION_MASK_DENSITY: f64 = 0.5;

impl SecretKey {
    /// Generate a ternary secret key
    pub fn generate<E, R>(ctx: &SchemeContext<E>, rng: &mut R) -> Self
    where
        E: RingEngine,
        R: RngCore + CryptoRng,
    {
        let ring = ctx.ring();
        let mut poly = ring.new_poly();
        ctx.ternary_sampler()
            .sample_poly_eval(ring, SECRET_KEY_DENSITY, &mut poly, rng);
        Self { poly }
    }

    /// Sum of key shares.
    ///
    /// Only for tests and simulations: in a real deployment nobody holds
    /// every share, and that is the point of collective key switching.
    pub fn sum<'a, E, I>(ctx: &SchemeContext<E>, shares: I) -> Self
    where
        E: RingEngine,
        I: IntoIterator<Item = &'a SecretKey>,
    {
        let ring = ctx.ring();
        let mut poly = ring.new_poly();
        ring.to_eval_inplace(&mut poly);
        for share in shares {
            ring.add_assign(&mut poly, &share.poly);
        }
        Self { poly }
    }
}

impl PublicKey {
    /// Generate a public key `(-a·s + e, a)` for `sk`
    pub fn generate<E, R>(ctx: &SchemeContext<E>, sk: &SecretKey, rng: &mut R) -> Self
    where
        E: RingEngine,
        R: RngCore + CryptoRng,
    {
        let ring = ctx.ring();
        let params = ctx.params();

        let mut p1 = Poly::random(params.ring_dim, params.q, rng);
        ring.to_eval_inplace(&mut p1);

        let mut e = ring.new_poly();
        ctx.gaussian_sampler().sample_poly(&mut e, rng);
        ring.to_eval_inplace(&mut e);

        let mut a_s = ring.new_poly();
        ring.mul_eval(&p1, &sk.poly, &mut a_s);
        let p0 = &e - &a_s;

        Self::from_parts(p0, p1)
    }
}

impl Ciphertext {
    /// Encrypt a message polynomial (coefficients in [0, p)) under `pk`
    pub fn encrypt<E, R>(
        ctx: &SchemeContext<E>,
        pk: &PublicKey,
        message: &Poly,
        rng: &mut R,
    ) -> Self
    where
        E: RingEngine,
        R: RngCore + CryptoRng,
    {
        let ring = ctx.ring();
        let params = ctx.params();
        assert_eq!(message.dimension(), params.ring_dim, "Dimensions must match");

        let mut u = ring.new_poly();
        ctx.ternary_sampler()
            .sample_poly_eval(ring, ENCRYPTION_MASK_DENSITY, &mut u, rng);

        let mut c0 = ring.new_poly();
        let mut c1 = ring.new_poly();
        ring.mul_eval(&u, &pk.p0, &mut c0);
        ring.mul_eval(&u, &pk.p1, &mut c1);
        ring.to_coeff_inplace(&mut c0);
        ring.to_coeff_inplace(&mut c1);

        let mut e = ring.new_poly();
        ctx.gaussian_sampler().sample_poly(&mut e, rng);
        ring.add_assign(&mut c0, &e);
        ctx.gaussian_sampler().sample_poly(&mut e, rng);
        ring.add_assign(&mut c1, &e);

        ring.add_assign(&mut c0, &scaled_message(ctx, message));

        Self::from_parts(c0, c1)
    }

    /// Phase `c0 + c1·s = Δ·m + e`, coefficient domain
    pub fn phase<E: RingEngine>(&self, ctx: &SchemeContext<E>, sk: &SecretKey) -> Poly {
        let ring = ctx.ring();
        let mut c1_eval = ring.new_poly();
        ring.to_eval(&self.c1, &mut c1_eval);
        let mut c1_s = ring.new_poly();
        ring.mul_eval(&c1_eval, &sk.poly, &mut c1_s);
        ring.to_coeff_inplace(&mut c1_s);

        &self.c0 + &c1_s
    }

    /// Decrypt to a polynomial modulo p
    ///
    /// Computes m = ⌊(c0 + c1·s) · p / q⌉ mod p
    pub fn decrypt<E: RingEngine>(&self, ctx: &SchemeContext<E>, sk: &SecretKey) -> Poly {
        let params = ctx.params();
        let (p, q) = (params.p as u128, params.q as u128);

        let phase = self.phase(ctx, sk);
        let coeffs = phase
            .coeffs()
            .iter()
            .map(|&v| (((v as u128 * p + q / 2) / q) % p) as u64)
            .collect();

        Poly::from_coeffs(coeffs, params.p)
    }

    /// log2 of the largest decryption error coefficient, given the expected message
    pub fn noise<E: RingEngine>(
        &self,
        ctx: &SchemeContext<E>,
        sk: &SecretKey,
        message: &Poly,
    ) -> f64 {
        let err = &self.phase(ctx, sk) - &scaled_message(ctx, message);
        (err.linf_norm().max(1) as f64).log2()
    }
}

/// Δ·m lifted into R_q
fn scaled_message<E: RingEngine>(ctx: &SchemeContext<E>, message: &Poly) -> Poly {
    let params = ctx.params();
    assert_eq!(message.dimension(), params.ring_dim, "Dimensions must match");
    Poly::from_coeffs(message.coeffs().to_vec(), params.q).scalar_mul(params.delta())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SchemeParams;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_message(ring_dim: usize, p: u64, rng: &mut impl Rng) -> Poly {
        Poly::from_coeffs((0..ring_dim).map(|_| rng.gen_range(0..p)).collect(), p)
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(256));
        let params = ctx.params();

        let sk = SecretKey::generate(&ctx, &mut rng);
        let pk = PublicKey::generate(&ctx, &sk, &mut rng);
        let message = random_message(params.ring_dim, params.p, &mut rng);

        let ct = Ciphertext::encrypt(&ctx, &pk, &message, &mut rng);
        assert_eq!(ct.decrypt(&ctx, &sk), message);
        assert!(ct.noise(&ctx, &sk, &message) < 20.0);
    }

    #[test]
    fn test_wrong_key_fails() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(256));
        let params = ctx.params();

        let sk = SecretKey::generate(&ctx, &mut rng);
        let other = SecretKey::generate(&ctx, &mut rng);
        let pk = PublicKey::generate(&ctx, &sk, &mut rng);
        let message = random_message(params.ring_dim, params.p, &mut rng);

        let ct = Ciphertext::encrypt(&ctx, &pk, &message, &mut rng);
        assert_ne!(ct.decrypt(&ctx, &other), message);
    }

    #[test]
    fn test_summed_key_shares_decrypt() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(128));
        let params = ctx.params();

        let shares: Vec<SecretKey> = (0..4)
            .map(|_| SecretKey::generate(&ctx, &mut rng))
            .collect();
        let sk = SecretKey::sum(&ctx, &shares);
        let pk = PublicKey::generate(&ctx, &sk, &mut rng);
        let message = random_message(params.ring_dim, params.p, &mut rng);

        let ct = Ciphertext::encrypt(&ctx, &pk, &message, &mut rng);
        assert_eq!(ct.decrypt(&ctx, &sk), message);
    }
}
