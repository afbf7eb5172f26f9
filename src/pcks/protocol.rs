//! The PCKS protocol instance

use std::sync::Arc;

use rand::{CryptoRng, RngCore};
use tracing::{debug, trace};

use crate::context::SchemeContext;
use crate::error::Result;
use crate::math::{GaussianSampler, NttContext, Poly, RingEngine};
use crate::params::validate_sigma;
use crate::rlwe::{Ciphertext, PublicKey, SecretKey};

use super::share::PcksShare;

/// Smudging noise is truncated to ±trunc(SMUDGING_TAILCUT · σ)
pub const SMUDGING_TAILCUT: f64 = 6.0;

/// Nonzero density of the per-share ephemeral mask `u_i`
pub const MASK_DENSITY: f64 = 0.5;

/// Collective public-key switching.
///
/// Re-encrypts a ciphertext under a secret key that is additively shared
/// among N parties, `s = Σ s_i`, into a ciphertext under an independent
/// target public key, in one round and without reconstructing `s`.
///
/// One instance serves any number of rounds. It keeps a scratch polynomial
/// between calls, which is why [`generate_share`](Self::generate_share) takes
/// `&mut self`: parties running concurrently need one instance each.
///
/// # Example
///
/// ```
/// use pcks::context::SchemeContext;
/// use pcks::math::Poly;
/// use pcks::params::SchemeParams;
/// use pcks::pcks::PcksProtocol;
/// use pcks::rlwe::{Ciphertext, PublicKey, SecretKey};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let mut rng = ChaCha20Rng::seed_from_u64(0);
/// let ctx = SchemeContext::new(SchemeParams::insecure_test(64));
///
/// // Three parties share the input key
/// let shares: Vec<SecretKey> = (0..3).map(|_| SecretKey::generate(&ctx, &mut rng)).collect();
/// let pk = PublicKey::generate(&ctx, &SecretKey::sum(&ctx, &shares), &mut rng);
/// let message = Poly::constant(42, 64, ctx.params().p);
/// let ct = Ciphertext::encrypt(&ctx, &pk, &message, &mut rng);
///
/// // Target key pair
/// let sk_out = SecretKey::generate(&ctx, &mut rng);
/// let pk_out = PublicKey::generate(&ctx, &sk_out, &mut rng);
///
/// let mut pcks = PcksProtocol::new(ctx.clone(), 1024.0);
/// let mut combined = pcks.allocate_share();
/// let mut share = pcks.allocate_share();
/// for sk_i in &shares {
///     pcks.generate_share(sk_i, &pk_out, &ct, &mut share, &mut rng);
///     pcks.aggregate_into(&mut combined, &share);
/// }
///
/// let mut ct_out = Ciphertext::zero(ctx.ring());
/// pcks.key_switch(&combined, &ct, &mut ct_out);
/// assert_eq!(ct_out.decrypt(&ctx, &sk_out), message);
/// ```
#[derive(Debug)]
pub struct PcksProtocol<R: RingEngine = NttContext> {
    ctx: Arc<SchemeContext<R>>,
    smudging_sampler: GaussianSampler,
    tmp: Poly,
}

impl<R: RingEngine> PcksProtocol<R> {
    /// Creates a protocol instance with smudging deviation `smudging_sigma`.
    ///
    /// The smudging sampler is truncated at ±trunc(6·σ). The default Gaussian
    /// and ternary samplers are taken from `ctx`.
    ///
    /// # Panics
    ///
    /// Panics if `smudging_sigma` is negative or not finite. A zero deviation
    /// is accepted: shares then stay correct but lose their circuit privacy.
    pub fn new(ctx: Arc<SchemeContext<R>>, smudging_sigma: f64) -> Self {
        let bound = (SMUDGING_TAILCUT * smudging_sigma) as i64;
        let smudging_sampler = GaussianSampler::with_bound(smudging_sigma, bound);
        let tmp = ctx.ring().new_poly();

        debug!(
            ring_dim = ctx.params().ring_dim,
            smudging_sigma,
            smudging_bound = bound,
            "created PCKS protocol"
        );

        Self {
            ctx,
            smudging_sampler,
            tmp,
        }
    }

    /// Like [`new`](Self::new), but reports an unusable deviation as an error.
    pub fn try_new(ctx: Arc<SchemeContext<R>>, smudging_sigma: f64) -> Result<Self> {
        validate_sigma("smudging_sigma", smudging_sigma)?;
        Ok(Self::new(ctx, smudging_sigma))
    }

    /// Shared scheme context
    pub fn context(&self) -> &Arc<SchemeContext<R>> {
        &self.ctx
    }

    /// Smudging standard deviation
    pub fn smudging_sigma(&self) -> f64 {
        self.smudging_sampler.sigma()
    }

    /// Smudging truncation bound
    pub fn smudging_bound(&self) -> i64 {
        self.smudging_sampler.bound()
    }

    /// Allocates a zero share sized to the ring.
    pub fn allocate_share(&self) -> PcksShare {
        let ring = self.ctx.ring();
        PcksShare {
            h0: ring.new_poly(),
            h1: ring.new_poly(),
        }
    }

    /// Computes this party's share and writes it to `share_out`:
    ///
    /// ```text
    /// [s_i·c1 + u_i·pk0 + e0_i,  u_i·pk1 + e1_i]
    /// ```
    ///
    /// `sk` and `pk` are expected in the evaluation domain, `ct` in the
    /// coefficient domain. Only `share_out` and the internal scratch buffer
    /// are written; the scratch buffer is zeroed before returning.
    pub fn generate_share<G>(
        &mut self,
        sk: &SecretKey,
        pk: &PublicKey,
        ct: &Ciphertext,
        share_out: &mut PcksShare,
        rng: &mut G,
    ) where
        G: RngCore + CryptoRng,
    {
        let ring = self.ctx.ring();
        ring.check(&share_out.h0);
        ring.check(&share_out.h1);

        // u_i
        self.ctx
            .ternary_sampler()
            .sample_poly_eval(ring, MASK_DENSITY, &mut self.tmp, rng);

        // h0 = u_i·pk0, h1 = u_i·pk1 (NTT)
        ring.mul_eval(&self.tmp, &pk.p0, &mut share_out.h0);
        ring.mul_eval(&self.tmp, &pk.p1, &mut share_out.h1);

        // h0 += s_i·c1 (NTT)
        ring.to_eval(&ct.c1, &mut self.tmp);
        ring.mul_eval_add(&sk.poly, &self.tmp, &mut share_out.h0);

        ring.to_coeff_inplace(&mut share_out.h0);
        ring.to_coeff_inplace(&mut share_out.h1);

        // h0 += e0 (smudging)
        self.smudging_sampler.sample_poly(&mut self.tmp, rng);
        ring.add_assign(&mut share_out.h0, &self.tmp);

        // h1 += e1
        self.ctx.gaussian_sampler().sample_poly(&mut self.tmp, rng);
        ring.add_assign(&mut share_out.h1, &self.tmp);

        ring.zero(&mut self.tmp);

        trace!(ring_dim = ring.dimension(), "generated PCKS share");
    }

    /// `share_out = share1 + share2`.
    ///
    /// Plain ring addition, so any order or grouping of the N shares gives
    /// the same combined share.
    pub fn aggregate_shares(
        &self,
        share1: &PcksShare,
        share2: &PcksShare,
        share_out: &mut PcksShare,
    ) {
        let ring = self.ctx.ring();
        ring.add(&share1.h0, &share2.h0, &mut share_out.h0);
        ring.add(&share1.h1, &share2.h1, &mut share_out.h1);
    }

    /// `acc += share`, the in-place form of [`aggregate_shares`](Self::aggregate_shares).
    pub fn aggregate_into(&self, acc: &mut PcksShare, share: &PcksShare) {
        let ring = self.ctx.ring();
        ring.add_assign(&mut acc.h0, &share.h0);
        ring.add_assign(&mut acc.h1, &share.h1);
    }

    /// Sums any number of shares. An empty iterator yields the zero share.
    pub fn aggregate_all<'a, I>(&self, shares: I) -> PcksShare
    where
        I: IntoIterator<Item = &'a PcksShare>,
    {
        let mut acc = self.allocate_share();
        for share in shares {
            self.aggregate_into(&mut acc, share);
        }
        acc
    }

    /// Re-keys `ct` with the combined share of all N parties:
    ///
    /// ```text
    /// ct_out = [c0 + Σ h0_i,  Σ h1_i]
    /// ```
    ///
    /// `combined` must be the sum over every party. A partial sum still
    /// produces a ciphertext, but it does not decrypt under the target key.
    /// Only `ct_out` is written.
    pub fn key_switch(&self, combined: &PcksShare, ct: &Ciphertext, ct_out: &mut Ciphertext) {
        let ring = self.ctx.ring();
        ring.add(&ct.c0, &combined.h0, &mut ct_out.c0);
        ring.copy(&combined.h1, &mut ct_out.c1);

        trace!(ring_dim = ring.dimension(), "switched ciphertext key");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SchemeParams;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn inputs(
        ctx: &SchemeContext,
        rng: &mut ChaCha20Rng,
    ) -> (SecretKey, PublicKey, Ciphertext) {
        let sk = SecretKey::generate(ctx, rng);
        let pk = PublicKey::generate(ctx, &sk, rng);
        let message = Poly::zero(ctx.params().ring_dim, ctx.params().p);
        let ct = Ciphertext::encrypt(ctx, &pk, &message, rng);
        (sk, pk, ct)
    }

    #[test]
    fn test_smudging_bound_is_six_sigma() {
        let ctx = SchemeContext::new(SchemeParams::insecure_test(16));
        let pcks = PcksProtocol::new(ctx, 3.2);
        assert_eq!(pcks.smudging_bound(), 19);
        assert_eq!(pcks.smudging_sigma(), 3.2);
    }

    #[test]
    fn test_allocate_share_is_zero() {
        let ctx = SchemeContext::new(SchemeParams::insecure_test(32));
        let pcks = PcksProtocol::new(ctx, 8.0);
        let share = pcks.allocate_share();

        assert_eq!(share.ring_dim(), 32);
        assert_eq!(share.modulus(), crate::math::DEFAULT_Q);
        assert!(share.h0.is_zero() && share.h1.is_zero());
        assert!(!share.h0.is_ntt() && !share.h1.is_ntt());
    }

    #[test]
    fn test_generate_share_leaves_scratch_zeroed() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(64));
        let (sk, pk, ct) = inputs(&ctx, &mut rng);

        let mut pcks = PcksProtocol::new(ctx, 1024.0);
        let mut share = pcks.allocate_share();
        pcks.generate_share(&sk, &pk, &ct, &mut share, &mut rng);

        assert!(pcks.tmp.is_zero());
        assert!(!pcks.tmp.is_ntt());
        assert!(!share.h0.is_ntt() && !share.h1.is_ntt());
    }

    #[test]
    fn test_generate_share_does_not_touch_inputs() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(64));
        let (sk, pk, ct) = inputs(&ctx, &mut rng);
        let (sk_before, pk_before, ct_before) = (sk.clone(), pk.clone(), ct.clone());

        let mut pcks = PcksProtocol::new(ctx, 1024.0);
        let mut share = pcks.allocate_share();
        pcks.generate_share(&sk, &pk, &ct, &mut share, &mut rng);

        assert_eq!(sk, sk_before);
        assert_eq!(pk, pk_before);
        assert_eq!(ct, ct_before);
    }

    #[test]
    fn test_aggregate_all_empty_is_zero_share() {
        let ctx = SchemeContext::new(SchemeParams::insecure_test(16));
        let pcks = PcksProtocol::new(ctx, 8.0);
        let none: Vec<PcksShare> = Vec::new();
        assert_eq!(pcks.aggregate_all(&none), pcks.allocate_share());
    }

    #[test]
    fn test_key_switch_replaces_c1() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(32));
        let (_, _, ct) = inputs(&ctx, &mut rng);
        let pcks = PcksProtocol::new(ctx.clone(), 8.0);

        let mut combined = pcks.allocate_share();
        combined.h0 = Poly::random(32, ctx.params().q, &mut rng);
        combined.h1 = Poly::random(32, ctx.params().q, &mut rng);

        let mut ct_out = Ciphertext::zero(ctx.ring());
        pcks.key_switch(&combined, &ct, &mut ct_out);

        assert_eq!(ct_out.c0, &ct.c0 + &combined.h0);
        assert_eq!(ct_out.c1, combined.h1);
        assert_eq!(ct_out.modulus(), ct.modulus());
        assert_eq!(ct_out.ring_dim(), ct.ring_dim());
    }

    #[test]
    fn test_try_new_rejects_negative_sigma() {
        let ctx = SchemeContext::new(SchemeParams::insecure_test(16));
        assert!(PcksProtocol::try_new(ctx.clone(), -1.0).is_err());
        assert!(PcksProtocol::try_new(ctx, f64::INFINITY).is_err());
    }

    #[test]
    #[should_panic(expected = "Dimensions must match")]
    fn test_share_from_other_ring_panics() {
        let mut rng = ChaCha20Rng::seed_from_u64(14);
        let ctx = SchemeContext::new(SchemeParams::insecure_test(32));
        let (sk, pk, ct) = inputs(&ctx, &mut rng);

        let other = PcksProtocol::new(SchemeContext::new(SchemeParams::insecure_test(64)), 8.0);
        let mut foreign = other.allocate_share();

        let mut pcks = PcksProtocol::new(ctx, 8.0);
        pcks.generate_share(&sk, &pk, &ct, &mut foreign, &mut rng);
    }
}
