//! The ring-engine capability surface.
//!
//! Protocol code only ever talks to the ring through [`RingEngine`]: zero
//! allocation, forward/inverse domain transforms, evaluation-domain multiply
//! and multiply-accumulate, plus the domain-agnostic add/copy/zero helpers.
//! [`NttContext`] is the production engine; [`NaiveRing`](super::NaiveRing)
//! is a schoolbook reference used to cross-check it.

use super::ntt::NttContext;
use super::poly::Poly;

/// Arithmetic over R_q = Z_q[X]/(X^d + 1) with a fast evaluation domain.
///
/// Implementations decide what the evaluation domain is. Callers only rely on
/// `to_coeff(mul_eval(to_eval(a), to_eval(b))) == a * b` in R_q, and on the
/// evaluation domain being additive.
///
/// Every method panics when an operand belongs to another ring (dimension or
/// modulus mismatch) or sits in the wrong domain.
pub trait RingEngine {
    /// Ring dimension d.
    fn dimension(&self) -> usize;

    /// Ring modulus q.
    fn modulus(&self) -> u64;

    /// Transform a coefficient-domain polynomial into the evaluation domain, in place.
    fn to_eval_inplace(&self, p: &mut Poly);

    /// Transform an evaluation-domain polynomial back to coefficients, in place.
    fn to_coeff_inplace(&self, p: &mut Poly);

    /// `out = a * b`, all three in the evaluation domain.
    fn mul_eval(&self, a: &Poly, b: &Poly, out: &mut Poly);

    /// `acc += a * b`, all three in the evaluation domain.
    fn mul_eval_add(&self, a: &Poly, b: &Poly, acc: &mut Poly);

    /// Fresh zero polynomial in the coefficient domain.
    fn new_poly(&self) -> Poly {
        Poly::zero(self.dimension(), self.modulus())
    }

    /// `dst = to_eval(src)`, leaving `src` untouched.
    fn to_eval(&self, src: &Poly, dst: &mut Poly) {
        self.copy(src, dst);
        self.to_eval_inplace(dst);
    }

    /// `out = a + b`, in whichever domain both operands share.
    fn add(&self, a: &Poly, b: &Poly, out: &mut Poly) {
        self.check(out);
        out.copy_from(a);
        *out += b;
    }

    /// `acc += b`.
    fn add_assign(&self, acc: &mut Poly, b: &Poly) {
        self.check(acc);
        *acc += b;
    }

    /// `dst = src`.
    fn copy(&self, src: &Poly, dst: &mut Poly) {
        self.check(src);
        dst.copy_from(src);
    }

    /// Zero `p` in place, returning it to the coefficient domain.
    fn zero(&self, p: &mut Poly) {
        self.check(p);
        p.set_zero();
        p.set_ntt_domain(false);
    }

    /// Panic unless `p` belongs to this ring.
    fn check(&self, p: &Poly) {
        assert_eq!(p.modulus(), self.modulus(), "Moduli must match");
        assert_eq!(p.dimension(), self.dimension(), "Dimensions must match");
    }
}

impl RingEngine for NttContext {
    fn dimension(&self) -> usize {
        NttContext::dimension(self)
    }

    fn modulus(&self) -> u64 {
        NttContext::modulus(self)
    }

    fn to_eval_inplace(&self, p: &mut Poly) {
        self.check(p);
        assert!(!p.is_ntt(), "Polynomial is already in NTT domain");
        NttContext::forward(self, p.coeffs_mut());
        p.set_ntt_domain(true);
    }

    fn to_coeff_inplace(&self, p: &mut Poly) {
        self.check(p);
        assert!(p.is_ntt(), "Polynomial is not in NTT domain");
        NttContext::inverse(self, p.coeffs_mut());
        p.set_ntt_domain(false);
    }

    fn mul_eval(&self, a: &Poly, b: &Poly, out: &mut Poly) {
        self.check(a);
        self.check(b);
        self.check(out);
        assert!(
            a.is_ntt() && b.is_ntt(),
            "Both polynomials must be in NTT domain"
        );
        self.pointwise_mul(a.coeffs(), b.coeffs(), out.coeffs_mut());
        out.set_ntt_domain(true);
    }

    fn mul_eval_add(&self, a: &Poly, b: &Poly, acc: &mut Poly) {
        self.check(a);
        self.check(b);
        self.check(acc);
        assert!(
            a.is_ntt() && b.is_ntt() && acc.is_ntt(),
            "All polynomials must be in NTT domain"
        );
        self.pointwise_mul_acc(a.coeffs(), b.coeffs(), acc.coeffs_mut());
    }
}

/// Ring product of two coefficient-domain polynomials through `ring`'s evaluation domain.
#[cfg(test)]
pub(crate) fn mul<R: RingEngine + ?Sized>(ring: &R, a: &Poly, b: &Poly) -> Poly {
    let mut a_eval = ring.new_poly();
    let mut b_eval = ring.new_poly();
    ring.to_eval(a, &mut a_eval);
    ring.to_eval(b, &mut b_eval);

    let mut out = ring.new_poly();
    ring.mul_eval(&a_eval, &b_eval, &mut out);
    ring.to_coeff_inplace(&mut out);
    out
}
