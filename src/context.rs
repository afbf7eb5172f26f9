//! Shared scheme context: parameters, ring engine and default samplers.

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::math::{GaussianSampler, NttContext, RingEngine, TernarySampler};
use crate::params::SchemeParams;

/// Everything the scheme and its protocols share read-only.
///
/// Built once per parameter set and handed around as `Arc<SchemeContext<R>>`,
/// so every protocol instance references the same ring and the same default
/// samplers instead of owning copies.
#[derive(Debug)]
pub struct SchemeContext<R: RingEngine = NttContext> {
    params: SchemeParams,
    ring: R,
    gaussian_sampler: GaussianSampler,
    ternary_sampler: TernarySampler,
}

impl SchemeContext<NttContext> {
    /// Build a context on the NTT engine.
    ///
    /// # Panics
    ///
    /// Panics on malformed parameters; use [`SchemeContext::try_new`] for
    /// parameters that come from outside the program.
    pub fn new(params: SchemeParams) -> Arc<Self> {
        let ring = NttContext::new(params.ring_dim, params.q);
        Self::with_ring(params, ring)
    }

    /// Validate `params`, then build a context on the NTT engine.
    pub fn try_new(params: SchemeParams) -> Result<Arc<Self>> {
        params.validate()?;
        Ok(Self::new(params))
    }
}

impl<R: RingEngine> SchemeContext<R> {
    /// Build a context on a caller-provided ring engine.
    ///
    /// # Panics
    ///
    /// Panics if the engine's dimension or modulus disagree with `params`, or
    /// if `params.sigma` is not a usable deviation.
    pub fn with_ring(params: SchemeParams, ring: R) -> Arc<Self> {
        assert_eq!(ring.dimension(), params.ring_dim, "Dimensions must match");
        assert_eq!(ring.modulus(), params.q, "Moduli must match");

        debug!(
            ring_dim = params.ring_dim,
            q = params.q,
            p = params.p,
            sigma = params.sigma,
            "built scheme context"
        );

        Arc::new(Self {
            gaussian_sampler: GaussianSampler::new(params.sigma),
            ternary_sampler: TernarySampler::new(),
            params,
            ring,
        })
    }

    /// Scheme parameters
    pub fn params(&self) -> &SchemeParams {
        &self.params
    }

    /// Ring engine
    pub fn ring(&self) -> &R {
        &self.ring
    }

    /// Default small Gaussian sampler (encryption-level noise)
    pub fn gaussian_sampler(&self) -> &GaussianSampler {
        &self.gaussian_sampler
    }

    /// Default ternary sampler
    pub fn ternary_sampler(&self) -> &TernarySampler {
        &self.ternary_sampler
    }
}
