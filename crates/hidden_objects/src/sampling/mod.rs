//! Sampling strategies for generating candidate object positions in a 2D domain.
//!
//! The domain is the rectangle `[0, width) x [0, height)`. Samplers never fail:
//! a strategy that cannot satisfy its constraints returns fewer points.
use mint::Vector2;
use rand::RngCore;

pub mod rejection;

pub use rejection::{sample, sample_with_report, RejectionSampling, SamplingReport};

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform integer in `0..n`. Returns 0 when `n` is 0.
#[inline]
pub(crate) fn rand_below(rng: &mut dyn RngCore, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let n = n.min(u32::MAX as usize) as u64;
    ((rng.next_u32() as u64 * n) >> 32) as usize
}

/// Uniform integer in `min..=max`. Bounds are swapped if given out of order.
#[inline]
pub(crate) fn rand_inclusive(rng: &mut dyn RngCore, min: usize, max: usize) -> usize {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    lo + rand_below(rng, hi - lo + 1)
}

/// Compute the next smaller representable float value.
///
/// Used to keep sampled coordinates strictly below the right/top domain edge.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}
