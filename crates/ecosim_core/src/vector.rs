//! Direction helpers that never produce NaN.

use ecosim_data::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

/// Uniformly random unit vector.
pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    DVec2::from_angle(rng.gen_range(0.0..TAU))
}

/// Normalizes `v`, substituting a random direction for a zero-length input.
///
/// ```
/// use ecosim_core::vector::safe_normalize;
/// use ecosim_data::DVec2;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let dir = safe_normalize(DVec2::ZERO, &mut rng);
/// assert!((dir.length() - 1.0).abs() < 1e-9);
/// ```
pub fn safe_normalize<R: Rng + ?Sized>(v: DVec2, rng: &mut R) -> DVec2 {
    v.try_normalize().unwrap_or_else(|| random_unit(rng))
}

/// Scales `v` to unit length and then by `weight`; zero stays zero.
#[must_use]
pub fn weighted(v: DVec2, weight: f64) -> DVec2 {
    v.try_normalize().map_or(DVec2::ZERO, |u| u * weight)
}
