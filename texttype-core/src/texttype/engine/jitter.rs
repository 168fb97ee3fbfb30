//! Randomized timing perturbation.

use rand::Rng;
use std::time::Duration;

/// Floor applied to any jittered delay.
pub const MIN_DELAY_MS: f64 = 5.0;

/// Erasing uses a narrower spread than typing.
pub const DELETE_JITTER_SCALE: f64 = 0.6;

/// Perturb `base_ms` by up to `±base_ms·ratio`, uniformly.
///
/// A non-positive ratio returns the base delay untouched (and unfloored).
pub fn jitter<R: Rng + ?Sized>(base_ms: u64, ratio: f64, rng: &mut R) -> Duration {
    let base = base_ms as f64;
    if ratio.is_nan() || ratio <= 0.0 {
        return Duration::from_millis(base_ms);
    }
    let spread = base * ratio;
    let value = base + rng.gen_range(-1.0_f64..=1.0) * spread;
    Duration::from_secs_f64(value.max(MIN_DELAY_MS) / 1000.0)
}
