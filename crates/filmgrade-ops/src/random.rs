//! Random sources for the stochastic operators.
//!
//! Stochastic operators are generic over [`rand::Rng`] and borrow the
//! generator mutably, so tests and reproducible runs inject a seeded
//! [`StdRng`] while normal use draws from entropy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates the generator used by top-level entry points.
///
/// `Some(seed)` gives a reproducible stream; `None` seeds from OS entropy.
///
/// # Example
///
/// ```rust
/// use filmgrade_ops::random::rng_from_seed;
/// use rand::Rng;
///
/// let a: u64 = rng_from_seed(Some(7)).r#gen();
/// let b: u64 = rng_from_seed(Some(7)).r#gen();
/// assert_eq!(a, b);
/// ```
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws one standard normal deviate via the Box-Muller transform.
#[inline]
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // gen::<f64>() is in [0, 1); flip it so ln never sees zero
    let u1 = 1.0 - rng.r#gen::<f64>();
    let u2 = rng.r#gen::<f64>();
    let mag = (-2.0 * u1.ln()).sqrt();
    (mag * (std::f64::consts::TAU * u2).cos()) as f32
}
