//! Seedable random number generation.
//!
//! All sampling in this crate (random variates, bootstrap resampling)
//! takes an explicit `&mut impl Rng`, so results are reproducible from
//! a seed. [`create_rng`] is the standard way to get one.

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Creates a fast, seedable generator.
///
/// `SmallRng` is not cryptographically secure, which is fine for
/// statistical simulation and bootstrapping.
///
/// # Examples
/// ```
/// use psylab::random::create_rng;
/// use rand::Rng;
///
/// let mut a = create_rng(42);
/// let mut b = create_rng(42);
/// let x: f64 = a.random();
/// let y: f64 = b.random();
/// assert_eq!(x, y);
/// ```
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates a generator seeded from system entropy.
pub fn create_rng_from_entropy() -> SmallRng {
    SmallRng::from_os_rng()
}
