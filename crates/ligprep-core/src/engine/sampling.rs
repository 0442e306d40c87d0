use nalgebra::{Unit, Vector3};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;
use tracing::instrument;

const MIN_DIRECTION_NORM: f64 = 1e-12;

/// Creates the generator for one estimation run.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws a direction uniformly distributed on the unit sphere.
///
/// A vector of three independent standard normal deviates is rotationally symmetric, so
/// normalising it gives an isotropic direction. Draws too close to the origin to normalise
/// are discarded.
pub fn random_unit_vector(rng: &mut impl Rng) -> Unit<Vector3<f64>> {
    loop {
        let v = Vector3::new(
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
        );
        if let Some(unit) = Unit::try_new(v, MIN_DIRECTION_NORM) {
            return unit;
        }
    }
}

/// Draws `count` directions in sequence from a single generator.
///
/// Drawing every direction up front keeps the result for a given seed independent of how
/// the trials are later scheduled.
#[instrument(level = "trace", skip(rng))]
pub fn sample_directions(count: usize, rng: &mut impl Rng) -> Vec<Unit<Vector3<f64>>> {
    (0..count).map(|_| random_unit_vector(rng)).collect()
}
