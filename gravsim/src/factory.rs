use crate::{
    units::{Dimensionless, Length, Mass, Speed},
    Particle, Quantity, Vector3,
};
use rand::Rng;
use std::f64::consts::TAU;

/// Limits used when generating random particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleBounds {
    /// Smallest mass, inclusive.
    pub min_mass: Quantity<Mass>,
    /// Largest mass, exclusive.
    pub max_mass: Quantity<Mass>,
    /// Radius of the ball positions are drawn from.
    pub max_radius: Quantity<Length>,
    /// Radius of the ball velocities are drawn from.
    pub max_speed: Quantity<Speed>,
}

/// Returns a point drawn uniformly from the unit ball.
///
/// The azimuth is uniform in `[0, 2π)`, the cosine of the polar angle is uniform in `[-1, 1)` and
/// the distance from the origin is the cube root of a uniform value in `[0, 1)`.
pub fn sample_unit_ball<R: Rng + ?Sized>(rng: &mut R) -> Vector3<Dimensionless> {
    let azimuth = rng.gen::<f64>() * TAU;
    let radius = rng.gen::<f64>().cbrt();
    let cos_polar = 2.0 * rng.gen::<f64>() - 1.0;
    let sin_polar = (1.0 - cos_polar * cos_polar).sqrt();

    Vector3::new(
        radius * sin_polar * azimuth.cos(),
        radius * sin_polar * azimuth.sin(),
        radius * cos_polar,
    )
}

/// Returns a particle with a uniform random mass, and a position and velocity drawn from balls
/// of the given radii.
pub fn random_particle<R: Rng + ?Sized>(rng: &mut R, bounds: &ParticleBounds) -> Particle {
    let mass = bounds.min_mass + (bounds.max_mass - bounds.min_mass) * rng.gen::<f64>();
    let position = sample_unit_ball(rng) * bounds.max_radius;
    let velocity = sample_unit_ball(rng) * bounds.max_speed;

    Particle::new(mass, position, velocity)
}

/// Returns an endless iterator of random particles.
///
/// ```
/// use gravsim::{factory::{generate, ParticleBounds}, Quantity};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let bounds = ParticleBounds {
///     min_mass: Quantity::new(1.0),
///     max_mass: Quantity::new(10.0),
///     max_radius: Quantity::new(100.0),
///     max_speed: Quantity::new(0.0),
/// };
///
/// let mut rng = StdRng::seed_from_u64(0);
/// let particles: Vec<_> = generate(&mut rng, bounds).take(5).collect();
///
/// assert_eq!(particles.len(), 5);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: ParticleBounds,
) -> impl Iterator<Item = Particle> + '_ {
    std::iter::repeat_with(move || random_particle(rng, &bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const BOUNDS: ParticleBounds = ParticleBounds {
        min_mass: Quantity::new(1.0),
        max_mass: Quantity::new(4e28),
        max_radius: Quantity::new(1.5e11),
        max_speed: Quantity::new(3e4),
    };

    #[test]
    fn unit_ball_samples() {
        let mut rng = StdRng::seed_from_u64(0);
        let count = 100_000;

        let samples: Vec<_> = std::iter::repeat_with(|| sample_unit_ball(&mut rng))
            .take(count)
            .collect();
        let mean = samples.iter().sum::<Vector3<Dimensionless>>() / count as f64;

        assert!(samples.iter().all(|s| s.magnitude().value() <= 1.0 + 1e-12));
        assert!(mean.magnitude().value() < 1e-2, "{mean:?}");
    }

    #[test]
    fn particles_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(1);

        for particle in generate(&mut rng, BOUNDS).take(1_000) {
            assert!(particle.mass >= BOUNDS.min_mass && particle.mass < BOUNDS.max_mass);
            assert!(particle.position.magnitude() <= BOUNDS.max_radius * (1.0 + 1e-12));
            assert!(particle.velocity.magnitude() <= BOUNDS.max_speed * (1.0 + 1e-12));
            assert_eq!(particle.history().len(), 0);
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let first: Vec<_> = generate(&mut StdRng::seed_from_u64(7), BOUNDS).take(10).collect();
        let second: Vec<_> = generate(&mut StdRng::seed_from_u64(7), BOUNDS).take(10).collect();
        let other: Vec<_> = generate(&mut StdRng::seed_from_u64(8), BOUNDS).take(10).collect();

        assert_eq!(first, second);
        assert_ne!(first, other);
    }
}
