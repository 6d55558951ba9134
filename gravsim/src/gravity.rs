use crate::{
    sequential::InteractionPair,
    units::{Acceleration, Energy, GravitationalConstant},
    Between, Interaction, Particle, Quantity, Vector3,
};

/// Newtonian gravitational constant, in m³ kg⁻¹ s⁻².
pub const G: Quantity<GravitationalConstant> = Quantity::new(6.67e-11);

/// Newtonian gravity between [`Particle`]s.
///
/// Computes the acceleration `G m / |R|²` along the direction `R` from the affected particle
/// towards the affecting one. Used with
/// [`brute_force`](crate::sequential::SequentialCompute::brute_force) it computes the
/// acceleration of every particle. With
/// [`brute_force_pairs`](crate::sequential::SequentialCompute::brute_force_pairs) each unordered
/// pair is only visited once.
///
/// ```
/// use gravsim::prelude::*;
///
/// let sun = Particle::new(Quantity::new(2e30), Vector3::ZERO, Vector3::ZERO);
/// let earth = Particle::new(Quantity::new(6e24), Vector3::new(1.5e11, 0.0, 0.0), Vector3::ZERO);
/// let bodies = [sun, earth];
///
/// let pairs: Vec<_> = bodies.brute_force_pairs(Gravity::default()).collect();
/// let all: Vec<_> = bodies.brute_force(Gravity::default()).collect();
///
/// assert!(pairs[1].x().value() < 0.0);
/// assert_eq!(pairs, all);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gravity {
    /// Gravitational constant.
    pub g: Quantity<GravitationalConstant>,
}

impl Gravity {
    /// Creates a new [`Gravity`] interaction with the given gravitational constant.
    #[inline]
    pub const fn new(g: Quantity<GravitationalConstant>) -> Self {
        Self { g }
    }

    /// Gravitational potential energy of a set of particles, `-Σ G mᵢ mⱼ / |Rᵢⱼ|` over every
    /// unordered pair.
    pub fn potential_energy(&self, particles: &[Particle]) -> Quantity<Energy> {
        particles
            .iter()
            .enumerate()
            .flat_map(|(i, p1)| particles[i + 1..].iter().map(move |p2| (p1, p2)))
            .map(|(p1, p2)| {
                -(self.g * p1.mass * p2.mass) * p1.position.distance(p2.position).recip()
            })
            .sum()
    }
}

impl Default for Gravity {
    #[inline]
    fn default() -> Self {
        Self::new(G)
    }
}

impl Interaction<Between<&Particle, &Particle>> for Gravity {
    type Output = Vector3<Acceleration>;

    /// Acceleration of the affected particle. Zero if both particles share the same position,
    /// which includes a particle acting on itself.
    #[inline]
    fn compute(
        &mut self,
        Between(affected, affecting): Between<&Particle, &Particle>,
    ) -> Self::Output {
        let r = affecting.position - affected.position;
        let distance_squared = r.magnitude_squared();

        if distance_squared == Quantity::ZERO {
            return Vector3::ZERO;
        }

        r.normalize() * distance_squared.recip() * (self.g * affecting.mass)
    }
}

impl InteractionPair<&Particle> for Gravity {
    type Output = Vector3<Acceleration>;

    /// Accelerations of both particles. The particles must not share the same position.
    #[inline]
    fn compute_pair(
        &mut self,
        Between(p1, p2): Between<&Particle, &Particle>,
    ) -> (Self::Output, Self::Output) {
        let r = p2.position - p1.position;
        let field = r.normalize() * r.magnitude_squared().recip();

        (field * (self.g * p2.mass), -(field * (self.g * p1.mass)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::units::Length;

    pub(crate) fn particles() -> Vec<Particle> {
        [
            ([0.0, 0.0, 0.0], 2e10),
            ([1.0, 1.0, 1.0], 3e10),
            ([-3.0, -3.0, -3.0], 4e10),
            ([10.0, 10.0, 10.0], 1.0),
            ([30.0, -5.0, 0.0], 5e9),
        ]
        .into_iter()
        .map(|([x, y, z], mass)| {
            Particle::new(Quantity::new(mass), Vector3::new(x, y, z), Vector3::ZERO)
        })
        .collect()
    }

    // Direct Newtonian sum for each particle.
    pub(crate) fn expected_accelerations(particles: &[Particle]) -> Vec<Vector3<Acceleration>> {
        particles
            .iter()
            .map(|p1| {
                let mut acceleration = glam::DVec3::ZERO;

                for p2 in particles {
                    let dir = (p2.position - p1.position).to_dvec3();
                    let mag_2 = dir.length_squared();

                    if mag_2 != 0.0 {
                        acceleration += dir * G.value() * p2.mass.value() / (mag_2 * mag_2.sqrt());
                    }
                }

                Vector3::from_dvec3(acceleration)
            })
            .collect()
    }

    pub(crate) fn acceleration_error<I>(computed: I, epsilon: f64)
    where
        I: IntoIterator<Item = Vector3<Acceleration>>,
    {
        let particles = particles();
        let expected = expected_accelerations(&particles);
        let computed: Vec<_> = computed.into_iter().collect();

        assert_eq!(computed.len(), expected.len());
        for (computed, expected) in computed.into_iter().zip(expected) {
            let error = (computed - expected).magnitude() / expected.magnitude().value();
            assert!(error.value() <= epsilon, "{computed:?} != {expected:?}");
        }
    }

    #[test]
    fn pair_is_antisymmetric_in_momentum() {
        let particles = particles();
        let (a1, a2) = Gravity::default().compute_pair(Between(&particles[0], &particles[1]));

        let f1 = a1 * particles[0].mass;
        let f2 = a2 * particles[1].mass;
        assert!((f1 + f2).magnitude().value() <= 1e-12 * f1.magnitude().value());
    }

    #[test]
    fn single_interaction() {
        let particles = particles();
        let mut gravity = Gravity::default();

        assert_eq!(
            gravity.compute(Between(&particles[0], &particles[0])),
            Vector3::ZERO
        );

        let (pair, _) = gravity.compute_pair(Between(&particles[0], &particles[1]));
        let single = gravity.compute(Between(&particles[0], &particles[1]));
        assert!((pair - single).magnitude().value() <= 1e-12 * single.magnitude().value());
    }

    #[test]
    fn inverse_square_law() {
        let sun = Particle::new(Quantity::new(2e30), Vector3::ZERO, Vector3::ZERO);
        let probe = |x: f64| {
            Particle::new(Quantity::new(1.0), Vector3::new(x, 0.0, 0.0), Vector3::ZERO)
        };
        let mut gravity = Gravity::default();

        let near = gravity.compute(Between(&probe(1e9), &sun));
        let far = gravity.compute(Between(&probe(2e9), &sun));

        assert!(near.x().value() < 0.0);
        assert!((near.magnitude().value() / far.magnitude().value() - 4.0).abs() < 1e-12);
        let expected = 6.67e-11 * 2e30 / 1e18;
        assert!((near.magnitude().value() - expected).abs() <= 1e-12 * expected);
    }

    #[test]
    fn potential_energy() {
        let a = Particle::new(Quantity::new(3.0), Vector3::ZERO, Vector3::ZERO);
        let b = Particle::new(
            Quantity::new(5.0),
            Vector3::<Length>::new(0.0, 2.0, 0.0),
            Vector3::ZERO,
        );
        let gravity = Gravity::new(Quantity::new(1.0));

        assert_eq!(gravity.potential_energy(&[a.clone(), b]).value(), -7.5);
        assert_eq!(gravity.potential_energy(&[a]), Quantity::ZERO);
        assert_eq!(gravity.potential_energy(&[]), Quantity::ZERO);
    }
}
