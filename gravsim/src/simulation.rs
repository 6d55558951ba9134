use crate::{
    config::{ensure, SimulationConfig},
    error::Result,
    factory::generate,
    gravity::Gravity,
    sequential::SequentialCompute,
    statistics::{merge, Statistics, Summary},
    units::{Acceleration, Energy, Mass, Time},
    Particle, Quantity, Vector3,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, trace};

/// A set of particles attracting each other and merging on contact.
///
/// On construction the particles are moved to the frame where their centre of mass sits at the
/// origin and their total momentum is zero, sorted by decreasing mass, and every overlapping pair
/// is merged. The same collision pass runs after every [`step`](Self::step), so no two particles
/// of a simulation ever overlap.
///
/// ```
/// use gravsim::prelude::*;
///
/// let mut simulation = Simulation::new(&SimulationConfig::default())?;
/// let mass = simulation.mass();
///
/// // One day, one hour at a time.
/// for _ in 0..24 {
///     simulation.step(Quantity::new(3600.0));
/// }
///
/// let summary = simulation.summary()?;
/// assert!(summary.count <= 100);
/// assert!((simulation.items().total_mass() - mass).abs() <= mass * 1e-12);
/// # Ok::<(), gravsim::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    mass: Quantity<Mass>,
    gravity: Gravity,
}

impl Simulation {
    /// Generates a new simulation from the given configuration, using a random generator seeded
    /// with [`SimulationConfig::seed`].
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        Self::with_rng(config, &mut StdRng::seed_from_u64(config.seed))
    }

    /// Same as [`new`](Self::new), drawing the particles from the given random generator instead.
    pub fn with_rng<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let particles = generate(rng, config.bounds())
            .take(config.particle_count)
            .collect();

        Self::from_particles(particles, config.gravity())
    }

    /// Creates a simulation from existing particles.
    ///
    /// Fails with [`Error::EmptyCollection`](crate::Error::EmptyCollection) if `particles` is
    /// empty, and with [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the gravitational
    /// constant or a mass is not finite and positive, or if a position or velocity is not finite.
    pub fn from_particles(mut particles: Vec<Particle>, gravity: Gravity) -> Result<Self> {
        ensure(
            gravity.g.is_finite() && gravity.g.value() > 0.0,
            "gravitational constant must be finite and positive",
        )?;
        ensure(
            particles
                .iter()
                .all(|p| p.mass.is_finite() && p.mass.value() > 0.0),
            "particle masses must be finite and positive",
        )?;
        ensure(
            particles
                .iter()
                .all(|p| p.position.is_finite() && p.velocity.is_finite()),
            "particle positions and velocities must be finite",
        )?;

        let mass = particles.total_mass();
        let center_of_mass = particles.center_of_mass()?;
        let bulk_velocity = particles.momentum() * mass.checked_recip()?;

        for particle in &mut particles {
            particle.position -= center_of_mass;
            particle.velocity -= bulk_velocity;
        }

        // Stable, heaviest first.
        particles.sort_by(|p1, p2| p2.mass.total_cmp(&p1.mass));

        let mut simulation = Self {
            particles,
            mass,
            gravity,
        };
        let generated = simulation.len();
        let merges = simulation.resolve_collisions();

        info!(
            "Simulation: {} particles ({} generated, {} merged), total mass {:e}",
            simulation.len(),
            generated,
            merges,
            mass
        );

        Ok(simulation)
    }

    /// Current particles.
    ///
    /// They are sorted by decreasing mass at construction. Merges keep the relative order of the
    /// surviving particles but a grown particle may end up heavier than the ones before it.
    #[inline]
    pub fn items(&self) -> &[Particle] {
        &self.particles
    }

    /// Total mass at construction.
    #[inline]
    pub fn mass(&self) -> Quantity<Mass> {
        self.mass
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always `false`, a simulation keeps at least one particle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The gravity interaction between the particles.
    #[inline]
    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// Aggregates of the current particles.
    #[inline]
    pub fn summary(&self) -> Result<Summary> {
        self.particles.summary()
    }

    /// Gravitational potential energy of the current particles.
    #[inline]
    pub fn potential_energy(&self) -> Quantity<Energy> {
        self.gravity.potential_energy(&self.particles)
    }

    /// Advances the simulation by `dt`.
    ///
    /// The acceleration of every particle is computed from the current positions before any
    /// particle moves. Each particle is then updated, and overlapping particles are merged.
    pub fn step(&mut self, dt: Quantity<Time>) {
        let accelerations = self.particles.brute_force_pairs(self.gravity);
        self.advance(accelerations, dt);
    }

    /// Same as [`step`](Self::step), computing the accelerations on multiple threads.
    ///
    /// The collision pass stays sequential.
    #[cfg(feature = "parallel")]
    pub fn par_step(&mut self, dt: Quantity<Time>) {
        use crate::parallel::ParallelCompute;

        let accelerations = self.particles.par_brute_force(self.gravity);
        self.advance(accelerations, dt);
    }

    fn advance<I>(&mut self, accelerations: I, dt: Quantity<Time>)
    where
        I: IntoIterator<Item = Vector3<Acceleration>>,
    {
        for (particle, acceleration) in self.particles.iter_mut().zip(accelerations) {
            particle.update(acceleration, dt);
        }

        let merges = self.resolve_collisions();
        trace!("Step of {}: {} particles, {} merged", dt, self.len(), merges);
    }

    /// Merges overlapping particles until no two particles overlap, returning the number of
    /// merges.
    ///
    /// A merged particle takes the place of the first particle of the pair. As it can grow into
    /// particles that were already checked, sweeps over the whole set repeat until one of them
    /// merges nothing.
    pub fn resolve_collisions(&mut self) -> usize {
        let mut merges = 0;

        loop {
            let swept = self.collision_sweep();
            if swept == 0 {
                break merges;
            }

            debug!("Collision sweep: {} merged, {} left", swept, self.len());
            merges += swept;
        }
    }

    fn collision_sweep(&mut self) -> usize {
        let mut merges = 0;
        let mut i = 0;

        while i < self.particles.len() {
            let particle = &self.particles[i];
            let overlapping = self.particles[i + 1..]
                .iter()
                .position(|other| particle.overlaps(other));

            match overlapping {
                Some(offset) => {
                    let absorbed = self.particles.remove(i + 1 + offset);
                    self.particles[i] = merge(&self.particles[i], &absorbed);
                    merges += 1;

                    trace!(
                        "Merged particle {} into {}, mass {:e}",
                        i + 1 + offset,
                        i,
                        self.particles[i].mass
                    );
                }
                None => i += 1,
            }
        }

        merges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::SIZE,
        units::{Length, Momentum, Speed},
    };

    fn particle(mass: f64, position: [f64; 3], velocity: [f64; 3]) -> Particle {
        let [px, py, pz] = position;
        let [vx, vy, vz] = velocity;
        Particle::new(
            Quantity::new(mass),
            Vector3::new(px, py, pz),
            Vector3::new(vx, vy, vz),
        )
    }

    fn moving_config() -> SimulationConfig {
        SimulationConfig {
            max_speed: Quantity::new(3e4),
            ..Default::default()
        }
    }

    // Too weak to move anything at these scales.
    fn negligible_gravity() -> Gravity {
        Gravity::new(Quantity::new(1e-30))
    }

    fn assert_no_overlap(simulation: &Simulation) {
        let items = simulation.items();

        for (i, p1) in items.iter().enumerate() {
            for p2 in &items[i + 1..] {
                assert!(!p1.overlaps(p2), "{p1:?} overlaps {p2:?}");
            }
        }
    }

    #[test]
    fn frame_is_normalised() {
        let simulation = Simulation::new(&moving_config()).unwrap();
        let items = simulation.items();

        let center_of_mass = items.center_of_mass().unwrap();
        let momentum_scale: Quantity<Momentum> = simulation.mass() * Quantity::<Speed>::new(3e4);

        assert!(center_of_mass.magnitude() <= SIZE * 1e-6);
        assert!(items.momentum().magnitude() <= momentum_scale * 1e-9);
        assert!(!simulation.is_empty() && simulation.len() <= 100);
        assert_no_overlap(&simulation);
    }

    #[test]
    fn sorted_by_decreasing_mass() {
        let particles = [(1.0, 40.0), (5.0, -10.0), (3.0, 0.0), (5.0, 2.0)]
            .map(|(mass, x)| particle(mass, [x, 0.0, 0.0], [0.0; 3]))
            .to_vec();

        let simulation = Simulation::from_particles(particles, Gravity::default()).unwrap();
        let masses: Vec<_> = simulation.items().iter().map(|p| p.mass.value()).collect();
        let positions: Vec<_> = simulation
            .items()
            .iter()
            .map(|p| p.position.x().value())
            .collect();

        // The centre of mass is already at the origin, and equal masses keep their order.
        assert_eq!(masses, [5.0, 5.0, 3.0, 1.0]);
        assert_eq!(positions, [-10.0, 2.0, 0.0, 40.0]);
    }

    #[test]
    fn mass_is_conserved() {
        // A small dense cloud so that merges actually happen.
        let config = SimulationConfig {
            size: Quantity::new(5e9),
            ..Default::default()
        };
        let mut simulation = Simulation::new(&config).unwrap();
        let mass = simulation.mass();
        let count = simulation.len();

        for _ in 0..24 * 10 {
            simulation.step(Quantity::new(3600.0));

            let total = simulation.items().total_mass();
            assert!((total - mass).abs() <= mass * 1e-12);
            assert_no_overlap(&simulation);
        }

        assert!(simulation.len() <= count);
        assert!(!simulation.is_empty());
    }

    #[test]
    fn overlapping_particles_merge_on_construction() {
        // Radius of 1 each.
        let particles = vec![
            particle(216.0, [0.0; 3], [1.0, 0.0, 0.0]),
            particle(216.0, [1.5, 0.0, 0.0], [0.0; 3]),
            particle(216.0, [100.0, 0.0, 0.0], [0.0; 3]),
        ];

        let simulation = Simulation::from_particles(particles, Gravity::default()).unwrap();

        assert_eq!(simulation.len(), 2);
        assert_eq!(simulation.items()[0].mass.value(), 432.0);
        assert_eq!(simulation.mass().value(), 648.0);
        assert!(simulation.items().momentum().magnitude().value() < 1e-12);
    }

    #[test]
    fn approaching_particles_merge_during_step() {
        let particles = vec![
            particle(216.0, [-5.0, 0.0, 0.0], [4.5, 0.0, 0.0]),
            particle(216.0, [5.0, 0.0, 0.0], [-4.5, 0.0, 0.0]),
        ];
        let mut simulation =
            Simulation::from_particles(particles, negligible_gravity()).unwrap();
        assert_eq!(simulation.len(), 2);

        simulation.step(Quantity::new(1.0));

        assert_eq!(simulation.len(), 1);
        let merged = &simulation.items()[0];
        assert_eq!(merged.mass.value(), 432.0);
        assert_eq!(merged.position, Vector3::ZERO);
        assert_eq!(merged.velocity, Vector3::ZERO);
        assert_eq!(merged.history().len(), 0);
    }

    #[test]
    fn separated_particles_stay_apart() {
        let particles = vec![
            particle(216.0, [-5.0, 0.0, 0.0], [0.0; 3]),
            particle(216.0, [5.0, 0.0, 0.0], [0.0; 3]),
        ];
        let mut simulation =
            Simulation::from_particles(particles, negligible_gravity()).unwrap();

        simulation.step(Quantity::new(1.0));

        assert_eq!(simulation.len(), 2);
        assert_eq!(simulation.items()[0].history().len(), 2);
    }

    #[test]
    fn accelerations_use_positions_before_the_step() {
        let particles = vec![
            particle(3.0, [0.0, 0.0, 0.0], [0.0, 0.1, 0.0]),
            particle(2.0, [10.0, 1.0, 0.0], [0.0, -0.2, 0.3]),
            particle(1.0, [-4.0, 7.0, 2.0], [0.5, 0.0, 0.0]),
        ];
        let gravity = Gravity::new(Quantity::new(1.0));
        let dt = Quantity::<Time>::new(0.1);
        let mut simulation = Simulation::from_particles(particles, gravity).unwrap();

        let mut expected = simulation.items().to_vec();
        let accelerations: Vec<_> = expected.as_slice().brute_force(gravity).collect();
        for (particle, acceleration) in expected.iter_mut().zip(accelerations) {
            particle.update(acceleration, dt);
        }

        simulation.step(dt);

        assert_eq!(simulation.len(), expected.len());
        for (computed, expected) in simulation.items().iter().zip(&expected) {
            assert!(computed.position.distance(expected.position).value() <= 1e-12);
            assert!(computed.velocity.distance(expected.velocity).value() <= 1e-12);
        }
    }

    #[test]
    fn merges_cascade_until_nothing_overlaps() {
        // The two lighter particles overlap. Once merged, the result reaches the heaviest one,
        // which was already checked during the first sweep.
        let particles = vec![
            particle(1000.0, [0.0, 0.0, 0.0], [0.0; 3]),
            particle(729.0, [3.2, 0.0, 0.0], [0.0; 3]),
            particle(729.0, [2.0, 2.5, 0.0], [0.0; 3]),
        ];
        assert!(!particles[0].overlaps(&particles[1]));
        assert!(!particles[0].overlaps(&particles[2]));
        assert!(particles[1].overlaps(&particles[2]));

        let simulation = Simulation::from_particles(particles, Gravity::default()).unwrap();

        assert_eq!(simulation.len(), 1);
        assert_eq!(simulation.items()[0].mass.value(), 2458.0);
        assert!(simulation.items()[0].position.magnitude().value() < 1e-12);
    }

    #[test]
    fn two_body_orbit() {
        let dt = Quantity::<Time>::new(1e-3);
        // Equal masses one unit away from their centre of mass, on a circular orbit when G = 1.
        let particles = vec![
            particle(1.0, [1.0, 0.0, 0.0], [0.0, 0.5, 0.0]),
            particle(1.0, [-1.0, 0.0, 0.0], [0.0, -0.5, 0.0]),
        ];
        let mut simulation =
            Simulation::from_particles(particles, Gravity::new(Quantity::new(1.0))).unwrap();

        let energy = |s: &Simulation| s.items().kinetic_energy() + s.potential_energy();
        let energy_before = energy(&simulation);
        let angular_momentum_before = simulation.items().angular_momentum().magnitude();
        assert!((energy_before.value() + 0.25).abs() < 1e-12);

        // One orbit.
        let steps = (4.0 * std::f64::consts::PI / dt.value()).round() as usize;
        for _ in 0..steps {
            simulation.step(dt);

            let [p1, p2] = simulation.items() else {
                panic!("particles merged");
            };
            let separation: Quantity<Length> = p1.position.distance(p2.position);
            assert!(separation.value() > 1.5 && separation.value() < 2.5);
        }

        let energy_error = (energy(&simulation) - energy_before) / energy_before.value();
        let angular_momentum_error = (simulation.items().angular_momentum().magnitude()
            - angular_momentum_before)
            / angular_momentum_before.value();

        assert!(energy_error.abs().value() < 1e-2, "{energy_error}");
        assert!(angular_momentum_error.abs().value() < 1e-2, "{angular_momentum_error}");
    }

    #[test]
    fn same_seed_same_simulation() {
        let config = moving_config();
        let mut first = Simulation::new(&config).unwrap();
        let mut second = Simulation::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(config.seed + 1);
        let other = Simulation::with_rng(&config, &mut rng).unwrap();

        assert_eq!(first.items(), second.items());
        assert_ne!(first.items(), other.items());

        for _ in 0..24 {
            first.step(Quantity::new(3600.0));
            second.step(Quantity::new(3600.0));
        }
        assert_eq!(first.items(), second.items());
    }

    #[test]
    fn degenerate_input() {
        use crate::Error;

        assert_eq!(
            Simulation::from_particles(Vec::new(), Gravity::default()).unwrap_err(),
            Error::EmptyCollection
        );

        let invalid_particles = [
            vec![particle(0.0, [0.0; 3], [0.0; 3])],
            vec![particle(-1.0, [0.0; 3], [0.0; 3]), particle(8.0, [5.0, 0.0, 0.0], [0.0; 3])],
            vec![particle(f64::NAN, [0.0; 3], [0.0; 3])],
            vec![particle(f64::INFINITY, [0.0; 3], [0.0; 3])],
            vec![particle(1.0, [f64::NAN, 0.0, 0.0], [0.0; 3])],
            vec![particle(1.0, [0.0; 3], [0.0, f64::INFINITY, 0.0])],
        ];
        for particles in invalid_particles {
            assert!(matches!(
                Simulation::from_particles(particles, Gravity::default()),
                Err(Error::InvalidConfig(_))
            ));
        }

        let pair = || {
            vec![
                particle(1.0, [0.0; 3], [0.0; 3]),
                particle(8.0, [5.0, 0.0, 0.0], [0.0; 3]),
            ]
        };
        for g in [f64::NAN, f64::INFINITY, 0.0, -6.67e-11] {
            assert!(matches!(
                Simulation::from_particles(pair(), Gravity::new(Quantity::new(g))),
                Err(Error::InvalidConfig(_))
            ));
        }
        assert!(Simulation::from_particles(pair(), Gravity::default()).is_ok());

        assert!(matches!(
            Simulation::new(&SimulationConfig::default().with_particle_count(0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let mut sequential = Simulation::new(&moving_config()).unwrap();
        let mut parallel = sequential.clone();

        for _ in 0..24 {
            sequential.step(Quantity::new(3600.0));
            parallel.par_step(Quantity::new(3600.0));
        }

        assert_eq!(sequential.len(), parallel.len());
        for (s, p) in sequential.items().iter().zip(parallel.items()) {
            assert_eq!(s.mass, p.mass);
            assert!(s.position.distance(p.position) <= SIZE * 1e-9);
        }
    }
}
