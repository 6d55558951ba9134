#![warn(missing_docs)]
//! # Gravsim
//!
//! Gravsim simulates the gravitational dynamics of a cloud of spherical bodies in three
//! dimensions. Bodies attract each other following Newton's law, and two bodies that touch merge
//! into one, conserving mass and momentum.
//!
//! ## Units
//!
//! Every physical value is a [`Quantity`] or a [`Vector3`] tagged with its unit. Units are made of
//! the exponents of length, time and mass, checked at compile time: adding a length to a time
//! does not compile, and multiplying a speed by a time gives a length.
//!
//! ```
//! use gravsim::prelude::*;
//! use gravsim::units::{Length, Speed, Time};
//!
//! let velocity = Vector3::<Speed>::new(3.0, 0.0, 4.0);
//! let dt = Quantity::<Time>::new(2.0);
//!
//! let displacement: Vector3<Length> = velocity * dt;
//! assert_eq!(displacement.magnitude().value(), 10.0);
//! ```
//!
//! All values are expressed in SI base units: metres, seconds and kilograms.
//!
//! ## Running a simulation
//!
//! A [`Simulation`] is generated from a [`SimulationConfig`]. Particles are drawn from a seeded
//! random generator, so the same configuration always produces the same simulation.
//!
//! ```
//! use gravsim::prelude::*;
//!
//! let config = SimulationConfig {
//!     max_speed: Quantity::new(3e4),
//!     ..SimulationConfig::default().with_particle_count(50)
//! };
//! let mut simulation = Simulation::new(&config)?;
//!
//! for _ in 0..24 {
//!     simulation.step(Quantity::new(3600.0));
//! }
//!
//! let summary = simulation.summary()?;
//! println!("{summary}");
//! # Ok::<(), gravsim::Error>(())
//! ```
//!
//! [`Simulation::items`] gives read access to the particles between steps, and the
//! [`Statistics`] trait computes aggregates such as the centre of mass or the total angular
//! momentum of any slice of particles.
//!
//! Enable the `parallel` feature to compute accelerations on multiple threads with
//! [rayon](https://github.com/rayon-rs/rayon), and the `serde` feature to read a
//! [`SimulationConfig`] from a file.
//!
//! ## Interactions
//!
//! The accelerations are computed through the [`Interaction`] trait, implemented by
//! [`Gravity`](gravity::Gravity) for pairs of particles. The algorithms of the [`sequential`] and
//! [`parallel`] modules use it to compute the interaction over whole slices.
//!
//! ```
//! use gravsim::prelude::*;
//!
//! let particles = [
//!     Particle::new(Quantity::new(2e30), Vector3::ZERO, Vector3::ZERO),
//!     Particle::new(Quantity::new(6e24), Vector3::new(1.5e11, 0.0, 0.0), Vector3::ZERO),
//! ];
//!
//! let accelerations: Vec<_> = particles.brute_force_pairs(Gravity::default()).collect();
//! let earth = Gravity::default().compute(Between(&particles[1], &particles[0]));
//!
//! assert_eq!(accelerations[1], earth);
//! ```
//!
//! [`Statistics`]: statistics::Statistics
//! [`parallel`]: https://docs.rs/gravsim/latest/gravsim/parallel/index.html

/// Runtime configuration of a simulation.
pub mod config;
/// Error type of the checked operations.
pub mod error;
/// Random particle generation.
pub mod factory;
/// Newtonian gravity between particles.
pub mod gravity;
/// Algorithms that use multiple CPU threads.
#[cfg(feature = "parallel")]
pub mod parallel;
/// Particles and their motion.
pub mod particle;
/// Scalar quantities tagged with a unit.
pub mod quantity;
/// Algorithms that use one CPU thread.
pub mod sequential;
/// The simulation engine.
pub mod simulation;
/// Aggregates over collections of particles.
pub mod statistics;
/// Type-level units.
pub mod units;
/// Three dimensional vectors tagged with a unit.
pub mod vector;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use particle::Particle;
pub use quantity::Quantity;
pub use simulation::Simulation;
pub use vector::Vector3;

/// Represents a pair of objects, which can be particles or slices of particles, between which an
/// interaction is computed.
///
/// The first object is the one being affected by the second object.
#[derive(Clone, Copy, Debug)]
pub struct Between<S1, S2>(pub S1, pub S2);

/// Trait to compute an interaction between particles contained in a storage.
///
/// This is the main trait used throughout `gravsim` to implement the available algorithms, and
/// is also how interactions between particles are defined. For example, implementing
/// [`Interaction<Between<&Particle, &Particle>>`] for `YourInteraction` allows it to be used with
/// the brute-force algorithms.
///
/// # Example
///
/// ```
/// use gravsim::prelude::*;
/// use gravsim::units::Acceleration;
///
/// // Each particle of the slice adds a pull towards the origin, whatever its position.
/// #[derive(Clone)]
/// struct Spring(f64);
///
/// impl Interaction<Between<&Particle, &Particle>> for Spring {
///     type Output = Vector3<Acceleration>;
///
///     fn compute(&mut self, Between(affected, _): Between<&Particle, &Particle>) -> Self::Output {
///         Vector3::from_dvec3(-affected.position.to_dvec3() * self.0)
///     }
/// }
///
/// let particles = [
///     Particle::new(Quantity::new(1.0), Vector3::new(1.0, 0.0, 0.0), Vector3::ZERO),
///     Particle::new(Quantity::new(1.0), Vector3::new(0.0, 2.0, 0.0), Vector3::ZERO),
/// ];
///
/// let mut accelerations = particles.brute_force(Spring(0.5));
///
/// assert_eq!(accelerations.next(), Some(Vector3::new(-1.0, 0.0, 0.0)));
/// assert_eq!(accelerations.next(), Some(Vector3::new(0.0, -2.0, 0.0)));
/// ```
pub trait Interaction<Storage> {
    /// The computed interaction. This can be one or multiple values depending on the storage used.
    type Output;

    /// Returns the interaction between the particles in the storage.
    fn compute(&mut self, storage: Storage) -> Self::Output;
}

/// Commonly used types, re-exported.
pub mod prelude {
    pub use crate::{
        config::SimulationConfig,
        gravity::Gravity,
        particle::Particle,
        quantity::Quantity,
        simulation::Simulation,
        statistics::Statistics,
        vector::Vector3,
        Between, Interaction,
    };

    pub use crate::sequential::SequentialCompute;
    #[cfg(feature = "parallel")]
    pub use {crate::parallel::ParallelCompute, rayon::prelude::*};
}
