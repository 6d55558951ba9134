use crate::{
    error::{Error, Result},
    units::{AngularMomentum, Energy, Length, Mass, Momentum},
    Particle, Quantity, Vector3,
};
use std::fmt;

/// Aggregates over a collection of particles.
///
/// Implemented for slices of [`Particle`], so it is available on arrays, vectors and
/// [`Simulation::items`](crate::Simulation::items).
///
/// ```
/// use gravsim::prelude::*;
///
/// let particles = [
///     Particle::new(Quantity::new(2.0), Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0)),
///     Particle::new(Quantity::new(2.0), Vector3::new(4.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0)),
/// ];
///
/// assert_eq!(particles.total_mass().value(), 4.0);
/// assert_eq!(particles.center_of_mass(), Ok(Vector3::new(2.0, 0.0, 0.0)));
/// assert_eq!(particles.momentum(), Vector3::ZERO);
/// ```
pub trait Statistics {
    /// Sum of the masses.
    fn total_mass(&self) -> Quantity<Mass>;

    /// Mass-weighted average of the positions.
    ///
    /// Returns [`Error::EmptyCollection`] if there are no particles and [`Error::DivisionByZero`]
    /// if the total mass is zero.
    fn center_of_mass(&self) -> Result<Vector3<Length>>;

    /// Sum of the linear momenta.
    fn momentum(&self) -> Vector3<Momentum>;

    /// Sum of the angular momenta about the origin.
    fn angular_momentum(&self) -> Vector3<AngularMomentum>;

    /// Sum of the kinetic energies.
    fn kinetic_energy(&self) -> Quantity<Energy>;

    /// Merges every particle into a single one.
    ///
    /// The result carries the total mass, sits at the centre of mass and moves with the total
    /// momentum divided by the total mass. Its history is empty. Fails like
    /// [`center_of_mass`](Statistics::center_of_mass).
    fn merge(&self) -> Result<Particle>;

    /// Snapshot of the aggregates, see [`Summary`].
    fn summary(&self) -> Result<Summary>;
}

impl Statistics for [Particle] {
    #[inline]
    fn total_mass(&self) -> Quantity<Mass> {
        self.iter().map(|p| p.mass).sum()
    }

    fn center_of_mass(&self) -> Result<Vector3<Length>> {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }

        let inverse_mass = self.total_mass().checked_recip()?;
        let weighted = self
            .iter()
            .map(|p| p.position * p.mass)
            .fold(Vector3::ZERO, |acc, p| acc + p);

        Ok(weighted * inverse_mass)
    }

    #[inline]
    fn momentum(&self) -> Vector3<Momentum> {
        self.iter().map(Particle::momentum).sum()
    }

    #[inline]
    fn angular_momentum(&self) -> Vector3<AngularMomentum> {
        self.iter().map(|p| p.position.cross(p.momentum())).sum()
    }

    #[inline]
    fn kinetic_energy(&self) -> Quantity<Energy> {
        self.iter().map(Particle::energy).sum()
    }

    fn merge(&self) -> Result<Particle> {
        let position = self.center_of_mass()?;
        let mass = self.total_mass();
        let velocity = self.momentum() * mass.checked_recip()?;

        Ok(Particle::new(mass, position, velocity))
    }

    fn summary(&self) -> Result<Summary> {
        Ok(Summary {
            count: self.len(),
            angular_momentum: self.angular_momentum().magnitude(),
            energy: self.kinetic_energy(),
            momentum: self.momentum().magnitude(),
            center_of_mass: self.center_of_mass()?,
        })
    }
}

/// Merges two particles, conserving mass and momentum.
///
/// Unlike [`Statistics::merge`] this does not check its input: two massless particles produce
/// NaN components.
#[inline]
pub fn merge(a: &Particle, b: &Particle) -> Particle {
    let mass = a.mass + b.mass;
    let position = (a.position * a.mass + b.position * b.mass) / mass;
    let velocity = (a.momentum() + b.momentum()) / mass;

    Particle::new(mass, position, velocity)
}

/// Aggregates of a particle collection, meant for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Number of particles.
    pub count: usize,
    /// Magnitude of the total angular momentum.
    pub angular_momentum: Quantity<AngularMomentum>,
    /// Total kinetic energy.
    pub energy: Quantity<Energy>,
    /// Magnitude of the total momentum.
    pub momentum: Quantity<Momentum>,
    /// Centre of mass.
    pub center_of_mass: Vector3<Length>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "particles: {}, |L|: {:.3e}, E: {:.3e}, |p|: {:.3e}, centre of mass: {:.3e}",
            self.count, self.angular_momentum, self.energy, self.momentum, self.center_of_mass
        )
    }
}
