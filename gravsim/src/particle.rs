use crate::{
    units::{Acceleration, Energy, Length, Mass, Momentum, Speed, Time},
    Quantity, Vector3,
};
use std::collections::{vec_deque, VecDeque};

/// Number of past positions kept by a [`Particle`].
pub const HISTORY_LEN: usize = 10;

// Cube root of the mass divided by this value gives the radius.
const RADIUS_DIVISOR: f64 = 6.0;

/// A spherical body with a mass, a position, a velocity and a short trail of past positions.
///
/// ```
/// use gravsim::prelude::*;
///
/// let mut particle = Particle::new(
///     Quantity::new(216.0),
///     Vector3::ZERO,
///     Vector3::new(1.0, 0.0, 0.0),
/// );
/// particle.update(Vector3::ZERO, Quantity::new(2.0));
///
/// assert_eq!(particle.position, Vector3::new(2.0, 0.0, 0.0));
/// assert_eq!(particle.history().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Mass of the particle.
    pub mass: Quantity<Mass>,
    /// Position of the centre of the particle.
    pub position: Vector3<Length>,
    /// Velocity of the particle.
    pub velocity: Vector3<Speed>,
    history: VecDeque<Vector3<Length>>,
}

impl Particle {
    /// Creates a new [`Particle`] with an empty history.
    #[inline]
    pub fn new(mass: Quantity<Mass>, position: Vector3<Length>, velocity: Vector3<Speed>) -> Self {
        Self {
            mass,
            position,
            velocity,
            history: VecDeque::with_capacity(HISTORY_LEN + 1),
        }
    }

    /// Radius of the particle, derived from its mass.
    #[inline]
    pub fn radius(&self) -> Quantity<Length> {
        Quantity::new(self.mass.value().cbrt() / RADIUS_DIVISOR)
    }

    /// Linear momentum, `m v`.
    #[inline]
    pub fn momentum(&self) -> Vector3<Momentum> {
        self.velocity * self.mass
    }

    /// Kinetic energy, `m v² / 2`.
    #[inline]
    pub fn energy(&self) -> Quantity<Energy> {
        self.velocity.magnitude_squared() * self.mass * 0.5
    }

    /// Advances the particle by `dt` under a constant `acceleration`.
    ///
    /// The position moves first using the current velocity, then the velocity is updated. The
    /// new position is appended to the history, which keeps the [`HISTORY_LEN`] most recent
    /// entries. The first update also records the starting position.
    pub fn update(&mut self, acceleration: Vector3<Acceleration>, dt: Quantity<Time>) {
        if self.history.is_empty() {
            self.history.push_back(self.position);
        }

        self.position += self.velocity * dt + acceleration * (dt * dt) * 0.5;
        self.velocity += acceleration * dt;

        self.history.push_back(self.position);
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
    }

    /// Past positions, oldest first.
    #[inline]
    pub fn history(&self) -> vec_deque::Iter<'_, Vector3<Length>> {
        self.history.iter()
    }

    /// Returns `true` if the two particles are closer than the sum of their radii.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.position.distance(other.position) < self.radius() + other.radius()
    }
}
