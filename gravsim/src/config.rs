use crate::{
    error::{Error, Result},
    factory::ParticleBounds,
    gravity::{Gravity, G},
    units::{GravitationalConstant, Length, Mass, Speed},
    Quantity,
};

/// Default number of generated particles.
pub const N: usize = 100;
/// Default radius of the ball particles are generated in.
pub const SIZE: Quantity<Length> = Quantity::new(1.5e11);
/// Default mass budget, used to derive [`MAX_MASS`].
pub const TOTAL_MASS: Quantity<Mass> = Quantity::new(2e30);
/// Default smallest particle mass.
pub const MIN_MASS: Quantity<Mass> = Quantity::new(1.0);
/// Default largest particle mass, twice the average share of [`TOTAL_MASS`].
pub const MAX_MASS: Quantity<Mass> = Quantity::new(TOTAL_MASS.value() * 2.0 / N as f64);
/// Default largest initial speed.
pub const MAX_SPEED: Quantity<Speed> = Quantity::new(0.0);
/// Default seed of the random generator.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of a [`Simulation`](crate::Simulation).
///
/// The default values generate 100 particles at rest inside a ball the size of the Earth's orbit,
/// with masses adding up to about one solar mass.
///
/// With the `serde` feature, missing fields take their default value and quantities are written
/// as bare numbers in SI units:
///
/// ```toml
/// particle_count = 200
/// max_speed = 3e4
/// seed = 7
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Number of particles generated before the initial collision pass.
    pub particle_count: usize,
    /// Radius of the ball positions are drawn from.
    pub size: Quantity<Length>,
    /// Mass budget, used by [`with_particle_count`](Self::with_particle_count).
    pub total_mass: Quantity<Mass>,
    /// Smallest particle mass.
    pub min_mass: Quantity<Mass>,
    /// Largest particle mass.
    pub max_mass: Quantity<Mass>,
    /// Radius of the ball velocities are drawn from.
    pub max_speed: Quantity<Speed>,
    /// Gravitational constant.
    pub gravitational_constant: Quantity<GravitationalConstant>,
    /// Seed of the random generator.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: N,
            size: SIZE,
            total_mass: TOTAL_MASS,
            min_mass: MIN_MASS,
            max_mass: MAX_MASS,
            max_speed: MAX_SPEED,
            gravitational_constant: G,
            seed: DEFAULT_SEED,
        }
    }
}

pub(crate) fn ensure(condition: bool, message: &str) -> Result<()> {
    match condition {
        true => Ok(()),
        false => Err(Error::InvalidConfig(message.to_owned())),
    }
}

impl SimulationConfig {
    /// Sets the particle count and rescales the largest mass so that the expected total mass
    /// stays close to [`total_mass`](Self::total_mass).
    #[must_use]
    pub fn with_particle_count(mut self, particle_count: usize) -> Self {
        self.particle_count = particle_count;
        self.max_mass = self.total_mass * 2.0 / particle_count as f64;
        self
    }

    /// Checks that the configuration can produce a valid particle set.
    pub fn validate(&self) -> Result<()> {
        ensure(self.particle_count > 0, "particle count must be positive")?;
        ensure(self.size.value() > 0.0, "size must be positive")?;
        ensure(self.min_mass.value() > 0.0, "minimum mass must be positive")?;
        ensure(
            self.max_mass.is_finite() && self.max_mass >= self.min_mass,
            "maximum mass must be finite and not below the minimum mass",
        )?;
        ensure(self.max_speed.value() >= 0.0, "maximum speed must not be negative")?;
        ensure(
            self.gravitational_constant.value() > 0.0,
            "gravitational constant must be positive",
        )
    }

    /// Bounds handed to the particle factory.
    #[inline]
    pub fn bounds(&self) -> ParticleBounds {
        ParticleBounds {
            min_mass: self.min_mass,
            max_mass: self.max_mass,
            max_radius: self.size,
            max_speed: self.max_speed,
        }
    }

    /// Gravity interaction using the configured constant.
    #[inline]
    pub fn gravity(&self) -> Gravity {
        Gravity::new(self.gravitational_constant)
    }
}
