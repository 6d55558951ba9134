use crate::{Between, Interaction};
use std::ops::{Add, AddAssign};

/// Single-threaded accelerations over a slice of particles.
///
/// Implemented for `&[P]`, which yields one result per particle in slice order, and for
/// `Between<&P, &[P]>`, which sums the interaction of a whole slice on one particle.
pub trait SequentialCompute<T>: Sized {
    /// Sums the interaction over every ordered pair, self-pairs included.
    #[inline]
    fn brute_force(self, interaction: T) -> <BruteForce<T> as Interaction<Self>>::Output
    where
        BruteForce<T>: Interaction<Self>,
    {
        BruteForce(interaction).compute(self)
    }

    /// Same results as [`brute_force`](Self::brute_force), visiting each unordered pair once.
    ///
    /// This is what [`Simulation::step`](crate::Simulation::step) uses.
    #[inline]
    fn brute_force_pairs(self, interaction: T) -> <BruteForcePairs<T> as Interaction<Self>>::Output
    where
        BruteForcePairs<T>: Interaction<Self>,
    {
        BruteForcePairs(interaction).compute(self)
    }
}

impl<T, P> SequentialCompute<T> for &[P] {}
impl<T, S1, S2> SequentialCompute<T> for Between<S1, S2> {}

/// Lazy per-particle results of [`BruteForce`] over a slice.
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone, Debug)]
pub struct Interactions<'a, T, P> {
    algorithm: BruteForce<T>,
    affected: std::slice::Iter<'a, P>,
    particles: &'a [P],
}

impl<'a, T, P, U> Iterator for Interactions<'a, T, P>
where
    BruteForce<T>: Interaction<Between<&'a P, &'a [P]>, Output = U>,
{
    type Item = U;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let particle = self.affected.next()?;
        Some(self.algorithm.compute(Between(particle, self.particles)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.affected.size_hint()
    }
}

impl<T, P> ExactSizeIterator for Interactions<'_, T, P> where Self: Iterator {}

/// Accumulates the interaction of every particle on every particle.
///
/// A particle also acts on itself, so the interaction must return zero for a particle paired with
/// itself, as [`Gravity`](crate::gravity::Gravity) does for coincident positions.
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForce<T>(pub T);

impl<P, U, T> Interaction<Between<&P, &[P]>> for BruteForce<T>
where
    U: Add<Output = U> + Default,
    T: for<'a> Interaction<Between<&'a P, &'a P>, Output = U>,
{
    type Output = U;

    #[inline]
    fn compute(&mut self, Between(affected, particles): Between<&P, &[P]>) -> Self::Output {
        particles.iter().fold(U::default(), |total, other| {
            total + self.0.compute(Between(affected, other))
        })
    }
}

impl<'a, P, T> Interaction<&'a [P]> for BruteForce<T>
where
    T: Clone,
{
    type Output = Interactions<'a, T, P>;

    #[inline]
    fn compute(&mut self, particles: &'a [P]) -> Self::Output {
        Interactions {
            algorithm: self.clone(),
            affected: particles.iter(),
            particles,
        }
    }
}

/// An interaction that computes both sides of a pair at once, used by [`BruteForcePairs`].
pub trait InteractionPair<P> {
    /// Result for one side of the pair.
    type Output;

    /// Results for the first and the second particle. The particles are distinct.
    fn compute_pair(&mut self, pair: Between<P, P>) -> (Self::Output, Self::Output);
}

/// Accumulates an [`InteractionPair`] over every pair `(i, j)` with `i < j`.
///
/// Results land in a buffer with one slot per particle, which is complete before it is returned,
/// so the caller sees every acceleration computed from the same positions.
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForcePairs<T>(pub T);

impl<P, U, T> Interaction<&[P]> for BruteForcePairs<T>
where
    U: AddAssign + Default,
    T: for<'a> InteractionPair<&'a P, Output = U>,
{
    type Output = std::vec::IntoIter<U>;

    fn compute(&mut self, particles: &[P]) -> Self::Output {
        let mut totals: Vec<U> = particles.iter().map(|_| U::default()).collect();

        for (i, first) in particles.iter().enumerate() {
            let mut total = U::default();

            for (j, second) in particles.iter().enumerate().skip(i + 1) {
                let (on_first, on_second) = self.0.compute_pair(Between(first, second));
                total += on_first;
                totals[j] += on_second;
            }

            totals[i] += total;
        }

        totals.into_iter()
    }
}
