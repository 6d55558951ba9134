use crate::{sequential, Interaction};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::ops::Add;

/// Multi-threaded accelerations over a slice of particles.
pub trait ParallelCompute<T>: Sized {
    /// Same results as [`brute_force`](crate::sequential::SequentialCompute::brute_force),
    /// collected into a `Vec` in slice order.
    ///
    /// This is what [`Simulation::par_step`](crate::Simulation::par_step) uses.
    #[inline]
    fn par_brute_force(self, interaction: T) -> <BruteForce<T> as Interaction<Self>>::Output
    where
        BruteForce<T>: Interaction<Self>,
    {
        BruteForce(interaction).compute(self)
    }
}

impl<T, P> ParallelCompute<T> for &[P] {}

/// Accumulates the interaction of every particle on every particle using rayon.
///
/// Each particle gets its own task, which only reads the shared slice and writes its own result,
/// so no pair is shared between threads. Within a task the sum runs sequentially.
#[derive(Clone, Copy, Default, Debug)]
pub struct BruteForce<T>(pub T);

impl<P, U, T> Interaction<&[P]> for BruteForce<T>
where
    P: Sync,
    U: Add<Output = U> + Default + Send,
    T: for<'a> Interaction<crate::Between<&'a P, &'a P>, Output = U> + Clone + Send + Sync,
{
    type Output = Vec<U>;

    #[inline]
    fn compute(&mut self, particles: &[P]) -> Self::Output {
        particles
            .par_iter()
            .map_with(sequential::BruteForce(self.0.clone()), |inner, particle| {
                inner.compute(crate::Between(particle, particles))
            })
            .collect()
    }
}
