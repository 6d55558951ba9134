use std::marker::PhantomData;
use std::ops::{Add, Neg, Sub};
use typenum::{Integer, N1, N2, P1, P2, P3, Z0};

/// Unit tag made of the exponents of length, time and mass, in that order.
///
/// The exponents are [`typenum`] integers, which are normalised: `Dim<P1, N1, P1>` is reached
/// whether a momentum is built as `velocity * mass` or as `mass * velocity`. Two tags are
/// compatible for addition only if they are the same type.
///
/// `Dim` is never constructed, it only tags [`Quantity`](crate::Quantity) and
/// [`Vector3`](crate::Vector3).
pub struct Dim<L, T, M> {
    _marker: PhantomData<(L, T, M)>,
}

/// Trait implemented by every unit tag.
pub trait Unit {
    /// Returns the exponents of length, time and mass.
    fn exponents() -> [i32; 3];

    /// Returns a human readable symbol using SI base units, e.g. `kg m^2 s^-2`.
    ///
    /// Dimensionless tags return an empty string.
    fn symbol() -> String {
        let [length, time, mass] = Self::exponents();

        [("kg", mass), ("m", length), ("s", time)]
            .into_iter()
            .filter(|&(_, exponent)| exponent != 0)
            .map(|(base, exponent)| match exponent {
                1 => base.to_owned(),
                _ => format!("{base}^{exponent}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<L: Integer, T: Integer, M: Integer> Unit for Dim<L, T, M> {
    #[inline]
    fn exponents() -> [i32; 3] {
        [L::to_i32(), T::to_i32(), M::to_i32()]
    }
}

/// Unit resulting from the product of two units.
pub trait UnitMul<Rhs> {
    /// The product unit.
    type Output;
}

/// Unit resulting from the quotient of two units.
pub trait UnitDiv<Rhs> {
    /// The quotient unit.
    type Output;
}

/// Reciprocal of a unit.
pub trait UnitInv {
    /// The reciprocal unit.
    type Output;
}

impl<L1, T1, M1, L2, T2, M2> UnitMul<Dim<L2, T2, M2>> for Dim<L1, T1, M1>
where
    L1: Add<L2>,
    T1: Add<T2>,
    M1: Add<M2>,
{
    type Output = Dim<<L1 as Add<L2>>::Output, <T1 as Add<T2>>::Output, <M1 as Add<M2>>::Output>;
}

impl<L1, T1, M1, L2, T2, M2> UnitDiv<Dim<L2, T2, M2>> for Dim<L1, T1, M1>
where
    L1: Sub<L2>,
    T1: Sub<T2>,
    M1: Sub<M2>,
{
    type Output = Dim<<L1 as Sub<L2>>::Output, <T1 as Sub<T2>>::Output, <M1 as Sub<M2>>::Output>;
}

impl<L: Neg, T: Neg, M: Neg> UnitInv for Dim<L, T, M> {
    type Output = Dim<<L as Neg>::Output, <T as Neg>::Output, <M as Neg>::Output>;
}

/// Product of the units `A` and `B`.
pub type Product<A, B> = <A as UnitMul<B>>::Output;

/// Quotient of the units `A` and `B`.
pub type Quotient<A, B> = <A as UnitDiv<B>>::Output;

/// Reciprocal of the unit `A`.
pub type Reciprocal<A> = <A as UnitInv>::Output;

/// No dimension.
pub type Dimensionless = Dim<Z0, Z0, Z0>;
/// Metre.
pub type Length = Dim<P1, Z0, Z0>;
/// Second.
pub type Time = Dim<Z0, P1, Z0>;
/// Kilogram.
pub type Mass = Dim<Z0, Z0, P1>;
/// Square metre.
pub type Area = Dim<P2, Z0, Z0>;
/// Metre per second.
pub type Speed = Dim<P1, N1, Z0>;
/// Metre per second squared.
pub type Acceleration = Dim<P1, N2, Z0>;
/// Kilogram metre per second.
pub type Momentum = Dim<P1, N1, P1>;
/// Kilogram square metre per second.
pub type AngularMomentum = Dim<P2, N1, P1>;
/// Joule.
pub type Energy = Dim<P2, N2, P1>;
/// Cubic metre per kilogram per second squared, the unit of `G`.
pub type GravitationalConstant = Dim<P3, N2, N1>;
/// Cubic metre per second squared, the unit of `µ = G * m`.
pub type GravitationalParameter = Dim<P3, N2, Z0>;
