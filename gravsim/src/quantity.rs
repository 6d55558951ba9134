use crate::{
    error::{Error, Result},
    units::{Dimensionless, Product, Quotient, Reciprocal, Unit, UnitDiv, UnitInv, UnitMul},
};
use std::{
    cmp::Ordering,
    fmt,
    iter::Sum,
    marker::PhantomData,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Scalar value tagged with the unit `U`.
///
/// Quantities of the same unit can be added, subtracted and compared. Multiplying or dividing two
/// quantities composes their units, and scaling by a bare `f64` keeps the unit unchanged.
///
/// ```
/// use gravsim::{units::{Length, Speed, Time}, Quantity};
///
/// let speed = Quantity::<Speed>::new(3.0);
/// let time = Quantity::<Time>::new(2.0);
/// let length: Quantity<Length> = speed * time;
///
/// assert_eq!(length.value(), 6.0);
/// assert_eq!(length.to_string(), "6 m");
/// ```
///
/// Adding quantities of different units does not compile:
///
/// ```compile_fail
/// use gravsim::{units::{Length, Time}, Quantity};
///
/// let length = Quantity::<Length>::new(1.0);
/// let time = Quantity::<Time>::new(1.0);
/// let _ = length + time;
/// ```
#[repr(transparent)]
pub struct Quantity<U> {
    value: f64,
    unit: PhantomData<U>,
}

impl<U> Quantity<U> {
    /// Zero of unit `U`.
    pub const ZERO: Self = Self::new(0.0);

    /// Creates a new [`Quantity`] with the given value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// Returns the raw value, expressed in SI base units.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// Returns `true` if the value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }

    /// Total ordering between two quantities of the same unit, see [`f64::total_cmp`].
    #[inline]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }

    /// Returns the reciprocal quantity.
    ///
    /// Follows IEEE semantics: the reciprocal of zero is infinite. Use
    /// [`checked_recip`](Self::checked_recip) to reject zero instead.
    #[inline]
    pub fn recip(self) -> Quantity<Reciprocal<U>>
    where
        U: UnitInv,
    {
        Quantity::new(self.value.recip())
    }

    /// Returns the reciprocal quantity, or [`Error::DivisionByZero`] if the value is exactly zero.
    #[inline]
    pub fn checked_recip(self) -> Result<Quantity<Reciprocal<U>>>
    where
        U: UnitInv,
    {
        if self.value == 0.0 {
            return Err(Error::DivisionByZero);
        }

        Ok(self.recip())
    }
}

impl From<f64> for Quantity<Dimensionless> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Quantity<Dimensionless>> for f64 {
    #[inline]
    fn from(quantity: Quantity<Dimensionless>) -> Self {
        quantity.value
    }
}

// Manual implementations so that `U` does not need to implement these traits.

impl<U> Clone for Quantity<U> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Quantity<U> {}

impl<U> Default for Quantity<U> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<U> PartialEq for Quantity<U> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<U> PartialOrd for Quantity<U> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

pub(crate) fn write_symbol<U: Unit>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match U::symbol() {
        symbol if symbol.is_empty() => Ok(()),
        symbol => write!(f, " {symbol}"),
    }
}

impl<U: Unit> fmt::Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)?;
        write_symbol::<U>(f)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        write_symbol::<U>(f)
    }
}

impl<U: Unit> fmt::LowerExp for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerExp::fmt(&self.value, f)?;
        write_symbol::<U>(f)
    }
}

impl<U> Add for Quantity<U> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

impl<U> AddAssign for Quantity<U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<U> Sub for Quantity<U> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}

impl<U> SubAssign for Quantity<U> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<U> Neg for Quantity<U> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

impl<U> Mul<f64> for Quantity<U> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.value * rhs)
    }
}

impl<U> Mul<Quantity<U>> for f64 {
    type Output = Quantity<U>;

    #[inline]
    fn mul(self, rhs: Quantity<U>) -> Quantity<U> {
        Quantity::new(self * rhs.value)
    }
}

impl<U> MulAssign<f64> for Quantity<U> {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.value *= rhs;
    }
}

impl<U> Div<f64> for Quantity<U> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::new(self.value / rhs)
    }
}

impl<U> DivAssign<f64> for Quantity<U> {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.value /= rhs;
    }
}

impl<U, V> Mul<Quantity<V>> for Quantity<U>
where
    U: UnitMul<V>,
{
    type Output = Quantity<Product<U, V>>;

    #[inline]
    fn mul(self, rhs: Quantity<V>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<U, V> Div<Quantity<V>> for Quantity<U>
where
    U: UnitDiv<V>,
{
    type Output = Quantity<Quotient<U, V>>;

    #[inline]
    fn div(self, rhs: Quantity<V>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

impl<U> Sum for Quantity<U> {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a, U> Sum<&'a Quantity<U>> for Quantity<U> {
    #[inline]
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(feature = "serde")]
impl<U> serde::Serialize for Quantity<U> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

#[cfg(feature = "serde")]
impl<'de, U> serde::Deserialize<'de> for Quantity<U> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <f64 as serde::Deserialize>::deserialize(deserializer).map(Self::new)
    }
}
