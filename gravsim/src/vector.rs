use crate::{
    error::{Error, Result},
    quantity::{write_symbol, Quantity},
    units::{Dimensionless, Product, Quotient, Unit, UnitDiv, UnitMul},
};
use glam::DVec3;
use std::{
    fmt,
    iter::Sum,
    marker::PhantomData,
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Three dimensional vector whose components share the unit `U`.
///
/// The components are stored in a [`glam::DVec3`]. Operations between vectors of the same unit
/// are component-wise, while [`dot`](Vector3::dot), [`cross`](Vector3::cross) and scaling by a
/// [`Quantity`] compose units.
///
/// ```
/// use gravsim::{units::{Length, Mass, Momentum, Speed}, Quantity, Vector3};
///
/// let velocity = Vector3::<Speed>::new(1.0, 2.0, 2.0);
/// let momentum: Vector3<Momentum> = velocity * Quantity::<Mass>::new(2.0);
///
/// assert_eq!(velocity.magnitude().value(), 3.0);
/// assert_eq!(momentum, Vector3::new(2.0, 4.0, 4.0));
/// ```
#[repr(transparent)]
pub struct Vector3<U> {
    inner: DVec3,
    unit: PhantomData<U>,
}

impl<U> Vector3<U> {
    /// All components set to zero.
    pub const ZERO: Self = Self::from_dvec3(DVec3::ZERO);

    /// Creates a new vector from its components, expressed in SI base units.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    /// Tags an untyped [`DVec3`] with the unit `U`.
    #[inline]
    pub const fn from_dvec3(inner: DVec3) -> Self {
        Self {
            inner,
            unit: PhantomData,
        }
    }

    /// Returns the untyped components.
    #[inline]
    pub const fn to_dvec3(&self) -> DVec3 {
        self.inner
    }

    /// The `x` component.
    #[inline]
    pub fn x(&self) -> Quantity<U> {
        Quantity::new(self.inner.x)
    }

    /// The `y` component.
    #[inline]
    pub fn y(&self) -> Quantity<U> {
        Quantity::new(self.inner.y)
    }

    /// The `z` component.
    #[inline]
    pub fn z(&self) -> Quantity<U> {
        Quantity::new(self.inner.z)
    }

    /// Dot product. The unit of the result is the product of both units.
    #[inline]
    pub fn dot<V>(self, rhs: Vector3<V>) -> Quantity<Product<U, V>>
    where
        U: UnitMul<V>,
    {
        Quantity::new(self.inner.dot(rhs.inner))
    }

    /// Cross product. The unit of the result is the product of both units.
    #[inline]
    pub fn cross<V>(self, rhs: Vector3<V>) -> Vector3<Product<U, V>>
    where
        U: UnitMul<V>,
    {
        Vector3::from_dvec3(self.inner.cross(rhs.inner))
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn magnitude(self) -> Quantity<U> {
        Quantity::new(self.inner.length())
    }

    /// Squared Euclidean length of the vector.
    #[inline]
    pub fn magnitude_squared(self) -> Quantity<Product<U, U>>
    where
        U: UnitMul<U>,
    {
        self.dot(self)
    }

    /// Euclidean distance between two vectors.
    #[inline]
    pub fn distance(self, other: Self) -> Quantity<U> {
        (self - other).magnitude()
    }

    /// Dimensionless vector with the same direction and a magnitude of one.
    ///
    /// Normalising a zero vector yields NaN components. Use
    /// [`try_normalize`](Self::try_normalize) to reject it instead.
    #[inline]
    pub fn normalize(self) -> Vector3<Dimensionless> {
        Vector3::from_dvec3(self.inner / self.inner.length())
    }

    /// Same as [`normalize`](Self::normalize), but returns [`Error::ZeroMagnitude`] for a
    /// zero vector.
    #[inline]
    pub fn try_normalize(self) -> Result<Vector3<Dimensionless>> {
        match self.inner.length() {
            length if length == 0.0 => Err(Error::ZeroMagnitude),
            length => Ok(Vector3::from_dvec3(self.inner / length)),
        }
    }

    /// Returns `true` if all components are neither infinite nor NaN.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.inner.is_finite()
    }
}

impl<U> Clone for Vector3<U> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Vector3<U> {}

impl<U> Default for Vector3<U> {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl<U> PartialEq for Vector3<U> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<U: Unit> fmt::Debug for Vector3<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries([self.inner.x, self.inner.y, self.inner.z])
            .finish()?;
        write_symbol::<U>(f)
    }
}

impl<U: Unit> fmt::Display for Vector3<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.inner.x, self.inner.y, self.inner.z)?;
        write_symbol::<U>(f)
    }
}

impl<U: Unit> fmt::LowerExp for Vector3<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, component) in self.inner.to_array().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::LowerExp::fmt(component, f)?;
        }
        f.write_str("]")?;
        write_symbol::<U>(f)
    }
}

impl<U> Add for Vector3<U> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_dvec3(self.inner + rhs.inner)
    }
}

impl<U> AddAssign for Vector3<U> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.inner += rhs.inner;
    }
}

impl<U> Sub for Vector3<U> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_dvec3(self.inner - rhs.inner)
    }
}

impl<U> SubAssign for Vector3<U> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.inner -= rhs.inner;
    }
}

impl<U> Neg for Vector3<U> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_dvec3(-self.inner)
    }
}

impl<U> Mul<f64> for Vector3<U> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::from_dvec3(self.inner * rhs)
    }
}

impl<U> Mul<Vector3<U>> for f64 {
    type Output = Vector3<U>;

    #[inline]
    fn mul(self, rhs: Vector3<U>) -> Vector3<U> {
        Vector3::from_dvec3(self * rhs.inner)
    }
}

impl<U> MulAssign<f64> for Vector3<U> {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.inner *= rhs;
    }
}

impl<U> Div<f64> for Vector3<U> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::from_dvec3(self.inner / rhs)
    }
}

impl<U, V> Mul<Quantity<V>> for Vector3<U>
where
    U: UnitMul<V>,
{
    type Output = Vector3<Product<U, V>>;

    #[inline]
    fn mul(self, rhs: Quantity<V>) -> Self::Output {
        Vector3::from_dvec3(self.inner * rhs.value())
    }
}

impl<U, V> Div<Quantity<V>> for Vector3<U>
where
    U: UnitDiv<V>,
{
    type Output = Vector3<Quotient<U, V>>;

    #[inline]
    fn div(self, rhs: Quantity<V>) -> Self::Output {
        Vector3::from_dvec3(self.inner / rhs.value())
    }
}

impl<U> Sum for Vector3<U> {
    #[inline]
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a, U> Sum<&'a Vector3<U>> for Vector3<U> {
    #[inline]
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(feature = "serde")]
impl<U> serde::Serialize for Vector3<U> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.inner.to_array(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, U> serde::Deserialize<'de> for Vector3<U> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[f64; 3] as serde::Deserialize>::deserialize(deserializer)
            .map(|[x, y, z]| Self::new(x, y, z))
    }
}
