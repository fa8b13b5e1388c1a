//! Convex regions given by per-dimension bounds.
//!
//! A [`Zone`] of dimension `k` is the conjunction of `k` interval constraints, one per coordinate
//! of a [`Point`]. The robustness of a point with respect to a zone is the minimum over every
//! dimension of the signed slack `min(p - lower, upper - p)`, so positive values indicate that the
//! point is strictly inside the zone and negative values give the distance to the nearest violated
//! face.
//!
//! Open and closed bounds only affect [`Zone::contains`]; the numeric robustness of a point lying
//! exactly on an open face is zero even though the point is not contained by the zone.
//!
//! # Examples
//!
//! ```rust
//! use robust_tre::bound::ZoneBound;
//! use robust_tre::rational::integer;
//! use robust_tre::zone::{Point, Zone};
//! use robust_tre::Robustness;
//!
//! let zone = Zone::make([
//!     ZoneBound::lower(integer(0), true),
//!     ZoneBound::upper(integer(4), false),
//!     ZoneBound::lower(integer(1), true),
//!     ZoneBound::upper(integer(3), true),
//! ]).unwrap();
//!
//! let inside = Point::from([integer(1), integer(2)]);
//! let on_open_face = Point::from([integer(4), integer(2)]);
//!
//! assert_eq!(zone.robustness(&inside).unwrap(), Robustness::Finite(integer(1)));
//! assert_eq!(zone.robustness(&on_open_face).unwrap(), Robustness::Finite(integer(0)));
//! assert!(!zone.contains(&on_open_face).unwrap());
//! ```

use std::fmt::{Display, Formatter};
use std::ops::Index;

use nonempty::NonEmpty;
use num_traits::{Signed, Zero};
use thiserror::Error;

use crate::bound::{Bound, Role, ZoneBound};
use crate::metrics::{Meet, Robustness, Top};
use crate::rational::Rational;

/// Error produced when a zone cannot be built from a sequence of bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    #[error("Zone requires an even number of bounds, got {0}")]
    OddArity(usize),

    #[error("Expected a {expected} bound at position {position}")]
    RoleMismatch { position: usize, expected: Role },

    #[error("Zone requires at least one dimension")]
    Empty,
}

/// Error produced when a point or zone does not have the expected number of dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Expected dimension {expected}, got {found}")]
pub struct DimensionMismatch {
    pub expected: usize,
    pub found: usize,
}

impl DimensionMismatch {
    pub(crate) fn check(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self { expected, found })
        }
    }
}

/// Query coordinates, one exact rational per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Point(Vec<Rational>);

impl Point {
    pub fn new(coordinates: Vec<Rational>) -> Self {
        Self(coordinates)
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn coordinates(&self) -> &[Rational] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rational> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Rational> {
        self.0.get(index)
    }

    /// Replace a single coordinate, returning the previous value.
    ///
    /// Returns [`None`] and leaves the point unchanged if the index is out of range.
    pub fn set(&mut self, index: usize, value: Rational) -> Option<Rational> {
        self.0
            .get_mut(index)
            .map(|coordinate| std::mem::replace(coordinate, value))
    }
}

impl From<Vec<Rational>> for Point {
    fn from(coordinates: Vec<Rational>) -> Self {
        Self(coordinates)
    }
}

impl<const N: usize> From<[Rational; N]> for Point {
    fn from(coordinates: [Rational; N]) -> Self {
        Self(Vec::from(coordinates))
    }
}

impl FromIterator<Rational> for Point {
    fn from_iter<I: IntoIterator<Item = Rational>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for Point {
    type Output = Rational;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, coordinate) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", coordinate)?;
        }
        write!(f, ")")
    }
}

/// The constraint of a zone on a single dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    pub fn new(lower: Bound, upper: Bound) -> Self {
        Self { lower, upper }
    }

    /// Interval including both of its endpoints.
    pub fn closed(lower: Rational, upper: Rational) -> Self {
        Self::new(Bound::closed(lower), Bound::closed(upper))
    }

    /// Check if the interval contains no values.
    ///
    /// An interval is empty if its lower value exceeds its upper value, or if the values are equal
    /// and either side is open.
    pub fn is_empty(&self) -> bool {
        match self.lower.value.cmp(&self.upper.value) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Equal => !(self.lower.closed && self.upper.closed),
            std::cmp::Ordering::Less => false,
        }
    }

    pub fn contains(&self, value: &Rational) -> bool {
        self.lower.admits_above(value) && self.upper.admits_below(value)
    }

    /// Signed distance of `value` from the nearest endpoint, positive inside the interval.
    pub fn slack(&self, value: &Rational) -> Rational {
        let from_lower = value - &self.lower.value;
        let from_upper = &self.upper.value - value;

        if from_lower < from_upper {
            from_lower
        } else {
            from_upper
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            lower: self.lower.tighter_lower(&other.lower).clone(),
            upper: self.upper.tighter_upper(&other.upper).clone(),
        }
    }

    /// Check if every value of `other` is also a value of this interval.
    pub fn includes(&self, other: &Self) -> bool {
        other.is_empty()
            || (self.lower.cmp_as_lower(&other.lower).is_ge()
                && self.upper.cmp_as_upper(&other.upper).is_ge())
    }

    /// Move both endpoints inward by `amount`, keeping their closedness.
    pub fn erode(&self, amount: &Rational) -> Self {
        Self {
            lower: self.lower.shift(amount),
            upper: self.upper.shift(&-amount),
        }
    }

    /// Move both endpoints by `amount`.
    pub fn shift(&self, amount: &Rational) -> Self {
        Self {
            lower: self.lower.shift(amount),
            upper: self.upper.shift(amount),
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let opening = if self.lower.closed { '[' } else { '(' };
        let closing = if self.upper.closed { ']' } else { ')' };

        write!(f, "{}{}, {}{}", opening, self.lower.value, self.upper.value, closing)
    }
}

/// A convex region of fixed dimension.
///
/// See the [`zone`](self) module for the semantics of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zone {
    intervals: NonEmpty<Interval>,
}

impl Zone {
    /// Build a zone from a sequence of `2k` bounds.
    ///
    /// Consecutive bounds are paired in input order into `k` constraints. The first bound of each
    /// pair must be a [`ZoneBound::Lower`] and the second a [`ZoneBound::Upper`]. A zone whose
    /// bounds cross is valid and simply empty.
    pub fn make<I>(bounds: I) -> Result<Self, ZoneError>
    where
        I: IntoIterator<Item = ZoneBound>,
    {
        let bounds: Vec<ZoneBound> = bounds.into_iter().collect();

        if bounds.len() % 2 != 0 {
            return Err(ZoneError::OddArity(bounds.len()));
        }

        let mut intervals = Vec::with_capacity(bounds.len() / 2);
        let mut bounds = bounds.into_iter().enumerate();

        while let Some((position, lower)) = bounds.next() {
            let lower = match lower {
                ZoneBound::Lower(bound) => bound,
                ZoneBound::Upper(_) => {
                    return Err(ZoneError::RoleMismatch { position, expected: Role::Lower })
                }
            };

            let upper = match bounds.next() {
                Some((_, ZoneBound::Upper(bound))) => bound,
                Some((position, ZoneBound::Lower(_))) => {
                    return Err(ZoneError::RoleMismatch { position, expected: Role::Upper })
                }
                None => return Err(ZoneError::OddArity(2 * intervals.len() + 1)),
            };

            intervals.push(Interval::new(lower, upper));
        }

        Self::from_intervals(intervals)
    }

    /// Build a zone from one interval per dimension.
    pub fn from_intervals<I>(intervals: I) -> Result<Self, ZoneError>
    where
        I: IntoIterator<Item = Interval>,
    {
        NonEmpty::from_vec(intervals.into_iter().collect())
            .map(|intervals| Self { intervals })
            .ok_or(ZoneError::Empty)
    }

    /// One-dimensional zone `[lower, upper]`.
    pub fn period(lower: Rational, upper: Rational) -> Self {
        Self {
            intervals: NonEmpty::new(Interval::closed(lower, upper)),
        }
    }

    pub fn dimension(&self) -> usize {
        self.intervals.len()
    }

    pub fn intervals(&self) -> impl Iterator<Item = &Interval> {
        self.intervals.iter()
    }

    /// Constraint on the first dimension.
    pub fn first(&self) -> &Interval {
        self.intervals.first()
    }

    pub fn interval(&self, dimension: usize) -> Option<&Interval> {
        self.intervals.get(dimension)
    }

    /// Check if the zone contains no points.
    pub fn is_empty(&self) -> bool {
        self.intervals.iter().any(Interval::is_empty)
    }

    /// Check if the point satisfies every bound of the zone, respecting closedness.
    pub fn contains(&self, point: &Point) -> Result<bool, DimensionMismatch> {
        DimensionMismatch::check(self.dimension(), point.dimension())?;
        Ok(self.contains_coordinates(point.coordinates()))
    }

    /// Signed robustness of a point, or negative infinity if the zone is empty.
    pub fn robustness(&self, point: &Point) -> Result<Robustness, DimensionMismatch> {
        DimensionMismatch::check(self.dimension(), point.dimension())?;
        Ok(self.robustness_at(point.coordinates()))
    }

    pub(crate) fn contains_coordinates(&self, coordinates: &[Rational]) -> bool {
        !self.is_empty()
            && self
                .intervals
                .iter()
                .zip(coordinates)
                .all(|(interval, value)| interval.contains(value))
    }

    pub(crate) fn robustness_at(&self, coordinates: &[Rational]) -> Robustness {
        if self.is_empty() {
            return Robustness::NegInfinity;
        }

        self.intervals
            .iter()
            .zip(coordinates)
            .map(|(interval, value)| Robustness::Finite(interval.slack(value)))
            .fold(Robustness::top(), |acc, rob| Meet::min(&acc, &rob))
    }

    /// Zone containing the points of both zones. The result may be empty.
    pub fn intersection(&self, other: &Self) -> Result<Self, DimensionMismatch> {
        DimensionMismatch::check(self.dimension(), other.dimension())?;

        let head = self.intervals.head.intersection(&other.intervals.head);
        let tail = self
            .intervals
            .tail
            .iter()
            .zip(&other.intervals.tail)
            .map(|(left, right)| left.intersection(right))
            .collect();

        Ok(Self { intervals: NonEmpty { head, tail } })
    }

    /// Check if every point of `other` is also a point of this zone.
    ///
    /// Empty zones are included in every zone. Zones of different dimensions never include each
    /// other.
    pub fn includes(&self, other: &Self) -> bool {
        if self.dimension() != other.dimension() {
            return false;
        }

        if other.is_empty() {
            return true;
        }

        self.intervals
            .iter()
            .zip(other.intervals.iter())
            .all(|(outer, inner)| outer.includes(inner))
    }

    /// Shrink every dimension by `amount`, returning [`None`] if nothing remains.
    pub fn erode(&self, amount: &Rational) -> Option<Self> {
        let head = self.intervals.head.erode(amount);
        let tail = self.intervals.tail.iter().map(|interval| interval.erode(amount)).collect();
        let eroded = Self { intervals: NonEmpty { head, tail } };

        if eroded.is_empty() {
            None
        } else {
            Some(eroded)
        }
    }

    /// Distance from the point to the zone along the nearest violated face, or zero if the point
    /// satisfies every constraint numerically.
    pub fn distance(&self, point: &Point) -> Result<Robustness, DimensionMismatch> {
        self.robustness(point).map(|rob| match rob {
            Robustness::Finite(value) if value.is_negative() => Robustness::Finite(-value),
            Robustness::Finite(_) => Robustness::Finite(Rational::zero()),
            Robustness::NegInfinity => Robustness::PosInfinity,
            Robustness::PosInfinity => Robustness::Finite(Rational::zero()),
        })
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", interval)?;
        }

        Ok(())
    }
}
