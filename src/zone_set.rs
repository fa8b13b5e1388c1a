//! Unions of zones sharing a common dimension.
//!
//! A [`ZoneSet`] is the declarative representation of every matching time assignment: a point
//! matches if it is contained by any member zone. Robustness follows the semantics of a
//! disjunction, so the robustness of a point is the maximum over the member zones. When the point
//! lies outside every zone, the closest zone dominates and the value reports the distance to the
//! nearest matching region.
//!
//! Zone sets are immutable once built. They are assembled with a [`ZoneSetBuilder`], which fixes
//! the dimension of the set when the first zone is added and rejects zones of any other dimension
//! afterwards. Empty zones fix the dimension in the same way but are not stored.
//!
//! # Examples
//!
//! ```rust
//! use robust_tre::rational::integer;
//! use robust_tre::zone::Point;
//! use robust_tre::{Robustness, ZoneSet};
//!
//! let zones = ZoneSet::from_periods([
//!     (integer(0), integer(2)),
//!     (integer(5), integer(8)),
//! ]).unwrap();
//!
//! let between = Point::from([integer(3)]);
//!
//! assert_eq!(zones.robustness(&between).unwrap(), Robustness::Finite(integer(-1)));
//! assert!(!zones.contains(&between).unwrap());
//! ```

use std::fmt::{Display, Formatter};

use log::{debug, trace};
use thiserror::Error;

use crate::bound::{Bound, ZoneBound};
use crate::metrics::{Bottom, Join, Robustness};
use crate::rational::Rational;
use crate::timed::{self, Anchor};
use crate::zone::{DimensionMismatch, Interval, Point, Zone, ZoneError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneSetError {
    #[error("Zone dimension mismatch: {0}")]
    DimensionMismatch(#[from] DimensionMismatch),

    #[error("Invalid interval: lower bound {lower} is greater than upper bound {upper}")]
    InvalidInterval { lower: Rational, upper: Rational },

    #[error("Malformed zone: {0}")]
    Zone(#[from] ZoneError),
}

/// A union of zones of identical dimension.
///
/// See the [`zone_set`](self) module for the semantics of this type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneSet {
    dimension: Option<usize>,
    zones: Vec<Zone>,
}

impl ZoneSet {
    /// Create a zone set containing no zones.
    ///
    /// The robustness of every point with respect to an empty set is negative infinity.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ZoneSetBuilder {
        ZoneSetBuilder::new()
    }

    /// Build a set from a collection of zones.
    pub fn from_zones<I>(zones: I) -> Result<Self, ZoneSetError>
    where
        I: IntoIterator<Item = Zone>,
    {
        let mut builder = ZoneSetBuilder::new();

        for zone in zones {
            builder.add(zone)?;
        }

        Ok(builder.build())
    }

    /// Build a one-dimensional set with a closed zone `[lower, upper]` for each pair.
    pub fn from_periods<I>(periods: I) -> Result<Self, ZoneSetError>
    where
        I: IntoIterator<Item = (Rational, Rational)>,
    {
        let mut builder = ZoneSetBuilder::new();

        for (lower, upper) in periods {
            builder.add_from_period(lower, upper)?;
        }

        Ok(builder.build())
    }

    /// The dimension shared by every zone, or [`None`] if no zone has been added.
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub(crate) fn check_point(&self, point: &Point) -> Result<(), DimensionMismatch> {
        match self.dimension {
            Some(dimension) => DimensionMismatch::check(dimension, point.dimension()),
            None => Ok(()),
        }
    }

    /// Check if any member zone contains the point.
    pub fn contains(&self, point: &Point) -> Result<bool, DimensionMismatch> {
        self.check_point(point)?;

        let coordinates = point.coordinates();
        Ok(self.zones.iter().any(|zone| zone.contains_coordinates(coordinates)))
    }

    /// Robustness of the point with respect to the union, the maximum over the member zones.
    pub fn robustness(&self, point: &Point) -> Result<Robustness, DimensionMismatch> {
        self.check_point(point)?;
        Ok(self.robustness_at(point.coordinates()))
    }

    pub(crate) fn robustness_at(&self, coordinates: &[Rational]) -> Robustness {
        self.zones
            .iter()
            .map(|zone| zone.robustness_at(coordinates))
            .fold(Robustness::bottom(), |acc, rob| Join::max(&acc, &rob))
    }

    /// Set containing the zones of both sets.
    pub fn union(&self, other: &Self) -> Result<Self, DimensionMismatch> {
        let dimension = match (self.dimension, other.dimension) {
            (Some(left), Some(right)) => {
                DimensionMismatch::check(left, right)?;
                Some(left)
            }
            (left, right) => left.or(right),
        };

        let zones = self.zones.iter().chain(&other.zones).cloned().collect();

        Ok(Self { dimension, zones })
    }

    /// Set containing the points common to both sets.
    ///
    /// Zones are intersected pairwise, empty results are dropped and the remaining zones are
    /// simplified.
    pub fn intersection(&self, other: &Self) -> Result<Self, DimensionMismatch> {
        let dimension = match (self.dimension, other.dimension) {
            (Some(left), Some(right)) => {
                DimensionMismatch::check(left, right)?;
                Some(left)
            }
            (left, right) => left.or(right),
        };

        let mut zones = Vec::new();

        for left in &self.zones {
            for right in &other.zones {
                let zone = left.intersection(right)?;

                if !zone.is_empty() {
                    zones.push(zone);
                }
            }
        }

        trace!("intersected {} and {} zones into {}", self.zones.len(), other.zones.len(), zones.len());

        Ok(Self { dimension, zones }.simplify())
    }

    /// Check if every zone of `other` is included in some zone of this set.
    ///
    /// This is a sufficient condition for the union of `other` to be a subset of this union, but
    /// not a necessary one: a zone covered only by several zones of this set together is not
    /// detected.
    pub fn includes(&self, other: &Self) -> bool {
        other
            .zones
            .iter()
            .all(|inner| self.zones.iter().any(|outer| outer.includes(inner)))
    }

    /// Remove every zone included in another member zone.
    ///
    /// The union, and therefore the robustness of every point, is unchanged. The remaining zones
    /// are ordered by the lower bound of their first dimension.
    pub fn simplify(&self) -> Self {
        let mut kept: Vec<Zone> = Vec::with_capacity(self.zones.len());

        for zone in &self.zones {
            if kept.iter().any(|other| other.includes(zone)) {
                continue;
            }

            kept.retain(|other| !zone.includes(other));
            kept.push(zone.clone());
        }

        kept.sort_by(|left, right| left.first().lower.cmp_as_lower(&right.first().lower).reverse());

        debug!("simplified zone set from {} to {} zones", self.zones.len(), kept.len());

        Self {
            dimension: self.dimension,
            zones: kept,
        }
    }

    pub(crate) fn from_parts(dimension: Option<usize>, zones: Vec<Zone>) -> Self {
        Self { dimension, zones }
    }
}

impl<'a> IntoIterator for &'a ZoneSet {
    type Item = &'a Zone;
    type IntoIter = std::slice::Iter<'a, Zone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

impl Display for ZoneSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, zone) in self.zones.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, " {}", zone)?;
        }
        write!(f, " }}")
    }
}

/// Incremental constructor for [`ZoneSet`]s.
///
/// ```rust
/// use robust_tre::rational::integer;
/// use robust_tre::ZoneSetBuilder;
///
/// let mut builder = ZoneSetBuilder::new();
/// builder.add_from_period(integer(0), integer(10)).unwrap();
/// builder.add_from_period(integer(10), integer(15)).unwrap();
///
/// let zones = builder.build();
/// assert_eq!(zones.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ZoneSetBuilder {
    dimension: Option<usize>,
    zones: Vec<Zone>,
}

impl ZoneSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone to the set.
    ///
    /// Fails if the set already has a dimension which differs from the dimension of the zone. An
    /// empty zone fixes the dimension of the set but is not stored.
    pub fn add(&mut self, zone: Zone) -> Result<&mut Self, ZoneSetError> {
        if let Some(dimension) = self.dimension {
            DimensionMismatch::check(dimension, zone.dimension())?;
        }

        self.dimension = Some(zone.dimension());

        if zone.is_empty() {
            trace!("skipping empty zone {}", zone);
            return Ok(self);
        }

        self.zones.push(zone);

        Ok(self)
    }

    /// Build a zone from a sequence of bounds and add it to the set.
    pub fn add_bounds<I>(&mut self, bounds: I) -> Result<&mut Self, ZoneSetError>
    where
        I: IntoIterator<Item = ZoneBound>,
    {
        let zone = Zone::make(bounds)?;
        self.add(zone)
    }

    /// Add the one-dimensional zone `[lower, upper]`.
    pub fn add_from_period(&mut self, lower: Rational, upper: Rational) -> Result<&mut Self, ZoneSetError> {
        self.add_period(Bound::closed(lower), Bound::closed(upper))
    }

    /// Add a one-dimensional zone with explicit closedness on each side.
    pub fn add_period(&mut self, lower: Bound, upper: Bound) -> Result<&mut Self, ZoneSetError> {
        if lower.value > upper.value {
            return Err(ZoneSetError::InvalidInterval {
                lower: lower.value,
                upper: upper.value,
            });
        }

        self.add(Zone::from_intervals([Interval::new(lower, upper)])?)
    }

    /// Add the `(begin, end, duration)` zone of a period with the given anchoring.
    ///
    /// See [`timed::period`] for the shape of the resulting zone.
    pub fn add_timed_period(&mut self, begin: Rational, end: Rational, anchor: Anchor) -> Result<&mut Self, ZoneSetError> {
        let zone = timed::period(begin, end, anchor)?;
        self.add(zone)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn build(self) -> ZoneSet {
        debug!("built zone set with {} zones of dimension {:?}", self.zones.len(), self.dimension);

        ZoneSet {
            dimension: self.dimension,
            zones: self.zones,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{ZoneSet, ZoneSetBuilder, ZoneSetError};
    use crate::bound::{Bound, ZoneBound};
    use crate::metrics::Robustness;
    use crate::rational::{integer, ratio};
    use crate::zone::{DimensionMismatch, Interval, Point, Zone};

    fn point<const N: usize>(values: [i64; N]) -> Point {
        values.into_iter().map(integer).collect()
    }

    fn finite(value: i64) -> Robustness {
        Robustness::Finite(integer(value))
    }

    #[test]
    fn union_max_law() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::from_periods([(integer(0), integer(2)), (integer(5), integer(8))])?;

        assert_eq!(zones.robustness(&point([3]))?, finite(-1));
        assert_eq!(zones.robustness(&point([4]))?, finite(-1));
        assert_eq!(zones.robustness(&point([6]))?, finite(1));
        assert_eq!(zones.robustness(&point([1]))?, finite(1));
        assert_eq!(zones.robustness(&point([-4]))?, finite(-4));

        Ok(())
    }

    #[test]
    fn empty_set_is_bottom() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::empty();

        assert_eq!(zones.robustness(&point([3]))?, Robustness::NegInfinity);
        assert_eq!(zones.robustness(&point([3, 4, 5]))?, Robustness::NegInfinity);
        assert!(!zones.contains(&point([3]))?);
        assert_eq!(zones.dimension(), None);

        Ok(())
    }

    #[test]
    fn period_endpoints_are_contained() -> Result<(), Box<dyn Error>> {
        let mut builder = ZoneSetBuilder::new();
        builder.add_from_period(integer(2), integer(5))?;
        let zones = builder.build();

        assert!(zones.contains(&point([2]))?);
        assert!(zones.contains(&point([5]))?);
        assert!(!zones.contains(&point([6]))?);

        Ok(())
    }

    #[test]
    fn explicit_openness() -> Result<(), Box<dyn Error>> {
        let mut builder = ZoneSetBuilder::new();
        builder.add_period(Bound::open(integer(2)), Bound::closed(integer(5)))?;
        let zones = builder.build();

        assert!(!zones.contains(&point([2]))?);
        assert!(zones.contains(&point([5]))?);
        assert_eq!(zones.robustness(&point([2]))?, finite(0));

        Ok(())
    }

    #[test]
    fn invalid_interval() {
        let result = ZoneSet::from_periods([(integer(5), integer(2))]);

        assert_eq!(
            result,
            Err(ZoneSetError::InvalidInterval {
                lower: integer(5),
                upper: integer(2)
            })
        );
    }

    #[test]
    fn dimension_is_fixed_by_first_zone() -> Result<(), Box<dyn Error>> {
        let mut builder = ZoneSetBuilder::new();
        builder.add_from_period(integer(0), integer(1))?;

        let wide = Zone::from_intervals([
            Interval::closed(integer(0), integer(1)),
            Interval::closed(integer(0), integer(1)),
        ])?;

        assert_eq!(
            builder.add(wide).err(),
            Some(ZoneSetError::DimensionMismatch(DimensionMismatch { expected: 1, found: 2 }))
        );

        let zones = builder.build();

        assert_eq!(zones.dimension(), Some(1));
        assert_eq!(
            zones.robustness(&point([0, 0])),
            Err(DimensionMismatch { expected: 1, found: 2 })
        );

        Ok(())
    }

    #[test]
    fn empty_zones_are_skipped() -> Result<(), Box<dyn Error>> {
        let mut builder = ZoneSetBuilder::new();
        builder.add_period(Bound::open(integer(3)), Bound::closed(integer(3)))?;

        assert!(builder.is_empty());

        let wide = builder.add_bounds([
            ZoneBound::lower(integer(0), true),
            ZoneBound::upper(integer(1), true),
            ZoneBound::lower(integer(0), true),
            ZoneBound::upper(integer(1), true),
        ]);

        assert!(matches!(
            wide,
            Err(ZoneSetError::DimensionMismatch(DimensionMismatch { expected: 1, found: 2 }))
        ));

        builder.add_from_period(integer(0), integer(1))?;

        assert_eq!(builder.len(), 1);
        assert_eq!(builder.build().dimension(), Some(1));

        Ok(())
    }

    #[test]
    fn empty_zones_fix_the_dimension() -> Result<(), Box<dyn Error>> {
        let empty = Zone::from_intervals([
            Interval::closed(integer(0), integer(1)),
            Interval::closed(integer(3), integer(2)),
        ])?;

        let mut builder = ZoneSetBuilder::new();
        builder.add(empty)?;

        assert_eq!(
            builder.add_from_period(integer(0), integer(1)).err(),
            Some(ZoneSetError::DimensionMismatch(DimensionMismatch { expected: 2, found: 1 }))
        );

        let zones = builder.build();

        assert!(zones.is_empty());
        assert_eq!(zones.dimension(), Some(2));
        assert_eq!(zones.robustness(&point([1])), Err(DimensionMismatch { expected: 2, found: 1 }));
        assert_eq!(zones.robustness(&point([0, 2]))?, Robustness::NegInfinity);

        Ok(())
    }

    #[test]
    fn intersection_of_sets() -> Result<(), Box<dyn Error>> {
        let left = ZoneSet::from_periods([(integer(0), integer(4)), (integer(6), integer(9))])?;
        let right = ZoneSet::from_periods([(integer(3), integer(7)), (integer(20), integer(30))])?;
        let common = left.intersection(&right)?;

        assert_eq!(common, ZoneSet::from_periods([(integer(3), integer(4)), (integer(6), integer(7))])?);
        assert!(!common.contains(&point([5]))?);
        assert!(common.contains(&point([7]))?);

        let apart = left.intersection(&ZoneSet::from_periods([(integer(10), integer(12))])?)?;

        assert!(apart.is_empty());
        assert_eq!(apart.dimension(), Some(1));
        assert_eq!(apart.robustness(&point([3]))?, Robustness::NegInfinity);

        assert_eq!(left.intersection(&ZoneSet::empty())?.dimension(), Some(1));

        let wide = ZoneSet::from_zones([Zone::from_intervals([
            Interval::closed(integer(0), integer(1)),
            Interval::closed(integer(0), integer(1)),
        ])?])?;

        assert_eq!(left.intersection(&wide), Err(DimensionMismatch { expected: 1, found: 2 }));

        Ok(())
    }

    #[test]
    fn union_and_inclusion() -> Result<(), Box<dyn Error>> {
        let left = ZoneSet::from_periods([(integer(0), integer(4))])?;
        let right = ZoneSet::from_periods([(integer(6), integer(9)), (integer(1), integer(2))])?;
        let both = left.union(&right)?;

        assert_eq!(both.len(), 3);
        assert!(both.includes(&left));
        assert!(both.includes(&right));
        assert!(!left.includes(&right));
        assert!(left.union(&ZoneSet::empty())? == left);

        let wide = ZoneSet::from_zones([Zone::from_intervals([
            Interval::closed(integer(0), integer(1)),
            Interval::closed(integer(0), integer(1)),
        ])?])?;

        assert_eq!(left.union(&wide), Err(DimensionMismatch { expected: 1, found: 2 }));

        Ok(())
    }

    #[test]
    fn simplify_preserves_union() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::from_periods([
            (integer(6), integer(9)),
            (integer(1), integer(2)),
            (integer(0), integer(4)),
            (integer(7), integer(8)),
        ])?;

        let simplified = zones.simplify();

        assert_eq!(simplified, ZoneSet::from_periods([(integer(0), integer(4)), (integer(6), integer(9))])?);

        for value in -2..12 {
            let p = point([value]);
            assert_eq!(zones.robustness(&p)?, simplified.robustness(&p)?);
        }

        Ok(())
    }

    #[test]
    fn display() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::from_periods([(integer(0), ratio(5, 2)?), (integer(3), integer(4))])?;

        assert_eq!(zones.to_string(), "{ [0, 5/2]; [3, 4] }");
        assert_eq!(ZoneSet::empty().to_string(), "{ }");

        Ok(())
    }
}
