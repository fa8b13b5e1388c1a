//! Zones over `(begin, end, duration)` time assignments.
//!
//! The match set of a timed regular expression is a set of time periods, each described by the
//! instant it begins, the instant it ends and its duration. These are represented as
//! three-dimensional zones with the axes [`BEGIN`], [`END`] and [`DURATION`].
//!
//! A candidate match window `[l, u]` corresponds to the point `(l, u, u - l)`. Translating the
//! window by `t` moves the begin and end coordinates by `t` and leaves the duration unchanged,
//! which makes translation robustness a special case of the optimal oracle where the free
//! parameter drives the begin and end axes at an offset of `u - l` from each other.
//!
//! # Examples
//!
//! ```rust
//! use robust_tre::oracle::Scope;
//! use robust_tre::rational::integer;
//! use robust_tre::timed::{self, Anchor};
//! use robust_tre::ZoneSetBuilder;
//!
//! let mut builder = ZoneSetBuilder::new();
//! builder.add_timed_period(integer(0), integer(10), Anchor::None).unwrap();
//! let zones = builder.build();
//!
//! let scope = Scope::new(integer(0), integer(20)).unwrap();
//! let margins = timed::translation_margins(&zones, &integer(2), &integer(5), &scope)
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(margins.left, integer(2));
//! assert_eq!(margins.right, integer(5));
//! ```

use std::cmp::Ordering;

use log::debug;
use num_traits::Zero;

use crate::metrics::Robustness;
use crate::oracle::{self, FreeParameter, Optimum, OracleError, Scope};
use crate::rational::Rational;
use crate::zone::{Interval, Point, Zone};
use crate::zone_set::{ZoneSet, ZoneSetError};

/// Axis holding the instant a period begins.
pub const BEGIN: usize = 0;

/// Axis holding the instant a period ends.
pub const END: usize = 1;

/// Axis holding the duration of a period.
pub const DURATION: usize = 2;

/// Dimension of timed zones.
pub const DIMENSION: usize = 3;

/// Which endpoints of a period a match must coincide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Any sub-period matches.
    #[default]
    None,

    /// Matches begin when the period begins.
    Rise,

    /// Matches end when the period ends.
    Fall,

    /// Only the whole period matches.
    Both,
}

/// The zone of sub-periods of `[begin, end]` allowed by the anchoring.
pub fn period(begin: Rational, end: Rational, anchor: Anchor) -> Result<Zone, ZoneSetError> {
    if begin > end {
        return Err(ZoneSetError::InvalidInterval { lower: begin, upper: end });
    }

    let length = &end - &begin;

    let begins = match anchor {
        Anchor::Rise | Anchor::Both => Interval::closed(begin.clone(), begin.clone()),
        Anchor::None | Anchor::Fall => Interval::closed(begin.clone(), end.clone()),
    };

    let ends = match anchor {
        Anchor::Fall | Anchor::Both => Interval::closed(end.clone(), end),
        Anchor::None | Anchor::Rise => Interval::closed(begin, end),
    };

    let durations = match anchor {
        Anchor::Both => Interval::closed(length.clone(), length),
        _ => Interval::closed(Rational::zero(), length),
    };

    Ok(Zone::from_intervals([begins, ends, durations])?)
}

/// The point representing the window `[l, u]`.
pub fn translation_point(l: &Rational, u: &Rational) -> Point {
    Point::from([l.clone(), u.clone(), u - l])
}

/// Robustness of the window `[l, u]` with respect to a timed zone set.
pub fn translation_robustness(zones: &ZoneSet, l: &Rational, u: &Rational) -> Result<Robustness, OracleError> {
    oracle::robustness(zones, &translation_point(l, u))
}

/// Largest robustness of any translation of the window `[l, u]` lying inside `scope`.
///
/// The argument of the returned [`Optimum`] is the begin instant of the best translation. Fails
/// with [`OracleError::InvalidScope`] if the window is longer than the scope.
pub fn optimal_translation_robustness(
    zones: &ZoneSet,
    l: &Rational,
    u: &Rational,
    scope: &Scope,
) -> Result<Optimum, OracleError> {
    let width = u - l;
    let begins = Scope::new(scope.start().clone(), scope.end() - &width)?;
    let free = FreeParameter::coupled([(BEGIN, Rational::zero()), (END, width)])?;

    oracle::optimal_robustness(zones, &translation_point(l, u), &free, &begins)
}

/// How far a window can be translated in each direction while it keeps matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationMargins {
    /// Supremum of the leftward shifts.
    pub left: Rational,

    /// Supremum of the rightward shifts.
    pub right: Rational,
}

impl TranslationMargins {
    /// The smaller of the two margins.
    pub fn min(&self) -> &Rational {
        if self.left < self.right {
            &self.left
        } else {
            &self.right
        }
    }
}

/// Shifts `s` for which the window `[l + s, u + s]` lies in the zone and in the scope.
fn admissible_shifts(zone: &Zone, l: &Rational, u: &Rational, scope: &Interval) -> Option<Interval> {
    let duration = u - l;

    if !zone.interval(DURATION)?.contains(&duration) {
        return None;
    }

    let begins = zone.interval(BEGIN)?.shift(&-l);
    let ends = zone.interval(END)?.shift(&-u);
    let shifts = begins.intersection(&ends).intersection(scope);

    if shifts.is_empty() {
        None
    } else {
        Some(shifts)
    }
}

/// Merge intervals into their connected components.
fn components(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort_by(|left, right| left.lower.cmp_as_lower(&right.lower).reverse());

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());

    for interval in intervals {
        if let Some(current) = merged.last_mut() {
            let connected = match interval.lower.value.cmp(&current.upper.value) {
                Ordering::Less => true,
                Ordering::Equal => interval.lower.closed || current.upper.closed,
                Ordering::Greater => false,
            };

            if connected {
                current.upper = current.upper.looser_upper(&interval.upper).clone();
                continue;
            }
        }

        merged.push(interval);
    }

    merged
}

/// Compute how far the window `[l, u]` can be shifted left and right while every intermediate
/// window matches and both of its endpoints stay inside `scope`.
///
/// Returns [`None`] if the window itself does not match.
pub fn translation_margins(
    zones: &ZoneSet,
    l: &Rational,
    u: &Rational,
    scope: &Scope,
) -> Result<Option<TranslationMargins>, OracleError> {
    zones.check_point(&translation_point(l, u))?;

    let scope_shifts = Interval::closed(scope.start() - l, scope.end() - u);
    let shifts = zones
        .iter()
        .filter_map(|zone| admissible_shifts(zone, l, u, &scope_shifts))
        .collect::<Vec<_>>();

    let zero = Rational::zero();
    let component = components(shifts)
        .into_iter()
        .find(|component| component.contains(&zero));

    debug!("translation margins of [{}, {}]: {:?}", l, u, component);

    Ok(component.map(|component| TranslationMargins {
        left: -component.lower.value,
        right: component.upper.value,
    }))
}
