//! Robustness oracles over zone sets.
//!
//! The [`robustness`] oracle evaluates the signed robustness of a single point. The
//! [`optimal_robustness`] oracle holds every coordinate of a point fixed except for a single free
//! parameter, which ranges over a closed [`Scope`], and returns the largest robustness attained.
//!
//! The free parameter may drive one axis or several axes at once, each at a fixed offset from the
//! parameter value. Along the parameter, the robustness with respect to a single zone has the form
//! `min(c, t - a, b - t)`, which is concave, so its maximum over the scope is attained at the
//! unconstrained maximizer `(a + b) / 2` clamped into the scope. The robustness of the union is the
//! maximum of these concave pieces, so evaluating the union at every clamped maximizer, at the
//! scope endpoints, and at the in-scope zone boundaries yields the exact optimum.
//!
//! # Examples
//!
//! ```rust
//! use robust_tre::oracle::{optimal_robustness, FreeParameter, Scope};
//! use robust_tre::rational::integer;
//! use robust_tre::zone::Point;
//! use robust_tre::{Robustness, ZoneSet};
//!
//! let zones = ZoneSet::from_periods([(integer(0), integer(10))]).unwrap();
//! let scope = Scope::new(integer(0), integer(20)).unwrap();
//! let fixed = Point::from([integer(0)]);
//!
//! let optimum = optimal_robustness(&zones, &fixed, &FreeParameter::axis(0), &scope).unwrap();
//!
//! assert_eq!(optimum.robustness, Robustness::Finite(integer(5)));
//! assert_eq!(optimum.argument, integer(5));
//! ```

use std::collections::BTreeSet;

use log::{debug, trace};
use nonempty::NonEmpty;
use num_traits::Zero;
use thiserror::Error;

use crate::metrics::Robustness;
use crate::rational::{self, Rational};
use crate::zone::{DimensionMismatch, Point, Zone};
use crate::zone_set::ZoneSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("Query point dimension mismatch: {0}")]
    DimensionMismatch(#[from] DimensionMismatch),

    #[error("Invalid scope: start {start} is greater than end {end}")]
    InvalidScope { start: Rational, end: Rational },

    #[error("Free axis {axis} is out of range for dimension {dimension}")]
    AxisOutOfRange { axis: usize, dimension: usize },

    #[error("Free axis {0} is coupled more than once")]
    DuplicateAxis(usize),

    #[error("Free parameter must drive at least one axis")]
    NoFreeAxis,
}

/// Evaluate the robustness of a point with respect to a zone set.
///
/// The result is the maximum over the member zones of the minimum per-dimension slack. Repeated
/// evaluation at the same point always returns the same value since no rounding is involved.
pub fn robustness(zones: &ZoneSet, point: &Point) -> Result<Robustness, OracleError> {
    let rob = zones.robustness(point)?;
    trace!("robustness at {} = {}", point, rob);

    Ok(rob)
}

/// Closed interval of values searched by the optimal oracle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    start: Rational,
    end: Rational,
}

impl Scope {
    pub fn new(start: Rational, end: Rational) -> Result<Self, OracleError> {
        if start > end {
            return Err(OracleError::InvalidScope { start, end });
        }

        Ok(Self { start, end })
    }

    /// Scope containing a single value.
    pub fn point(value: Rational) -> Self {
        Self {
            start: value.clone(),
            end: value,
        }
    }

    pub fn start(&self) -> &Rational {
        &self.start
    }

    pub fn end(&self) -> &Rational {
        &self.end
    }

    pub fn contains(&self, value: &Rational) -> bool {
        &self.start <= value && value <= &self.end
    }

    pub fn clamp(&self, value: Rational) -> Rational {
        rational::clamp(value, &self.start, &self.end)
    }
}

/// Axes of a query point driven by the free parameter of the optimal oracle.
///
/// For a parameter value `t`, every coupled axis `i` with offset `o` is assigned the coordinate
/// `t + o`, while the remaining coordinates keep their fixed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeParameter {
    couplings: NonEmpty<(usize, Rational)>,
}

impl FreeParameter {
    /// Free parameter equal to the coordinate of a single axis.
    pub fn axis(axis: usize) -> Self {
        Self {
            couplings: NonEmpty::new((axis, Rational::zero())),
        }
    }

    /// Free parameter driving several axes, each at a fixed offset from the parameter.
    pub fn coupled<I>(couplings: I) -> Result<Self, OracleError>
    where
        I: IntoIterator<Item = (usize, Rational)>,
    {
        let couplings: Vec<(usize, Rational)> = couplings.into_iter().collect();
        let mut seen = BTreeSet::new();

        for (axis, _) in &couplings {
            if !seen.insert(*axis) {
                return Err(OracleError::DuplicateAxis(*axis));
            }
        }

        NonEmpty::from_vec(couplings)
            .map(|couplings| Self { couplings })
            .ok_or(OracleError::NoFreeAxis)
    }

    pub fn couplings(&self) -> impl Iterator<Item = &(usize, Rational)> {
        self.couplings.iter()
    }

    fn check(&self, dimension: usize) -> Result<(), OracleError> {
        match self.couplings.iter().find(|(axis, _)| *axis >= dimension) {
            Some((axis, _)) => Err(OracleError::AxisOutOfRange { axis: *axis, dimension }),
            None => Ok(()),
        }
    }

    /// The query point obtained by assigning `value` to the free parameter.
    pub fn apply(&self, fixed: &Point, value: &Rational) -> Point {
        let mut point = fixed.clone();

        for (axis, offset) in self.couplings.iter() {
            point.set(*axis, value + offset);
        }

        point
    }

    /// Parameter value maximizing the robustness of a single zone, ignoring the scope.
    ///
    /// The rising terms `t + o - lower` are bounded by `t - max(lower - o)` and the falling terms
    /// `upper - t - o` by `min(upper - o) - t`; the two meet halfway between those constants.
    fn peak(&self, zone: &Zone) -> Option<Rational> {
        let mut rising: Option<Rational> = None;
        let mut falling: Option<Rational> = None;

        for (axis, offset) in self.couplings.iter() {
            let interval = zone.interval(*axis)?;
            let lower = &interval.lower.value - offset;
            let upper = &interval.upper.value - offset;

            rising = Some(match rising {
                Some(current) if current >= lower => current,
                _ => lower,
            });

            falling = Some(match falling {
                Some(current) if current <= upper => current,
                _ => upper,
            });
        }

        Some(rational::midpoint(&rising?, &falling?))
    }

    /// Parameter values at which a coupled axis crosses a boundary of the zone.
    fn breakpoints<'a>(&'a self, zone: &'a Zone) -> impl Iterator<Item = Rational> + 'a {
        self.couplings.iter().flat_map(move |(axis, offset)| {
            zone.interval(*axis)
                .into_iter()
                .flat_map(move |interval| [&interval.lower.value - offset, &interval.upper.value - offset])
        })
    }
}

/// Result of the optimal robustness oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimum {
    /// Largest robustness over the scope.
    pub robustness: Robustness,

    /// Free parameter value at which the optimum is attained.
    ///
    /// When the optimum is attained on a plateau, this is the smallest of the evaluated candidates
    /// on that plateau.
    pub argument: Rational,
}

/// Maximize the robustness over the free parameter within the scope.
///
/// `fixed` must have the dimension of the zone set. Its coordinates on the axes driven by `free`
/// are ignored and replaced by the parameter value plus the axis offset.
pub fn optimal_robustness(
    zones: &ZoneSet,
    fixed: &Point,
    free: &FreeParameter,
    scope: &Scope,
) -> Result<Optimum, OracleError> {
    zones.check_point(fixed)?;
    free.check(fixed.dimension())?;

    let mut candidates = BTreeSet::new();
    candidates.insert(scope.start.clone());
    candidates.insert(scope.end.clone());

    for zone in zones {
        if zone.is_empty() {
            continue;
        }

        if let Some(peak) = free.peak(zone) {
            candidates.insert(scope.clamp(peak));
        }

        candidates.extend(free.breakpoints(zone).filter(|value| scope.contains(value)));
    }

    debug!("evaluating {} optimal robustness candidates over [{}, {}]", candidates.len(), scope.start, scope.end);

    let mut best: Option<Optimum> = None;

    for candidate in candidates {
        let point = free.apply(fixed, &candidate);
        let rob = zones.robustness_at(point.coordinates());

        best = match best {
            Some(current) if current.robustness >= rob => Some(current),
            _ => Some(Optimum {
                robustness: rob,
                argument: candidate,
            }),
        };
    }

    // The candidate set always contains the scope endpoints
    let optimum = best.unwrap_or_else(|| Optimum {
        robustness: Robustness::NegInfinity,
        argument: scope.start.clone(),
    });

    debug!("optimal robustness {} at {}", optimum.robustness, optimum.argument);

    Ok(optimum)
}
