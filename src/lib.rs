//! Quantitative robustness of matches of [timed regular expressions] over exact rational time.
//!
//! A timed regular expression describes a temporal pattern, and the set of time assignments that
//! match a pattern in a signal can be represented as a finite union of [`Zone`]s, which are
//! axis-aligned boxes whose faces may be open or closed. Rather than answering only whether a
//! candidate assignment matches, this crate computes a signed [`Robustness`] value measuring how
//! far the candidate is from flipping between matching and non-matching. Positive values indicate
//! a match with the given margin, negative values indicate the distance to the nearest match and
//! zero indicates a point on the boundary of the match set.
//!
//! All bound values and query coordinates are arbitrary-precision [`Rational`]s so that boundary
//! comparisons are exact, and repeated queries at the same point always produce identical values.
//!
//! [timed regular expressions]: https://doi.org/10.1145/506147.506151
//!
//! # Examples
//!
//! A match set is assembled with a [`ZoneSetBuilder`] and queried with the functions exported at
//! the crate root:
//!
//! ```rust
//! use robust_tre::rational::integer;
//! use robust_tre::zone::Point;
//! use robust_tre::{robustness, Robustness, ZoneSetBuilder};
//!
//! let mut builder = ZoneSetBuilder::new();
//! builder.add_from_period(integer(0), integer(2)).unwrap();
//! builder.add_from_period(integer(5), integer(8)).unwrap();
//! let zones = builder.build();
//!
//! let inside = Point::from([integer(6)]);
//! let between = Point::from([integer(3)]);
//!
//! assert_eq!(robustness(&zones, &inside).unwrap(), Robustness::Finite(integer(1)));
//! assert_eq!(robustness(&zones, &between).unwrap(), Robustness::Finite(integer(-1)));
//! ```
//!
//! When one coordinate of the query is allowed to vary, the [`optimal_robustness`] function
//! returns the best value attainable within a scope along with the coordinate that attains it:
//!
//! ```rust
//! use robust_tre::oracle::{FreeParameter, Scope};
//! use robust_tre::rational::{integer, ratio};
//! use robust_tre::zone::Point;
//! use robust_tre::{optimal_robustness, Robustness, ZoneSet};
//!
//! let zones = ZoneSet::from_periods([(integer(0), integer(2)), (integer(5), integer(8))]).unwrap();
//! let scope = Scope::new(integer(0), integer(10)).unwrap();
//! let fixed = Point::from([integer(0)]);
//!
//! let optimum = optimal_robustness(&zones, &fixed, &FreeParameter::axis(0), &scope).unwrap();
//!
//! assert_eq!(optimum.robustness, Robustness::Finite(ratio(3, 2).unwrap()));
//! assert_eq!(optimum.argument, ratio(13, 2).unwrap());
//! ```
//!
//! The [`filter`] function erodes a match set to the points whose robustness is at least a given
//! bound, and the [`timed`] module maps match windows `[l, u]` onto three-dimensional
//! `(begin, end, duration)` zone sets for translation robustness queries. Robustness values over a
//! whole grid of windows can be sampled in parallel using the [`landscape`] module.

#![deny(clippy::all)]

pub mod bound;
pub mod filter;
pub mod landscape;
pub mod metrics;
pub mod oracle;
pub mod rational;
pub mod timed;
pub mod zone;
pub mod zone_set;

#[cfg(feature = "parser")]
pub mod parser;

pub use crate::bound::{Bound, ZoneBound};
pub use crate::filter::filter;
pub use crate::metrics::{Bottom, Join, Meet, Robustness, Top};
pub use crate::oracle::{optimal_robustness, robustness};
pub use crate::rational::Rational;
pub use crate::zone::{DimensionMismatch, Point, Zone};
pub use crate::zone_set::{ZoneSet, ZoneSetBuilder};

/// Check if any zone of the set contains the point.
///
/// Unlike [`robustness`], this test honors the closedness of each bound: a point on an open face
/// is not contained even though its robustness is zero.
pub fn contains(zones: &ZoneSet, point: &Point) -> Result<bool, DimensionMismatch> {
    zones.contains(point)
}
