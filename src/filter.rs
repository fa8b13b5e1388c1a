//! Erosion of a match set to its robust interior.
//!
//! Every zone of the input set is shrunk inward by the robustness bound on each dimension, keeping
//! the closedness of each bound. Zones with nothing left are dropped. Every point of the resulting
//! set has a robustness of at least the bound with respect to the input set.
//!
//! ```rust
//! use robust_tre::filter::filter;
//! use robust_tre::rational::{integer, literal};
//! use robust_tre::ZoneSet;
//!
//! let zones = ZoneSet::from_periods([(integer(2), integer(5))]).unwrap();
//! let robust = filter(&zones, &literal("1.4").unwrap()).unwrap();
//!
//! assert_eq!(robust, ZoneSet::from_periods([
//!     (literal("3.4").unwrap(), literal("3.6").unwrap()),
//! ]).unwrap());
//! ```

use log::debug;
use num_traits::{Signed, Zero};
use thiserror::Error;

use crate::rational::Rational;
use crate::zone_set::ZoneSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Robustness bound must be non-negative, got {0}")]
    InvalidBound(Rational),
}

/// Produce the set of points whose robustness with respect to `zones` is at least `rob_bound`.
///
/// The input set is left unchanged. A bound of zero returns an identical set.
pub fn filter(zones: &ZoneSet, rob_bound: &Rational) -> Result<ZoneSet, FilterError> {
    if rob_bound.is_negative() {
        return Err(FilterError::InvalidBound(rob_bound.clone()));
    }

    if rob_bound.is_zero() {
        return Ok(zones.clone());
    }

    let eroded: Vec<_> = zones.iter().filter_map(|zone| zone.erode(rob_bound)).collect();

    debug!("eroded zone set by {}: {} of {} zones remain", rob_bound, eroded.len(), zones.len());

    Ok(ZoneSet::from_parts(zones.dimension(), eroded))
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{filter, FilterError};
    use crate::bound::Bound;
    use crate::metrics::Robustness;
    use crate::rational::{integer, literal, ratio};
    use crate::zone::{Interval, Point, Zone};
    use crate::zone_set::{ZoneSet, ZoneSetBuilder};

    #[test]
    fn zero_bound_is_identity() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::from_periods([(integer(0), integer(10)), (integer(10), integer(15))])?;

        assert_eq!(filter(&zones, &integer(0))?, zones);

        Ok(())
    }

    #[test]
    fn negative_bound_is_rejected() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::from_periods([(integer(0), integer(10))])?;

        assert_eq!(filter(&zones, &integer(-1)), Err(FilterError::InvalidBound(integer(-1))));

        Ok(())
    }

    #[test]
    fn erosion_shrinks_and_drops() -> Result<(), Box<dyn Error>> {
        let zones = ZoneSet::from_periods([(integer(2), integer(5))])?;

        let shrunk = filter(&zones, &literal("1.4")?)?;
        assert_eq!(shrunk, ZoneSet::from_periods([(literal("3.4")?, literal("3.6")?)])?);

        let single = filter(&zones, &ratio(3, 2)?)?;
        assert_eq!(single, ZoneSet::from_periods([(ratio(7, 2)?, ratio(7, 2)?)])?);

        let dropped = filter(&zones, &literal("1.6")?)?;
        assert!(dropped.is_empty());
        assert_eq!(dropped.dimension(), Some(1));

        Ok(())
    }

    #[test]
    fn open_bounds_collapse() -> Result<(), Box<dyn Error>> {
        let mut builder = ZoneSetBuilder::new();
        builder.add_period(Bound::open(integer(2)), Bound::closed(integer(5)))?;
        let zones = builder.build();

        assert!(filter(&zones, &ratio(3, 2)?)?.is_empty());
        assert_eq!(filter(&zones, &integer(1))?.len(), 1);

        Ok(())
    }

    #[test]
    fn eroded_points_meet_the_bound() -> Result<(), Box<dyn Error>> {
        let zone = Zone::from_intervals([
            Interval::closed(integer(0), integer(6)),
            Interval::new(Bound::open(integer(1)), Bound::closed(integer(4))),
        ])?;
        let zones = ZoneSet::from_zones([zone, Zone::from_intervals([
            Interval::closed(integer(8), integer(9)),
            Interval::closed(integer(0), integer(9)),
        ])?])?;

        let bound = ratio(1, 2)?;
        let robust = filter(&zones, &bound)?;

        assert_eq!(robust.len(), 2);

        for x in 0..=20 {
            for y in 0..=20 {
                let p = Point::from([ratio(x, 2)?, ratio(y, 2)?]);

                if robust.contains(&p)? {
                    assert!(zones.robustness(&p)? >= Robustness::Finite(bound.clone()));
                }
            }
        }

        assert_eq!(zones.len(), 2);

        Ok(())
    }
}
