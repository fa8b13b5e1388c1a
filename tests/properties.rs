use proptest::prelude::*;
use robust_tre::oracle::{FreeParameter, Scope};
use robust_tre::rational::{integer, Rational};
use robust_tre::zone::Interval;
use robust_tre::{contains, filter, optimal_robustness, robustness, Bound, Join, Point, Robustness, Zone, ZoneSet};

fn quarter() -> impl Strategy<Value = Rational> {
    (-100i64..=100).prop_map(|n| integer(n) / integer(4))
}

fn interval() -> impl Strategy<Value = Interval> {
    (-20i64..20, 0i64..12, any::<bool>(), any::<bool>()).prop_map(|(lower, width, lc, uc)| {
        Interval::new(Bound::new(integer(lower), lc), Bound::new(integer(lower + width), uc))
    })
}

fn zone(dimension: usize) -> impl Strategy<Value = Zone> {
    prop::collection::vec(interval(), dimension).prop_filter_map("zone needs a dimension", |intervals| {
        Zone::from_intervals(intervals).ok()
    })
}

fn zone_set(dimension: usize) -> impl Strategy<Value = ZoneSet> {
    prop::collection::vec(zone(dimension), 0..5)
        .prop_filter_map("zones share a dimension", |zones| ZoneSet::from_zones(zones).ok())
}

fn point(dimension: usize) -> impl Strategy<Value = Point> {
    prop::collection::vec(quarter(), dimension).prop_map(Point::from)
}

proptest! {
    #[test]
    fn eroded_points_meet_the_bound(
        zones in zone_set(2),
        p in point(2),
        steps in 0i64..16,
    ) {
        let bound = integer(steps) / integer(4);
        let robust = filter(&zones, &bound)?;

        if contains(&robust, &p)? {
            prop_assert!(robustness(&zones, &p)? >= Robustness::Finite(bound.clone()));
        }

        prop_assert!(robust.len() <= zones.len());
    }

    #[test]
    fn union_takes_the_maximum(
        left in zone_set(2),
        right in zone_set(2),
        p in point(2),
    ) {
        let union = left.union(&right)?;
        let expected = Join::max(&robustness(&left, &p)?, &robustness(&right, &p)?);

        prop_assert_eq!(robustness(&union, &p)?, expected);
    }

    #[test]
    fn sign_agrees_with_membership(zones in zone_set(3), p in point(3)) {
        let rob = robustness(&zones, &p)?;

        if contains(&zones, &p)? {
            prop_assert!(!rob.is_negative());
        }

        if rob.is_positive() {
            prop_assert!(contains(&zones, &p)?);
        }
    }

    #[test]
    fn intersection_agrees_with_membership(
        left in zone_set(2),
        right in zone_set(2),
        p in point(2),
    ) {
        let common = left.intersection(&right)?;

        prop_assert_eq!(contains(&common, &p)?, contains(&left, &p)? && contains(&right, &p)?);
        prop_assert!(robustness(&common, &p)? <= robustness(&left, &p)?);
        prop_assert!(robustness(&common, &p)? <= robustness(&right, &p)?);
    }

    #[test]
    fn simplify_preserves_robustness(zones in zone_set(2), p in point(2)) {
        let simplified = zones.simplify();

        prop_assert!(simplified.len() <= zones.len());
        prop_assert_eq!(robustness(&simplified, &p)?, robustness(&zones, &p)?);
    }

    #[test]
    fn optimum_dominates_scope(
        zones in zone_set(2),
        fixed in point(2),
        start in quarter(),
        width in 0i64..40,
        offset in -8i64..8,
        samples in prop::collection::vec(0i64..=40, 1..8),
    ) {
        let end = &start + integer(width) / integer(4);
        let scope = Scope::new(start.clone(), end)?;
        let free = FreeParameter::coupled([(0, integer(0)), (1, integer(offset))])?;
        let optimum = optimal_robustness(&zones, &fixed, &free, &scope)?;

        prop_assert!(scope.contains(&optimum.argument));
        prop_assert_eq!(robustness(&zones, &free.apply(&fixed, &optimum.argument))?, optimum.robustness.clone());

        for sample in samples {
            let value = scope.clamp(&start + integer(sample) / integer(4));
            let rob = robustness(&zones, &free.apply(&fixed, &value))?;

            prop_assert!(optimum.robustness >= rob);
        }
    }
}

#[cfg(feature = "parser")]
proptest! {
    #[test]
    fn notation_round_trip(zones in zone_set(2)) {
        let text = zones.to_string();
        let parsed: ZoneSet = text.parse()?;

        if zones.is_empty() {
            prop_assert!(parsed.is_empty());
        } else {
            prop_assert_eq!(parsed, zones);
        }
    }
}
