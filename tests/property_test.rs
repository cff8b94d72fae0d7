//! Property-based tests for grouping, run detection, ticks and scales.
//!
//! Run: cargo test --test property_test

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use proptest::prelude::*;
use trueno_ggg::grammar::{group_series, Column, Dataset, Filter, Key, Scalar, Series};
use trueno_ggg::scale::{LinearScale, Scale};
use trueno_ggg::ticks::{linear_ticks, log_ticks};
use trueno_ggg::Error;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every row lands in exactly one series; series follow first-seen key order.
    #[test]
    fn prop_grouping_partitions_rows(keys in prop::collection::vec(0i64..5, 0..200)) {
        let series = group_series(0..keys.len(), keys.len(), |row| Ok(Key::Int(keys[row]))).unwrap();

        let mut seen: Vec<usize> = series.iter().flat_map(|s| s.rows().iter().copied()).collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..keys.len()).collect::<Vec<_>>());

        let mut first_seen = Vec::new();
        for k in &keys {
            if !first_seen.contains(k) {
                first_seen.push(*k);
            }
        }
        let order: Vec<Key> = series.iter().map(|s| s.key().clone()).collect();
        prop_assert_eq!(order, first_seen.into_iter().map(Key::Int).collect::<Vec<_>>());

        for s in &series {
            prop_assert!(s.rows().windows(2).all(|w| w[0] < w[1]));
            prop_assert!(s.rows().iter().all(|&r| s.key() == &Key::Int(keys[r])));
        }
    }

    /// Sorted runs cover the series exactly once, each with a single X value.
    #[test]
    fn prop_x_runs_cover_series(points in prop::collection::vec((0i64..10, -100i64..100), 1..100)) {
        let xs: Vec<i64> = points.iter().map(|p| p.0).collect();
        let ys: Vec<i64> = points.iter().map(|p| p.1).collect();
        let mut series = Series::new(Key::Unit, (0..points.len()).collect());
        series.sort_by_xy(&xs, &ys);

        let sorted = series.rows().windows(2).all(|w| (xs[w[0]], ys[w[0]]) <= (xs[w[1]], ys[w[1]]));
        prop_assert!(sorted, "rows not ordered by (x, y): {:?}", series.rows());

        let mut union = Vec::new();
        let mut last_x = None;
        for (first, run) in series.x_runs(&xs) {
            prop_assert_eq!(first, run[0]);
            prop_assert!(run.iter().all(|&r| xs[r] == xs[first]));
            prop_assert!(last_x.map_or(true, |x| x < xs[first]));
            last_x = Some(xs[first]);
            union.extend_from_slice(run);
        }
        prop_assert_eq!(union.as_slice(), series.rows());
    }

    /// Linear ticks are ascending and stay inside the domain.
    #[test]
    fn prop_linear_ticks_inside_domain(a in -1e6f64..1e6, span in 1e-3f64..1e6, count in 1usize..20) {
        let b = a + span;
        let ticks = linear_ticks(a, b, count);
        let eps = 1e-9 * (span + a.abs());
        prop_assert!(ticks.iter().all(|&t| t >= a - eps && t <= b + eps));
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));

        let mut reversed = linear_ticks(b, a, count);
        reversed.reverse();
        prop_assert_eq!(reversed, ticks);
    }

    /// Log ticks stay inside the domain.
    #[test]
    fn prop_log_ticks_inside_domain(lo in 1e-3f64..1e3, factor in 1.5f64..1e4, base in 2u32..17) {
        let hi = lo * factor;
        let ticks = log_ticks(base, lo, hi);
        prop_assert!(ticks.iter().all(|&t| t >= lo && t <= hi));
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    /// Inverting a linear scale recovers the input.
    #[test]
    fn prop_linear_scale_inverts(
        d0 in -1e3f64..1e3,
        dspan in 1e-2f64..1e3,
        r0 in -1e3f64..1e3,
        rspan in 1e-2f64..1e3,
        t in 0.0f64..1.0,
    ) {
        let s = LinearScale::new((d0, d0 + dspan), (r0, r0 + rspan));
        let v = d0 + t * dspan;
        let back = s.invert(s.scale(v));
        prop_assert!((back - v).abs() <= 1e-6 * (1.0 + v.abs()));
    }

    /// A filter and its negation split the rows between them.
    #[test]
    fn prop_filter_negation_complements(values in prop::collection::vec(-50i64..50, 0..100), pivot in -50i64..50) {
        let mut d = Dataset::new();
        let c = Column::<i64>::new("v");
        d.add_column(&c);
        for (row, v) in d.grow(values.len()).zip(&values) {
            d.set(&c, row, *v).unwrap();
        }

        let mut kept = Filter::less_than(&c, pivot).rows(&d).unwrap();
        let dropped = Filter::not(Filter::less_than(&c, pivot)).rows(&d).unwrap();
        prop_assert_eq!(kept.len() + dropped.len(), values.len());
        kept.extend(dropped);
        kept.sort_unstable();
        prop_assert_eq!(kept, (0..values.len()).collect::<Vec<_>>());
    }

    /// String -> i64 -> String through two conversions restores every value.
    #[test]
    fn prop_parse_then_format_round_trips(
        values in prop::collection::vec(prop_oneof![Just(i64::MAX), Just(i64::MIN), any::<i64>()], 0..64),
    ) {
        let mut d = Dataset::new();
        let raw = Column::<String>::new("n");
        d.add_column(&raw);
        for (row, v) in d.grow(values.len()).zip(&values) {
            d.set(&raw, row, v.to_string()).unwrap();
        }

        let ints = d.parse::<i64>(&raw).unwrap();
        prop_assert_eq!(d.values(&ints).unwrap(), values.as_slice());
        let text = d.convert(&ints, |v: &i64| Ok::<_, std::convert::Infallible>(v.to_string())).unwrap();
        let expected: Vec<String> = values.iter().map(i64::to_string).collect();
        prop_assert_eq!(d.values(&text).unwrap(), expected.as_slice());
        prop_assert_eq!(d.column_count(), 1);
    }

    /// One malformed cell aborts the parse and leaves the dataset untouched.
    #[test]
    fn prop_malformed_parse_changes_nothing(
        values in prop::collection::vec(any::<i64>(), 1..32),
        bad_at in any::<prop::sample::Index>(),
    ) {
        let mut d = Dataset::new();
        let raw = Column::<String>::new("n");
        d.add_column(&raw);
        let bad = bad_at.index(values.len());
        for (row, v) in d.grow(values.len()).zip(&values) {
            let cell = if row == bad { format!("{v}x") } else { v.to_string() };
            d.set(&raw, row, cell).unwrap();
        }
        let before = d.values(&raw).unwrap().to_vec();

        let err = d.parse::<i64>(&raw).unwrap_err();
        prop_assert!(
            matches!(err, Error::Conversion { row, .. } if row == bad),
            "expected Error::Conversion at row {}, got {:?}", bad, err
        );
        prop_assert_eq!(d.values(&raw).unwrap(), before.as_slice());
        prop_assert_eq!(d.column_count(), 1);
        prop_assert!(!d.contains(&Column::<i64>::new("n")));
    }

    /// Integer accumulation wraps instead of overflowing.
    #[test]
    fn prop_int_sum_wraps(values in prop::collection::vec(any::<i64>(), 0..50)) {
        let expected = values.iter().fold(0i64, |acc, v| acc.wrapping_add(*v));
        let got = values.iter().fold(0i64, |acc, v| acc.accumulate(*v));
        prop_assert_eq!(got, expected);
    }
}
