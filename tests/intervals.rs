use chrono::{TimeZone, Utc};
use coexist::CoexistError;
use coexist::interval::{Bounded, Interval, ReferencedInterval};

#[test]
fn construction_requires_start_before_end() {
    assert_eq!(
        Interval::new(5, 5),
        Err(CoexistError::InvalidInterval { start: 5, end: 5 }),
        "empty interval must be rejected"
    );
    assert_eq!(
        Interval::new(10, 3),
        Err(CoexistError::InvalidInterval { start: 10, end: 3 }),
        "reversed interval must be rejected"
    );
    for (start, end) in [(0, 1), (-10, -9), (-5, 5), (i64::MIN, i64::MIN + 1), (i64::MAX - 1, i64::MAX)] {
        let interval = Interval::new(start, end).unwrap_or_else(|e| panic!("[{start}, {end}) should be valid: {e}"));
        assert_eq!(interval.start(), start);
        assert_eq!(interval.end(), end);
    }
}

#[test]
fn length_and_containment() {
    let outer = Interval::new(0, 10).unwrap();
    let inner = Interval::new(2, 10).unwrap();
    let crossing = Interval::new(8, 12).unwrap();
    assert_eq!(outer.length(), 10);
    assert!(outer.contains(&inner));
    assert!(outer.contains(&outer));
    assert!(!outer.contains(&crossing));
    assert!(outer.contains_instant(0));
    assert!(!outer.contains_instant(10), "end is not part of the interval");
}

#[test]
fn overlap_intersection_and_envelope() {
    let a = Interval::new(0, 10).unwrap();
    let b = Interval::new(5, 15).unwrap();
    let c = Interval::new(10, 20).unwrap();
    assert!(a.overlaps(&b));
    assert!(!a.overlaps(&c), "touching intervals do not overlap");
    assert_eq!(a.intersection(&b), Some(Interval::new(5, 10).unwrap()));
    assert_eq!(a.intersection(&c), None);
    assert_eq!(a.envelope(&c), Interval::new(0, 20).unwrap());
}

#[test]
fn derived_intervals_are_checked() {
    let a = Interval::new(0, 10).unwrap();
    assert_eq!(a.with_start(4).unwrap(), Interval::new(4, 10).unwrap());
    assert_eq!(a.with_end(20).unwrap(), Interval::new(0, 20).unwrap());
    assert!(a.with_start(10).is_err());
    assert!(a.with_end(-1).is_err());
}

#[test]
fn longer_intervals_sort_first() {
    let mut intervals = vec![
        Interval::new(0, 1).unwrap(),
        Interval::new(3, 13).unwrap(),
        Interval::new(0, 5).unwrap(),
        Interval::new(1, 11).unwrap(),
    ];
    intervals.sort();
    let bounds: Vec<(i64, i64)> = intervals.iter().map(|i| (i.start(), i.end())).collect();
    assert_eq!(bounds, vec![(1, 11), (3, 13), (0, 5), (0, 1)]);
}

#[test]
fn widest_interval_has_a_length_and_sorts() {
    let widest = Interval::new(i64::MIN, i64::MAX).unwrap();
    assert_eq!(widest.length(), u64::MAX);
    let mut intervals = vec![Interval::new(0, 1).unwrap(), widest, Interval::new(i64::MIN, 0).unwrap()];
    intervals.sort();
    assert_eq!(intervals, vec![widest, Interval::new(i64::MIN, 0).unwrap(), Interval::new(0, 1).unwrap()]);
}

#[test]
fn timestamps_become_milliseconds() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap();
    let interval = Interval::from_datetimes(start, end).unwrap();
    assert_eq!(interval.start(), start.timestamp_millis());
    assert_eq!(interval.length(), 3_600_000);
    assert!(Interval::from_datetimes(end, start).is_err());
}

#[test]
fn references_are_carried_unchanged() {
    let r = ReferencedInterval::new(3, 7, "process-42").unwrap();
    assert_eq!(r.interval(), Interval::new(3, 7).unwrap());
    assert_eq!(*r.reference(), "process-42");
    assert_eq!(r.into_reference(), "process-42");
    assert!(ReferencedInterval::new(7, 3, "bad").is_err());
}

#[test]
fn display_and_serde() {
    let a = Interval::new(-2, 4).unwrap();
    assert_eq!(a.to_string(), "[-2, 4)");
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, r#"{"start":-2,"end":4}"#);
    let back: Interval = serde_json::from_str(&json).unwrap();
    assert_eq!(back, a);
    assert!(serde_json::from_str::<Interval>(r#"{"start":4,"end":4}"#).is_err(), "invalid intervals cannot be deserialized");
}
