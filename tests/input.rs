use std::io::Cursor;

use chrono::{TimeZone, Utc};
use coexist::CoexistError;
use coexist::input::{intervals, parse_instant, parse_line, read_intervals};
use coexist::interval::{Bounded, Interval};

#[test]
fn instants() {
    assert_eq!(parse_instant("42"), Some(42));
    assert_eq!(parse_instant("-7"), Some(-7));
    assert_eq!(parse_instant("+7"), Some(7));
    let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(parse_instant("2024-06-01T12:00:00Z"), Some(noon.timestamp_millis()));
    assert_eq!(parse_instant("2024-06-01T14:00:00+02:00"), Some(noon.timestamp_millis()));
    assert_eq!(parse_instant("noon"), None);
}

#[test]
fn lines_with_and_without_references() {
    let plain = parse_line(1, "0, 10").unwrap().unwrap();
    assert_eq!(plain.interval(), Interval::new(0, 10).unwrap());
    assert_eq!(plain.reference(), "");

    let labeled = parse_line(2, "  -5 ,5, build step, second try ").unwrap().unwrap();
    assert_eq!(labeled.interval(), Interval::new(-5, 5).unwrap());
    assert_eq!(labeled.reference(), "build step, second try");
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_line(1, "").unwrap(), None);
    assert_eq!(parse_line(2, "   ").unwrap(), None);
    assert_eq!(parse_line(3, "# start, end").unwrap(), None);
}

#[test]
fn malformed_lines() {
    assert!(matches!(parse_line(4, "10"), Err(CoexistError::Parse { line: 4, .. })));
    assert!(matches!(parse_line(5, "a, 10"), Err(CoexistError::Parse { line: 5, .. })));
    assert!(matches!(parse_line(6, "10, 10"), Err(CoexistError::Parse { line: 6, .. })), "empty intervals are rejected");
}

#[test]
fn reading_a_stream() {
    let text = "# jobs\n0, 10, a\n\n5, 15, b\n2024-01-01T00:00:00Z, 2024-01-01T01:00:00Z, c\n";
    let intervals = read_intervals(Cursor::new(text)).unwrap();
    assert_eq!(intervals.len(), 3);
    assert_eq!(intervals[1].reference(), "b");
    assert_eq!(intervals[2].interval().length(), 3_600_000);

    let broken = "0, 10\n5\n";
    assert!(matches!(
        read_intervals(Cursor::new(broken)),
        Err(CoexistError::Parse { line: 2, .. })
    ));
}

#[test]
fn intervals_are_yielded_line_by_line() {
    let text = "0, 10, a\nnot an interval\n5, 15, b\n";
    let mut stream = intervals(Cursor::new(text));
    let first = stream.next().expect("first line").expect("valid interval");
    assert_eq!(first.reference(), "a");
    assert!(matches!(stream.next(), Some(Err(CoexistError::Parse { line: 2, .. }))));
    let third = stream.next().expect("third line").expect("valid interval");
    assert_eq!(third.interval(), Interval::new(5, 15).unwrap());
    assert!(stream.next().is_none());
}
