// custom made ordering for intervals
use std::cmp::Ordering;
// used to print out readable forms of an interval
use std::fmt;

// used when intervals are given as timestamps
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoexistError, Result};

// ------------- Instant -------------
pub type Instant = i64;

// ------------- Interval -------------
/// A range of instants from `start` up to (but not including) `end`.
///
/// The only way to obtain an `Interval` is through a constructor that checks
/// `start < end`, so every value in circulation is valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    pub fn new(start: Instant, end: Instant) -> Result<Self> {
        if start >= end {
            return Err(CoexistError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }
    /// Builds an interval from two timestamps, using Unix milliseconds as instants.
    pub fn from_datetimes(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        Self::new(start.timestamp_millis(), end.timestamp_millis())
    }
    pub fn start(&self) -> Instant {
        self.start
    }
    pub fn end(&self) -> Instant {
        self.end
    }
    // unsigned, since [i64::MIN, i64::MAX) is a valid interval
    pub fn length(&self) -> u64 {
        self.end.abs_diff(self.start)
    }
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }
    pub fn contains_instant(&self, instant: Instant) -> bool {
        instant >= self.start && instant < self.end
    }
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
    /// The window shared by both intervals, if any.
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        Interval::new(self.start.max(other.start), self.end.min(other.end)).ok()
    }
    /// The smallest interval covering both intervals.
    pub fn envelope(&self, other: &Interval) -> Interval {
        // both inputs are valid so the envelope is too
        Interval {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
    pub fn with_start(&self, start: Instant) -> Result<Interval> {
        Interval::new(start, self.end)
    }
    pub fn with_end(&self, end: Instant) -> Result<Interval> {
        Interval::new(self.start, end)
    }
}

// Longer intervals sort first. Ties fall back on the bounds so that
// the ordering agrees with equality.
impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .length()
            .cmp(&self.length())
            .then_with(|| (self.start, self.end).cmp(&(other.start, other.end)))
    }
}
impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[derive(Deserialize)]
struct RawInterval {
    start: Instant,
    end: Instant,
}
impl TryFrom<RawInterval> for Interval {
    type Error = CoexistError;
    fn try_from(raw: RawInterval) -> Result<Self> {
        Interval::new(raw.start, raw.end)
    }
}

// ------------- Bounded -------------
/// Anything that occupies an interval and can therefore be kept in a group.
pub trait Bounded {
    fn interval(&self) -> Interval;
}
impl Bounded for Interval {
    fn interval(&self) -> Interval {
        *self
    }
}

// ------------- ReferencedInterval -------------
/// An interval labeled with some caller chosen context, such as the process
/// instance that produced it. The reference is never inspected by the engine.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ReferencedInterval<R> {
    interval: Interval,
    reference: R,
}

impl<R> ReferencedInterval<R> {
    pub fn new(start: Instant, end: Instant, reference: R) -> Result<Self> {
        Ok(Self::from_interval(Interval::new(start, end)?, reference))
    }
    pub fn from_interval(interval: Interval, reference: R) -> Self {
        Self { interval, reference }
    }
    pub fn start(&self) -> Instant {
        self.interval.start
    }
    pub fn end(&self) -> Instant {
        self.interval.end
    }
    pub fn reference(&self) -> &R {
        &self.reference
    }
    pub fn into_reference(self) -> R {
        self.reference
    }
}
impl<R> Bounded for ReferencedInterval<R> {
    fn interval(&self) -> Interval {
        self.interval
    }
}
impl<R: fmt::Debug> fmt::Display for ReferencedInterval<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {:?}", self.interval, self.reference)
    }
}
