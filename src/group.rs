//! Groups of coexisting intervals.
//!
//! An [`IntervalList`] keeps members together with two derived windows:
//! * the *min borders*, the intersection of all members, i.e. the span during
//!   which every member is active at once;
//! * the *max borders*, the union envelope of all members.
//!
//! An [`IntervalGroup`] adds the *basic interval*, the founding member, which
//! decides whether a newly arriving interval is admissible at all. The
//! min borders then decide whether it can be added as is, or whether the
//! group has to be refined into a successor.

use crate::interval::{Bounded, Interval};

// ------------- IntervalList -------------
#[derive(Clone, Debug)]
pub struct IntervalList<M> {
    members: Vec<M>,
    min_borders: Option<Interval>,
    max_borders: Option<Interval>,
}

impl<M: Bounded> IntervalList<M> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            min_borders: None,
            max_borders: None,
        }
    }
    pub fn with_member(member: M) -> Self {
        let mut list = Self::new();
        list.push(member);
        list
    }
    pub fn push(&mut self, member: M) {
        let interval = member.interval();
        if self.members.is_empty() {
            self.min_borders = Some(interval);
            self.max_borders = Some(interval);
        } else {
            // an empty intersection can only come from unordered input
            self.min_borders = self
                .min_borders
                .and_then(|borders| borders.intersection(&interval));
            self.max_borders = self
                .max_borders
                .map(|borders| borders.envelope(&interval));
        }
        self.members.push(member);
    }
    pub fn members(&self) -> &[M] {
        &self.members
    }
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.members.iter().map(Bounded::interval)
    }
    pub fn into_members(self) -> Vec<M> {
        self.members
    }
    pub fn len(&self) -> usize {
        self.members.len()
    }
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
    pub fn min_borders(&self) -> Option<Interval> {
        self.min_borders
    }
    pub fn max_borders(&self) -> Option<Interval> {
        self.max_borders
    }
    pub fn within_min_borders(&self, interval: &Interval) -> bool {
        self.min_borders
            .is_some_and(|borders| borders.contains_instant(interval.start()))
    }
    pub fn within_max_borders(&self, interval: &Interval) -> bool {
        self.max_borders
            .is_some_and(|borders| borders.contains_instant(interval.start()))
    }
}

impl<M: Bounded> Default for IntervalList<M> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- IntervalGroup -------------
#[derive(Clone, Debug)]
pub struct IntervalGroup<M> {
    basic: Interval,
    list: IntervalList<M>,
}

impl<M: Bounded> IntervalGroup<M> {
    pub fn seeded(member: M) -> Self {
        Self {
            basic: member.interval(),
            list: IntervalList::with_member(member),
        }
    }
    // The founding member stays the basic interval for the life of the group.
    pub fn basic(&self) -> Interval {
        self.basic
    }
    /// Does the interval start within the span of the basic interval?
    pub fn is_compatible(&self, interval: &Interval) -> bool {
        self.basic.contains_instant(interval.start())
    }
    /// Does the interval start while every current member is active?
    pub fn belongs_directly(&self, interval: &Interval) -> bool {
        self.list.within_min_borders(interval)
    }
    pub fn add_member(&mut self, member: M) {
        self.list.push(member);
    }
    pub fn members(&self) -> &[M] {
        self.list.members()
    }
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.list.intervals()
    }
    pub fn into_members(self) -> Vec<M> {
        self.list.into_members()
    }
    pub fn len(&self) -> usize {
        self.list.len()
    }
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
    pub fn min_borders(&self) -> Option<Interval> {
        self.list.min_borders()
    }
    pub fn max_borders(&self) -> Option<Interval> {
        self.list.max_borders()
    }
}

impl<M: Bounded + Clone> IntervalGroup<M> {
    /// Builds the successor group that continues after `member` failed to
    /// belong directly. Members ending at or before its start are left
    /// behind, the oldest survivor becomes the new basic interval and
    /// `member` is appended last. This group is left as it is.
    pub fn refine_by(&self, member: M) -> IntervalGroup<M> {
        let start = member.interval().start();
        let mut survivors = self
            .list
            .members()
            .iter()
            .filter(|m| m.interval().end() > start)
            .cloned();
        let mut refined = match survivors.next() {
            Some(first) => IntervalGroup::seeded(first),
            None => return IntervalGroup::seeded(member),
        };
        for survivor in survivors {
            refined.add_member(survivor);
        }
        refined.add_member(member);
        refined
    }
}
